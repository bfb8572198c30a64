//! End-to-end generation through the library and the CLI.

mod common;

use binder::pipeline::{generate, generate_to_path};
use binder::{BinderErrorKind, GeneratorConfig};
use binder_core::{BinderDatabase, SourceUnit};
use common::{PLAYER, path_str, run_binder, untab, write_source};
use insta::assert_snapshot;

#[test]
fn test_player_bindings() {
    let db = BinderDatabase::default();
    let unit = SourceUnit::from_path(&db, "player.go", PLAYER.to_string());
    let generated = generate(&db, unit, "Player", &GeneratorConfig::default()).unwrap();

    assert_snapshot!(untab(&generated.source), @r#"
// Code generated by binder. DO NOT EDIT.

package game

import (
    "fmt"

    "github.com/goby-lang/goby/vm"
    "github.com/goby-lang/goby/vm/errors"
)

func init() {
    vm.RegisterExternalClass(
        "game",
        vm.ExternalClass(
            "Player",
            "game.gb",
            map[string]vm.Method{
                "new": bindingPlayerNew,
            },
            map[string]vm.Method{
                "attack":     bindingPlayerAttack,
                "hp":         bindingPlayerHP,
                "set_health": bindingPlayerSetHealth,
            },
        ),
    )
}

// staticPlayer is the receiver shared by every class method of Player.
// It is created on first use without locking, so the host runtime must
// serialize calls into these adapters.
var staticPlayer *Player

func bindingPlayerNew(receiver vm.Object, line int, t *vm.Thread, args []vm.Object) vm.Object {
    if staticPlayer == nil {
        staticPlayer = new(Player)
    }
    r := staticPlayer
    if len(args) != 0 {
        return t.VM().InitErrorObject(errors.ArgumentError, line, errors.WrongNumberOfArgumentFormat, 0, len(args))
    }
    return r.New(t)
}

func bindingPlayerSetHealth(receiver vm.Object, line int, t *vm.Thread, args []vm.Object) vm.Object {
    r, ok := receiver.(*Player)
    if !ok {
        panic(fmt.Sprintf("Impossible receiver type. Wanted Player got %s", receiver))
    }
    if len(args) != 1 {
        return t.VM().InitErrorObject(errors.ArgumentError, line, errors.WrongNumberOfArgumentFormat, 1, len(args))
    }
    arg0, ok := args[0].(*vm.IntegerObject)
    if !ok {
        panic("Argument 0 must be *vm.IntegerObject")
    }
    return r.SetHealth(t, arg0)
}

func bindingPlayerHP(receiver vm.Object, line int, t *vm.Thread, args []vm.Object) vm.Object {
    r, ok := receiver.(*Player)
    if !ok {
        panic(fmt.Sprintf("Impossible receiver type. Wanted Player got %s", receiver))
    }
    if len(args) != 0 {
        return t.VM().InitErrorObject(errors.ArgumentError, line, errors.WrongNumberOfArgumentFormat, 0, len(args))
    }
    return r.HP(t)
}

func bindingPlayerAttack(receiver vm.Object, line int, t *vm.Thread, args []vm.Object) vm.Object {
    r, ok := receiver.(*Player)
    if !ok {
        panic(fmt.Sprintf("Impossible receiver type. Wanted Player got %s", receiver))
    }
    if len(args) != 2 {
        return t.VM().InitErrorObject(errors.ArgumentError, line, errors.WrongNumberOfArgumentFormat, 2, len(args))
    }
    arg0, ok := args[0].(*Player)
    if !ok {
        panic("Argument 0 must be *Player")
    }
    arg1, ok := args[1].(*vm.IntegerObject)
    if !ok {
        panic("Argument 1 must be *vm.IntegerObject")
    }
    return r.Attack(t, arg0, arg1)
}
"#);
}

#[test]
fn test_generation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bindings.go");
    let config = GeneratorConfig::default();

    let db = BinderDatabase::default();
    let unit = SourceUnit::from_path(&db, "player.go", PLAYER.to_string());
    generate_to_path(&db, unit, "Player", &out, &config).unwrap();
    let first = std::fs::read(&out).unwrap();

    let db = BinderDatabase::default();
    let unit = SourceUnit::from_path(&db, "player.go", PLAYER.to_string());
    generate_to_path(&db, unit, "Player", &out, &config).unwrap();
    let second = std::fs::read(&out).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unknown_type_leaves_output_alone() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bindings.go");
    std::fs::write(&out, "previous").unwrap();

    let db = BinderDatabase::default();
    let unit = SourceUnit::from_path(&db, "player.go", PLAYER.to_string());
    let err = generate_to_path(&db, unit, "Enemy", &out, &GeneratorConfig::default()).unwrap_err();

    assert!(matches!(err.kind(), BinderErrorKind::UnknownType(name) if name == "Enemy"));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous");
}

#[test]
fn test_type_without_methods() {
    let db = BinderDatabase::default();
    let unit = SourceUnit::from_path(
        &db,
        "empty.go",
        "package game\n\ntype Empty struct{}\n".to_string(),
    );
    let generated = generate(&db, unit, "Empty", &GeneratorConfig::default()).unwrap();

    assert_snapshot!(untab(&generated.source), @r#"
// Code generated by binder. DO NOT EDIT.

package game

import "github.com/goby-lang/goby/vm"

func init() {
    vm.RegisterExternalClass(
        "game",
        vm.ExternalClass(
            "Empty",
            "game.gb",
            map[string]vm.Method{},
            map[string]vm.Method{},
        ),
    )
}
"#);
}

#[test]
fn test_cli_generate_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "player.go", PLAYER);
    let out = dir.path().join("player_bindings.go");

    let output = run_binder([
        "generate",
        "--in",
        path_str(&input),
        "--type",
        "Player",
        "--out",
        path_str(&out),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("// Code generated by binder. DO NOT EDIT.\n"));
    assert!(written.contains("func bindingPlayerAttack("));
}

#[test]
fn test_cli_unknown_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "player.go", PLAYER);
    let out = dir.path().join("bindings.go");

    let output = run_binder([
        "generate",
        "--in",
        path_str(&input),
        "--type",
        "Enemy",
        "--out",
        path_str(&out),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown type Enemy"));
    assert!(!out.exists());
}

#[test]
fn test_cli_list() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "player.go", PLAYER);

    let output = run_binder(["list", "--in", path_str(&input)]);
    assert!(output.status.success());
    assert_snapshot!(String::from_utf8_lossy(&output.stdout), @r"
Object
Player
  class    new -> New
  instance set_health -> SetHealth
  instance hp -> HP
  instance attack -> Attack
");
}

#[test]
fn test_cli_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.go");

    let output = run_binder([
        "generate",
        "--in",
        path_str(&missing),
        "--type",
        "Player",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[test]
fn test_generic_type_does_not_block_other_bindings() {
    let source = format!(
        "{PLAYER}\ntype Box[T any] struct{{ v T }}\n\nfunc (b *Box[T]) Open(t *vm.Thread) Object {{\n\treturn nil\n}}\n"
    );
    let db = BinderDatabase::default();
    let unit = SourceUnit::from_path(&db, "player.go", source.clone());
    let generated = generate(&db, unit, "Player", &GeneratorConfig::default()).unwrap();
    assert!(generated.source.contains("func bindingPlayerAttack("));

    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "player.go", &source);
    let out = dir.path().join("bindings.go");
    let output = run_binder([
        "generate",
        "--in",
        path_str(&input),
        "--type",
        "Box",
        "--out",
        path_str(&out),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("its receiver type is generic"));
    assert!(!out.exists());
}
