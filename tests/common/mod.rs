//! Shared fixtures for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A plugin file with one class method, three instance methods and a helper
/// that must not be bound.
#[allow(dead_code)]
pub const PLAYER: &str = r#"package game

import "github.com/goby-lang/goby/vm"

type Object = vm.Object

type Player struct {
	health int
}

func (*Player) New(t *vm.Thread) Object {
	return nil
}

func (p *Player) SetHealth(t *vm.Thread, health *vm.IntegerObject) Object {
	return nil
}

func (p *Player) HP(t *vm.Thread) Object {
	return nil
}

func (p *Player) Attack(t *vm.Thread, target *Player, power *vm.IntegerObject) Object {
	return nil
}

func (p *Player) name() string {
	return "player"
}
"#;

#[allow(dead_code)]
pub fn write_source(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).expect("Failed to write source file");
    path
}

/// Run the `binder` binary with `args`.
#[allow(dead_code)]
pub fn run_binder<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_binder"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binder")
}

#[allow(dead_code)]
pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("temporary paths are UTF-8")
}

/// Tabs as four spaces, so snapshots line up in source.
#[allow(dead_code)]
pub fn untab(source: &str) -> String {
    source.replace('\t', "    ")
}
