//! Import collection and local package naming.

use std::collections::{BTreeMap, BTreeSet};

use crate::code::{Expr, Item, Stmt, Type};

/// Import paths referenced by a file, each with its local package name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Imports {
    names: BTreeMap<String, String>,
}

impl Imports {
    /// Collect every qualified reference in `items`. Paths requested under an
    /// explicit package name keep it; the rest are named in path order, and a
    /// clash with an earlier name gets a numeric suffix.
    pub fn collect(items: &[Item]) -> Self {
        let mut paths = Paths::new();
        for item in items {
            match item {
                Item::Func(func) => {
                    for param in &func.params {
                        type_paths(&param.ty, &mut paths);
                    }
                    if let Some(result) = &func.result {
                        type_paths(result, &mut paths);
                    }
                    for stmt in &func.body {
                        stmt_paths(stmt, &mut paths);
                    }
                }
                Item::Var(var) => {
                    if let Some(ty) = &var.ty {
                        type_paths(ty, &mut paths);
                    }
                }
            }
        }

        let mut names = BTreeMap::new();
        let mut taken = BTreeSet::new();
        for (path, package) in &paths {
            if let Some(package) = package {
                if taken.insert(package.clone()) {
                    names.insert(path.clone(), package.clone());
                }
            }
        }
        for path in paths.into_keys() {
            if names.contains_key(&path) {
                continue;
            }
            let base = guess_package_name(&path);
            let mut name = base.clone();
            let mut n = 2;
            while taken.contains(&name) {
                name = format!("{base}{n}");
                n += 1;
            }
            taken.insert(name.clone());
            names.insert(path, name);
        }
        Imports { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Local name under which `path` is referenced.
    pub fn name<'a>(&'a self, path: &'a str) -> &'a str {
        self.names.get(path).map_or(path, String::as_str)
    }

    /// `(path, alias)` pairs, standard library first. `alias` is `None` when
    /// the local name is the one Go tooling assumes from the path.
    pub fn groups(&self) -> [Vec<(&str, Option<&str>)>; 2] {
        let mut std = Vec::new();
        let mut external = Vec::new();
        for (path, name) in &self.names {
            let alias = (*name != guess_package_name(path)).then_some(name.as_str());
            if is_std(path) {
                std.push((path.as_str(), alias));
            } else {
                external.push((path.as_str(), alias));
            }
        }
        [std, external]
    }
}

fn is_std(path: &str) -> bool {
    !path.split('/').next().unwrap_or(path).contains('.')
}

/// Package name assumed for an unaliased import, following goimports: the
/// last path element, or the one before a `/vN` major version, without a
/// `go-` prefix and cut at the first non-identifier character
/// (`gopkg.in/yaml.v2` is `yaml`).
pub fn guess_package_name(path: &str) -> String {
    let mut elements = path.rsplit('/');
    let last = elements.next().unwrap_or(path);
    let base = match elements.next() {
        Some(parent) if is_major_version(last) => parent,
        _ => last,
    };
    let base = base.strip_prefix("go-").unwrap_or(base);
    let end = base
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(base.len());
    let name = &base[..end];
    match name.chars().next() {
        Some(c) if c.is_alphabetic() || c == '_' => name.to_string(),
        _ => format!("_{name}"),
    }
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Referenced paths, each with the package name a reference asked for.
type Paths = BTreeMap<String, Option<String>>;

fn add_path(paths: &mut Paths, path: &str, package: Option<&String>) {
    let slot = paths.entry(path.to_string()).or_default();
    if slot.is_none() {
        *slot = package.cloned();
    }
}

fn type_paths(ty: &Type, paths: &mut Paths) {
    match ty {
        Type::Named(_) => {}
        Type::Qual { path, package, .. } => add_path(paths, path, package.as_ref()),
        Type::Pointer(inner) | Type::Slice(inner) => type_paths(inner, paths),
        Type::Map(key, value) => {
            type_paths(key, paths);
            type_paths(value, paths);
        }
    }
}

fn expr_paths(expr: &Expr, paths: &mut Paths) {
    match expr {
        Expr::Ident(_) | Expr::Str(_) | Expr::Int(_) | Expr::Nil => {}
        Expr::Qual { path, .. } => add_path(paths, path, None),
        Expr::Selector { x, .. } | Expr::Not(x) => expr_paths(x, paths),
        Expr::Call { func, args, .. } => {
            expr_paths(func, paths);
            for arg in args {
                expr_paths(arg, paths);
            }
        }
        Expr::Index { x, index } => {
            expr_paths(x, paths);
            expr_paths(index, paths);
        }
        Expr::TypeAssert { x, ty } => {
            expr_paths(x, paths);
            type_paths(ty, paths);
        }
        Expr::Binary { lhs, rhs, .. } => {
            expr_paths(lhs, paths);
            expr_paths(rhs, paths);
        }
        Expr::MapLit { ty, entries } => {
            type_paths(ty, paths);
            for (key, value) in entries {
                expr_paths(key, paths);
                expr_paths(value, paths);
            }
        }
        Expr::Type(ty) => type_paths(ty, paths),
    }
}

fn stmt_paths(stmt: &Stmt, paths: &mut Paths) {
    match stmt {
        Stmt::Define { value, .. } => expr_paths(value, paths),
        Stmt::Assign { target, value } => {
            expr_paths(target, paths);
            expr_paths(value, paths);
        }
        Stmt::If { cond, body } => {
            expr_paths(cond, paths);
            for stmt in body {
                stmt_paths(stmt, paths);
            }
        }
        Stmt::Return(value) | Stmt::Expr(value) => expr_paths(value, paths),
    }
}
