//! Renders the code tree as gofmt-style Go source.

use std::fmt::Write;

use crate::code::{Expr, Function, Item, Stmt, Type, Var};
use crate::imports::Imports;

pub(crate) struct Printer<'a> {
    imports: &'a Imports,
    pub output: String,
}

impl<'a> Printer<'a> {
    pub fn new(imports: &'a Imports) -> Self {
        Self {
            imports,
            output: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.output.push('\t');
        }
    }

    fn comment(&mut self, depth: usize, line: &str) {
        self.indent(depth);
        if line.is_empty() {
            self.output.push_str("//\n");
        } else {
            let _ = writeln!(self.output, "// {line}");
        }
    }

    pub fn imports(&mut self) {
        let imports = self.imports;
        let groups: Vec<_> = imports
            .groups()
            .into_iter()
            .filter(|group| !group.is_empty())
            .collect();
        let total: usize = groups.iter().map(Vec::len).sum();
        if total == 1 {
            let (path, alias) = groups[0][0];
            self.output.push_str("import ");
            self.import_spec(path, alias);
            self.output.push('\n');
            return;
        }

        self.output.push_str("import (\n");
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            for &(path, alias) in group {
                self.indent(1);
                self.import_spec(path, alias);
                self.output.push('\n');
            }
        }
        self.output.push_str(")\n");
    }

    fn import_spec(&mut self, path: &str, alias: Option<&str>) {
        if let Some(alias) = alias {
            self.output.push_str(alias);
            self.output.push(' ');
        }
        self.output.push_str(&quote(path));
    }

    pub fn item(&mut self, item: &Item) {
        match item {
            Item::Func(func) => self.function(func),
            Item::Var(var) => self.var(var),
        }
    }

    fn function(&mut self, func: &Function) {
        for line in &func.doc {
            self.comment(0, line);
        }
        let _ = write!(self.output, "func {}(", func.name);
        for (i, param) in func.params.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.output.push_str(&param.name);
            self.output.push(' ');
            self.ty(&param.ty);
        }
        self.output.push(')');
        if let Some(result) = &func.result {
            self.output.push(' ');
            self.ty(result);
        }
        self.output.push_str(" {\n");
        self.block(&func.body, 1);
        self.output.push_str("}\n");
    }

    fn var(&mut self, var: &Var) {
        for line in &var.doc {
            self.comment(0, line);
        }
        let _ = write!(self.output, "var {}", var.name);
        if let Some(ty) = &var.ty {
            self.output.push(' ');
            self.ty(ty);
        }
        self.output.push('\n');
    }

    fn block(&mut self, stmts: &[Stmt], depth: usize) {
        for stmt in stmts {
            self.stmt(stmt, depth);
        }
    }

    fn stmt(&mut self, stmt: &Stmt, depth: usize) {
        self.indent(depth);
        match stmt {
            Stmt::Define { names, value } => {
                self.output.push_str(&names.join(", "));
                self.output.push_str(" := ");
                self.expr(value, depth);
            }
            Stmt::Assign { target, value } => {
                self.expr(target, depth);
                self.output.push_str(" = ");
                self.expr(value, depth);
            }
            Stmt::If { cond, body } => {
                self.output.push_str("if ");
                self.expr(cond, depth);
                self.output.push_str(" {\n");
                self.block(body, depth + 1);
                self.indent(depth);
                self.output.push('}');
            }
            Stmt::Return(value) => {
                self.output.push_str("return ");
                self.expr(value, depth);
            }
            Stmt::Expr(expr) => self.expr(expr, depth),
        }
        self.output.push('\n');
    }

    fn ty(&mut self, ty: &Type) {
        match ty {
            Type::Named(name) => self.output.push_str(name),
            Type::Qual { path, name, .. } => {
                let package = self.imports.name(path);
                let _ = write!(self.output, "{package}.{name}");
            }
            Type::Pointer(inner) => {
                self.output.push('*');
                self.ty(inner);
            }
            Type::Slice(inner) => {
                self.output.push_str("[]");
                self.ty(inner);
            }
            Type::Map(key, value) => {
                self.output.push_str("map[");
                self.ty(key);
                self.output.push(']');
                self.ty(value);
            }
        }
    }

    /// Prints `expr` starting mid-line; continuation lines are indented
    /// relative to `depth`.
    fn expr(&mut self, expr: &Expr, depth: usize) {
        match expr {
            Expr::Ident(name) => self.output.push_str(name),
            Expr::Qual { path, name } => {
                let package = self.imports.name(path);
                let _ = write!(self.output, "{package}.{name}");
            }
            Expr::Str(value) => self.output.push_str(&quote(value)),
            Expr::Int(value) => {
                let _ = write!(self.output, "{value}");
            }
            Expr::Nil => self.output.push_str("nil"),
            Expr::Selector { x, name } => {
                self.expr(x, depth);
                self.output.push('.');
                self.output.push_str(name);
            }
            Expr::Call {
                func,
                args,
                multiline,
            } => {
                self.expr(func, depth);
                self.output.push('(');
                if *multiline && !args.is_empty() {
                    self.output.push('\n');
                    for arg in args {
                        self.indent(depth + 1);
                        self.expr(arg, depth + 1);
                        self.output.push_str(",\n");
                    }
                    self.indent(depth);
                } else {
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            self.output.push_str(", ");
                        }
                        self.expr(arg, depth);
                    }
                }
                self.output.push(')');
            }
            Expr::Index { x, index } => {
                self.expr(x, depth);
                self.output.push('[');
                self.expr(index, depth);
                self.output.push(']');
            }
            Expr::TypeAssert { x, ty } => {
                self.expr(x, depth);
                self.output.push_str(".(");
                self.ty(ty);
                self.output.push(')');
            }
            Expr::Not(x) => {
                self.output.push('!');
                self.expr(x, depth);
            }
            Expr::Binary { lhs, op, rhs } => {
                self.expr(lhs, depth);
                let _ = write!(self.output, " {op} ");
                self.expr(rhs, depth);
            }
            Expr::MapLit { ty, entries } => self.map_lit(ty, entries, depth),
            Expr::Type(ty) => self.ty(ty),
        }
    }

    /// One entry per line, sorted by key, values aligned the way gofmt does.
    fn map_lit(&mut self, ty: &Type, entries: &[(Expr, Expr)], depth: usize) {
        self.ty(ty);
        if entries.is_empty() {
            self.output.push_str("{}");
            return;
        }

        let mut rendered: Vec<(String, String)> = entries
            .iter()
            .map(|(key, value)| (self.inline(key), self.inline(value)))
            .collect();
        rendered.sort();
        let width = rendered
            .iter()
            .map(|(key, _)| key.chars().count())
            .max()
            .unwrap_or(0);

        self.output.push_str("{\n");
        for (key, value) in &rendered {
            self.indent(depth + 1);
            let pad = width - key.chars().count() + 1;
            let _ = writeln!(self.output, "{key}:{:pad$}{value},", "");
        }
        self.indent(depth);
        self.output.push('}');
    }

    fn inline(&self, expr: &Expr) -> String {
        let mut printer = Printer::new(self.imports);
        printer.expr(expr, 0);
        printer.finish()
    }
}

/// Go interpreted string literal for `value`.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::*;

    fn render_stmt(stmt: Stmt) -> String {
        let imports = Imports::default();
        let mut printer = Printer::new(&imports);
        printer.stmt(&stmt, 0);
        printer.finish()
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a \"b\"\n"), "\"a \\\"b\\\"\\n\"");
        assert_eq!(quote("\u{1}"), "\"\\x01\"");
        assert_eq!(quote("한"), "\"한\"");
    }

    #[test]
    fn test_define_with_assertion() {
        let stmt = Stmt::define(["arg0", "ok"], ident("args").index(int(0)).assert(Type::named("int").pointer()));
        assert_eq!(render_stmt(stmt), "arg0, ok := args[0].(*int)\n");
    }

    #[test]
    fn test_if_block() {
        let stmt = Stmt::if_then(
            len(ident("args")).not_equal(int(2)),
            [Stmt::ret(nil())],
        );
        assert_eq!(
            render_stmt(stmt),
            "if len(args) != 2 {\n\treturn nil\n}\n"
        );
    }

    #[test]
    fn test_multiline_call_nests() {
        let stmt = Stmt::Expr(ident("outer").call_lines([
            lit("a"),
            ident("inner").call_lines([int(1)]),
        ]));
        assert_eq!(
            render_stmt(stmt),
            "outer(\n\t\"a\",\n\tinner(\n\t\t1,\n\t),\n)\n"
        );
    }

    #[test]
    fn test_map_literal_sorted_and_aligned() {
        let ty = Type::map(Type::named("string"), Type::named("int"));
        let stmt = Stmt::define(
            ["m"],
            map_lit(
                ty.clone(),
                [(lit("set_health"), int(2)), (lit("attack"), int(1))],
            ),
        );
        assert_eq!(
            render_stmt(stmt),
            "m := map[string]int{\n\t\"attack\":     1,\n\t\"set_health\": 2,\n}\n"
        );
        assert_eq!(render_stmt(Stmt::define(["e"], map_lit(ty, []))), "e := map[string]int{}\n");
    }

    #[test]
    fn test_map_literal_aligns_by_characters() {
        let ty = Type::map(Type::named("string"), Type::named("int"));
        let stmt = Stmt::define(
            ["m"],
            map_lit(ty, [(lit("größe"), int(1)), (lit("hp"), int(2))]),
        );
        assert_eq!(
            render_stmt(stmt),
            "m := map[string]int{\n\t\"größe\": 1,\n\t\"hp\":    2,\n}\n"
        );
    }
}
