//! Pre-order traversal over a [`File`], in the manner of `go/ast.Inspect`.

use crate::ast::*;

/// A borrowed view of any node the walker visits.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    File(&'a File),
    TypeSpec(&'a TypeSpec),
    FuncDecl(&'a FuncDecl),
    FieldList(&'a FieldList),
    Field(&'a Field),
    Block(&'a Block),
    Expr(&'a Expr),
    Ident(&'a Ident),
}

/// Visit every node of `file` once, parents before children, in source order.
///
/// Returning `false` from `f` skips the children of the node just visited.
pub fn inspect<'a, F>(file: &'a File, mut f: F)
where
    F: FnMut(Node<'a>) -> bool,
{
    walk(Node::File(file), &mut f);
}

fn walk<'a, F>(node: Node<'a>, f: &mut F)
where
    F: FnMut(Node<'a>) -> bool,
{
    if !f(node) {
        return;
    }

    match node {
        Node::File(file) => {
            walk(Node::Ident(&file.package), f);
            for decl in &file.decls {
                match decl {
                    Decl::Type(spec) => walk(Node::TypeSpec(spec), f),
                    Decl::Func(func) => walk(Node::FuncDecl(func), f),
                }
            }
        }
        Node::TypeSpec(spec) => {
            walk(Node::Ident(&spec.name), f);
            walk(Node::Expr(&spec.ty), f);
        }
        Node::FuncDecl(func) => {
            if let Some(recv) = &func.recv {
                walk(Node::FieldList(recv), f);
            }
            walk(Node::Ident(&func.name), f);
            walk(Node::FieldList(&func.ty.params), f);
            if let Some(results) = &func.ty.results {
                walk(Node::FieldList(results), f);
            }
            if let Some(body) = &func.body {
                walk(Node::Block(body), f);
            }
        }
        Node::FieldList(list) => {
            for field in &list.fields {
                walk(Node::Field(field), f);
            }
        }
        Node::Field(field) => {
            for name in &field.names {
                walk(Node::Ident(name), f);
            }
            walk(Node::Expr(&field.ty), f);
        }
        Node::Block(block) => {
            for spec in &block.types {
                walk(Node::TypeSpec(spec), f);
            }
        }
        Node::Expr(expr) => match expr {
            Expr::Ident(ident) => walk(Node::Ident(ident), f),
            Expr::Star(star) => walk(Node::Expr(&star.x), f),
            Expr::Selector(selector) => {
                walk(Node::Expr(&selector.x), f);
                walk(Node::Ident(&selector.sel), f);
            }
            Expr::Generic(generic) => walk(Node::Expr(&generic.x), f),
            Expr::Unsupported(_) => {}
        },
        Node::Ident(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GoParser;

    fn parse(source: &str) -> File {
        GoParser::new().unwrap().parse(source).unwrap()
    }

    #[test]
    fn test_visits_declarations_in_source_order() {
        let file = parse(
            "package game\n\
             type A struct{}\n\
             func (a *A) Run(t T) Object { type inner int; return nil }\n\
             type B struct{}\n",
        );
        let mut seen = Vec::new();
        inspect(&file, |node| {
            match node {
                Node::TypeSpec(spec) => seen.push(format!("type {}", spec.name.name)),
                Node::FuncDecl(func) => seen.push(format!("func {}", func.name.name)),
                _ => {}
            }
            true
        });
        assert_eq!(seen, vec!["type A", "func Run", "type inner", "type B"]);
    }

    #[test]
    fn test_identifiers_in_walk_order() {
        let file = parse("package game\nfunc (p *vm.Player) Run(t T) Object { return nil }\n");
        let mut idents = Vec::new();
        inspect(&file, |node| {
            if let Node::Ident(ident) = node {
                idents.push(ident.name.clone());
            }
            true
        });
        assert_eq!(
            idents,
            vec!["game", "p", "vm", "Player", "Run", "t", "T", "Object"]
        );
    }

    #[test]
    fn test_false_prunes_children() {
        let file = parse("package game\nfunc (p *Player) Run(t T) Object { return nil }\n");
        let mut idents = 0;
        inspect(&file, |node| match node {
            Node::FuncDecl(_) => false,
            Node::Ident(_) => {
                idents += 1;
                true
            }
            _ => true,
        });
        // only the package name is reachable
        assert_eq!(idents, 1);
    }
}
