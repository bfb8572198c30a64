//! Lowers a tree-sitter Go syntax tree into [`crate::ast`].

use binder_core::{SourceUnit, Span};
use derive_more::{Display, Error};
use tree_sitter::{Node, Parser};

use crate::ast::*;

/// Error type for Go source parsing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display, Error)]
pub enum ParseError {
    #[display("failed to load the Go grammar: {_0}")]
    Language(#[error(not(source))] String),
    #[display("tree-sitter produced no syntax tree")]
    NoTree,
    #[display("syntax error on line {line}: {message}")]
    Syntax {
        message: String,
        line: usize,
        span: Span,
    },
    #[display("source file has no package clause")]
    MissingPackage,
    #[display("`{kind}` node has no `{field}` child")]
    MissingField {
        kind: &'static str,
        field: &'static str,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Syntax { span, .. } | ParseError::MissingField { span, .. } => Some(*span),
            _ => None,
        }
    }
}

pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|err| ParseError::Language(err.to_string()))?;
        Ok(GoParser { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<File, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();
        check_syntax(root)?;
        Lowering { source }.file(root)
    }
}

#[salsa::tracked(returns(ref))]
pub fn parse_source_unit(db: &dyn salsa::Database, unit: SourceUnit) -> Result<File, ParseError> {
    let mut parser = GoParser::new()?;
    let file = parser.parse(unit.text(db));
    match &file {
        Ok(file) => tracing::debug!(
            path = %unit.path(db).display(),
            package = %file.package.name,
            decls = file.decls.len(),
            "parsed source unit"
        ),
        Err(err) => tracing::debug!(path = %unit.path(db).display(), %err, "parse failed"),
    }
    file
}

fn span_of(node: Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// Fails on the first ERROR or MISSING node, in source order.
fn check_syntax(root: Node) -> Result<(), ParseError> {
    if !root.has_error() {
        return Ok(());
    }
    let node = first_error(root).unwrap_or(root);
    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        "unexpected input".to_string()
    };
    Err(ParseError::Syntax {
        message,
        line: node.start_position().row + 1,
        span: span_of(node),
    })
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

struct Lowering<'src> {
    source: &'src str,
}

impl Lowering<'_> {
    fn text(&self, node: Node) -> &str {
        &self.source[node.byte_range()]
    }

    fn ident(&self, node: Node) -> Ident {
        Ident::new(self.text(node), span_of(node))
    }

    fn child<'t>(&self, node: Node<'t>, field: &'static str) -> Result<Node<'t>, ParseError> {
        node.child_by_field_name(field)
            .ok_or_else(|| ParseError::MissingField {
                kind: node.kind(),
                field,
                span: span_of(node),
            })
    }

    fn file(&self, root: Node) -> Result<File, ParseError> {
        let mut package = None;
        let mut imports = Vec::new();
        let mut decls = Vec::new();
        let mut cursor = root.walk();

        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => package = self.package_clause(child),
                "import_declaration" => self.import_declaration(child, &mut imports),
                "type_declaration" => {
                    decls.extend(self.type_declaration(child)?.into_iter().map(Decl::Type));
                }
                "function_declaration" | "method_declaration" => {
                    decls.push(Decl::Func(self.func_decl(child)?));
                }
                // var/const declarations and comments carry nothing we bind
                _ => {}
            }
        }

        Ok(File {
            package: package.ok_or(ParseError::MissingPackage)?,
            imports,
            decls,
            span: span_of(root),
        })
    }

    fn package_clause(&self, node: Node) -> Option<Ident> {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|child| child.kind() == "package_identifier")?;
        Some(self.ident(name))
    }

    fn import_declaration(&self, node: Node, out: &mut Vec<ImportSpec>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => out.extend(self.import_spec(child)),
                "import_spec_list" => self.import_declaration(child, out),
                _ => {}
            }
        }
    }

    fn import_spec(&self, node: Node) -> Option<ImportSpec> {
        let path = node.child_by_field_name("path")?;
        // strip the quotes of "path" or `path`
        let quoted = self.text(path);
        let unquoted = quoted.get(1..quoted.len().saturating_sub(1)).unwrap_or_default();
        Some(ImportSpec {
            name: node.child_by_field_name("name").map(|name| self.ident(name)),
            path: unquoted.to_string(),
            span: span_of(node),
        })
    }

    fn type_declaration(&self, node: Node) -> Result<Vec<TypeSpec>, ParseError> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| matches!(child.kind(), "type_spec" | "type_alias"))
            .map(|spec| self.type_spec(spec))
            .collect()
    }

    fn type_spec(&self, node: Node) -> Result<TypeSpec, ParseError> {
        let name = self.child(node, "name")?;
        let ty = self.child(node, "type")?;
        Ok(TypeSpec {
            name: self.ident(name),
            ty: self.type_expr(ty),
            span: span_of(node),
        })
    }

    fn func_decl(&self, node: Node) -> Result<FuncDecl, ParseError> {
        let recv = node
            .child_by_field_name("receiver")
            .map(|recv| self.field_list(recv))
            .transpose()?;
        let name = self.ident(self.child(node, "name")?);
        let params = self.field_list(self.child(node, "parameters")?)?;
        let results = node
            .child_by_field_name("result")
            .map(|result| self.results(result))
            .transpose()?;
        let body = node
            .child_by_field_name("body")
            .map(|body| self.block(body))
            .transpose()?;

        Ok(FuncDecl {
            recv,
            name,
            ty: FuncType { params, results },
            body,
            span: span_of(node),
        })
    }

    /// `T` and `(T)`/`(a, b T)` both become a field list.
    fn results(&self, node: Node) -> Result<FieldList, ParseError> {
        if node.kind() == "parameter_list" {
            return self.field_list(node);
        }
        Ok(FieldList {
            fields: vec![Field {
                names: Vec::new(),
                ty: self.type_expr(node),
                span: span_of(node),
            }],
            span: span_of(node),
        })
    }

    fn field_list(&self, node: Node) -> Result<FieldList, ParseError> {
        let mut cursor = node.walk();
        let fields = node
            .named_children(&mut cursor)
            .filter(|child| {
                matches!(
                    child.kind(),
                    "parameter_declaration" | "variadic_parameter_declaration"
                )
            })
            .map(|decl| self.field(decl))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FieldList {
            fields,
            span: span_of(node),
        })
    }

    fn field(&self, node: Node) -> Result<Field, ParseError> {
        let mut cursor = node.walk();
        let names = node
            .children_by_field_name("name", &mut cursor)
            .map(|name| self.ident(name))
            .collect();
        let ty_node = self.child(node, "type")?;
        let ty = if node.kind() == "variadic_parameter_declaration" {
            let start = node
                .child_by_field_name("name")
                .map_or(node.start_byte(), |name| name.end_byte());
            let span = Span::new(start, ty_node.end_byte());
            Expr::Unsupported(UnsupportedExpr {
                kind: "ellipsis".to_string(),
                text: self.source[span.start..span.end].trim().to_string(),
                span,
            })
        } else {
            self.type_expr(ty_node)
        };
        Ok(Field {
            names,
            ty,
            span: span_of(node),
        })
    }

    fn type_expr(&self, node: Node) -> Expr {
        let span = span_of(node);
        match node.kind() {
            "type_identifier" | "identifier" => Expr::Ident(self.ident(node)),
            "pointer_type" => match node.named_child(0) {
                Some(inner) => Expr::Star(StarExpr {
                    x: Box::new(self.type_expr(inner)),
                    span,
                }),
                None => self.unsupported(node),
            },
            "qualified_type" => {
                match (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(package), Some(name)) => Expr::Selector(SelectorExpr {
                        x: Box::new(Expr::Ident(self.ident(package))),
                        sel: self.ident(name),
                        span,
                    }),
                    _ => self.unsupported(node),
                }
            }
            "generic_type" => match node.child_by_field_name("type") {
                Some(base) => Expr::Generic(GenericExpr {
                    x: Box::new(self.type_expr(base)),
                    text: self.text(node).to_string(),
                    span,
                }),
                None => self.unsupported(node),
            },
            "parenthesized_type" => match node.named_child(0) {
                Some(inner) => self.type_expr(inner),
                None => self.unsupported(node),
            },
            _ => self.unsupported(node),
        }
    }

    fn unsupported(&self, node: Node) -> Expr {
        Expr::Unsupported(UnsupportedExpr {
            kind: node.kind().to_string(),
            text: self.text(node).to_string(),
            span: span_of(node),
        })
    }

    fn block(&self, node: Node) -> Result<Block, ParseError> {
        let mut types = Vec::new();
        self.local_types(node, &mut types)?;
        Ok(Block {
            types,
            span: span_of(node),
        })
    }

    fn local_types(&self, node: Node, out: &mut Vec<TypeSpec>) -> Result<(), ParseError> {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "type_declaration" {
                out.extend(self.type_declaration(child)?);
            } else {
                self.local_types(child, out)?;
            }
        }
        Ok(())
    }
}
