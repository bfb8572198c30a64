//! Go syntax tree, shaped after the subset of `go/ast` the generator reads.
//!
//! Only declarations matter to binding generation, so function bodies keep
//! nothing but the type declarations nested inside them.

use binder_core::Span;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// A parsed source file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct File {
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
    pub span: Span,
}

impl File {
    /// Method declarations (functions with a receiver), in source order.
    pub fn methods(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) if func.recv.is_some() => Some(func),
            _ => None,
        })
    }

    /// The import a package qualifier such as `vm` in `vm.Thread` refers to.
    pub fn import_for(&self, qualifier: &str) -> Option<&ImportSpec> {
        self.imports
            .iter()
            .find(|import| import.local_name() == Some(qualifier))
    }
}

/// `import name "path"`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImportSpec {
    /// Explicit package name, `.` or `_`.
    pub name: Option<Ident>,
    pub path: String,
    pub span: Span,
}

impl ImportSpec {
    /// Name the file uses to qualify references into this package. Dot and
    /// blank imports have none. Without an explicit name this is the name Go
    /// tooling assumes from the path, which skips a `/vN` major version and
    /// cuts `yaml.v2` down to `yaml`.
    pub fn local_name(&self) -> Option<&str> {
        match &self.name {
            Some(name) if name.name == "." || name.is_blank() => None,
            Some(name) => Some(&name.name),
            None => Some(assumed_package_name(&self.path)).filter(|name| !name.is_empty()),
        }
    }
}

fn assumed_package_name(path: &str) -> &str {
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
    &base[..end]
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Decl {
    /// One spec of a `type` declaration. Grouped declarations are flattened.
    Type(TypeSpec),
    Func(FuncDecl),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeSpec {
    pub name: Ident,
    pub ty: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FuncDecl {
    /// Receiver clause; `None` for plain functions.
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    pub body: Option<Block>,
    pub span: Span,
}

impl FuncDecl {
    /// The single receiver field of a method.
    pub fn receiver(&self) -> Option<&Field> {
        self.recv.as_ref().and_then(|recv| recv.fields.first())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FuncType {
    pub params: FieldList,
    pub results: Option<FieldList>,
}

/// Function body, reduced to the type declarations found anywhere inside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    pub types: Vec<TypeSpec>,
    pub span: Span,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldList {
    pub fields: Vec<Field>,
    pub span: Span,
}

impl FieldList {
    /// Number of declared entries: `(a, b int, string)` has three.
    pub fn num_fields(&self) -> usize {
        self.fields.iter().map(|field| field.names.len().max(1)).sum()
    }

    /// One `(name, type)` entry per declared position. Unnamed fields yield `None`.
    pub fn entries(&self) -> impl Iterator<Item = (Option<&Ident>, &Field)> {
        self.fields.iter().flat_map(|field| {
            let names: Vec<Option<&Ident>> = if field.names.is_empty() {
                vec![None]
            } else {
                field.names.iter().map(Some).collect()
            };
            names.into_iter().map(move |name| (name, field))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub names: Vec<Ident>,
    pub ty: Expr,
    pub span: Span,
}

/// Type expressions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Ident(Ident),
    /// `*X`
    Star(StarExpr),
    /// `pkg.Name`
    Selector(SelectorExpr),
    /// `Name[T]`, an instantiated generic type.
    Generic(GenericExpr),
    /// Any type shape the generator has no name for: slices, maps, function
    /// types, variadic parameters (`kind == "ellipsis"`) and so on.
    Unsupported(UnsupportedExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(ident) => ident.span,
            Expr::Star(star) => star.span,
            Expr::Selector(selector) => selector.span,
            Expr::Generic(generic) => generic.span,
            Expr::Unsupported(other) => other.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StarExpr {
    pub x: Box<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectorExpr {
    pub x: Box<Expr>,
    pub sel: Ident,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericExpr {
    /// The generic type being instantiated.
    pub x: Box<Expr>,
    /// Source text of the whole expression, type arguments included.
    pub text: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnsupportedExpr {
    /// tree-sitter node kind, e.g. `slice_type`.
    pub kind: String,
    pub text: String,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Ident {
        Ident::new(name, Span::default())
    }

    fn field(names: &[&str], ty: &str) -> Field {
        Field {
            names: names.iter().map(|name| ident(name)).collect(),
            ty: Expr::Ident(ident(ty)),
            span: Span::default(),
        }
    }

    #[test]
    fn num_fields_counts_names_and_unnamed_fields() {
        let list = FieldList {
            fields: vec![field(&["a", "b"], "int"), field(&[], "string")],
            span: Span::default(),
        };
        assert_eq!(list.num_fields(), 3);
        let names: Vec<_> = list
            .entries()
            .map(|(name, _)| name.map(|n| n.name.as_str()))
            .collect();
        assert_eq!(names, vec![Some("a"), Some("b"), None]);
    }

    #[test]
    fn import_local_names() {
        let import = |name: Option<&str>, path: &str| ImportSpec {
            name: name.map(ident),
            path: path.to_string(),
            span: Span::default(),
        };
        assert_eq!(
            import(None, "github.com/goby-lang/goby/vm").local_name(),
            Some("vm")
        );
        assert_eq!(import(Some("gvm"), "github.com/x/vm").local_name(), Some("gvm"));
        assert_eq!(import(Some("."), "github.com/x/vm").local_name(), None);
        assert_eq!(import(Some("_"), "github.com/x/vm").local_name(), None);
    }

    #[test]
    fn import_local_names_skip_versions() {
        let import = |path: &str| ImportSpec {
            name: None,
            path: path.to_string(),
            span: Span::default(),
        };
        assert_eq!(import("github.com/acme/geom/v2").local_name(), Some("geom"));
        assert_eq!(import("gopkg.in/yaml.v2").local_name(), Some("yaml"));
        assert_eq!(import("github.com/x/go-yaml").local_name(), Some("yaml"));
        assert_eq!(import("github.com/x/v2fast").local_name(), Some("v2fast"));
    }

    #[test]
    fn blank_identifier() {
        assert!(ident("_").is_blank());
        assert!(!ident("p").is_blank());
    }
}
