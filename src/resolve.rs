//! Turns type expressions into the names bindings are keyed and checked by.

use std::borrow::Borrow;
use std::fmt;

use binder_ast::Expr;
use binder_core::Span;
use derive_more::{Display, Error};

/// A resolved type name such as `Player`, `*Player` or `vm.Thread`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeName(String);

impl TypeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName(name.to_string())
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        TypeName(name)
    }
}

impl PartialEq<str> for TypeName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A type expression with no textual name.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
#[display("unsupported type `{text}` ({kind})")]
pub struct ResolveError {
    pub kind: String,
    pub text: String,
    pub span: Span,
}

/// Name of `expr`, keeping pointer markers: `*Player` stays `*Player`.
pub fn type_name(expr: &Expr) -> Result<TypeName, ResolveError> {
    let mut out = String::new();
    write_name(expr, &mut out)?;
    Ok(TypeName(out))
}

/// Name of `expr` with one level of pointer stripped, as used for receivers
/// and result types.
pub fn bare_type_name(expr: &Expr) -> Result<TypeName, ResolveError> {
    match expr {
        Expr::Star(star) => type_name(&star.x),
        other => type_name(other),
    }
}

/// Name a method's receiver is keyed by: one pointer stripped, and a generic
/// receiver such as `*Box[T]` reduced to `Box`.
pub fn receiver_type_name(expr: &Expr) -> Result<TypeName, ResolveError> {
    let expr = match expr {
        Expr::Star(star) => &*star.x,
        other => other,
    };
    match expr {
        Expr::Generic(generic) => type_name(&generic.x),
        other => type_name(other),
    }
}

fn write_name(expr: &Expr, out: &mut String) -> Result<(), ResolveError> {
    match expr {
        Expr::Ident(ident) => out.push_str(&ident.name),
        Expr::Star(star) => {
            out.push('*');
            write_name(&star.x, out)?;
        }
        Expr::Selector(selector) => {
            write_name(&selector.x, out)?;
            out.push('.');
            out.push_str(&selector.sel.name);
        }
        Expr::Generic(generic) => {
            return Err(ResolveError {
                kind: "generic_type".to_string(),
                text: generic.text.clone(),
                span: generic.span,
            });
        }
        Expr::Unsupported(other) => {
            return Err(ResolveError {
                kind: other.kind.clone(),
                text: other.text.clone(),
                span: other.span,
            });
        }
    }
    Ok(())
}
