//! Error types for binding generation

use std::path::PathBuf;

use binder_ast::ParseError;
use binder_core::Span;
use derive_more::Display;

use crate::resolve::{ResolveError, TypeName};

pub type BinderResult<T> = Result<T, BinderError>;

#[derive(Display, Debug)]
#[display("{kind}")]
pub struct BinderError {
    kind: Box<BinderErrorKind>,
}

impl<E> From<E> for BinderError
where
    BinderErrorKind: From<E>,
{
    fn from(error: E) -> Self {
        BinderError {
            kind: Box::new(BinderErrorKind::from(error)),
        }
    }
}

impl BinderError {
    pub fn kind(&self) -> &BinderErrorKind {
        &self.kind
    }

    /// Source location the error points at, when there is one.
    pub fn span(&self) -> Option<Span> {
        match &*self.kind {
            BinderErrorKind::Parse(err) => err.span(),
            BinderErrorKind::UnresolvedReceiver { cause, .. }
            | BinderErrorKind::UnresolvedType { cause, .. } => Some(cause.span),
            BinderErrorKind::MissingContextParameter { span, .. }
            | BinderErrorKind::UnsupportedReceiver { span, .. }
            | BinderErrorKind::DuplicateExternalName { span, .. } => Some(*span),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BinderErrorKind::Io {
            path: path.into(),
            source,
        }
        .into()
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BinderErrorKind::Write {
            path: path.into(),
            source,
        }
        .into()
    }

    pub(crate) fn unknown_type(name: &str) -> Self {
        BinderErrorKind::UnknownType(name.to_string()).into()
    }

    pub(crate) fn unresolved_receiver(method: &str, cause: ResolveError) -> Self {
        BinderErrorKind::UnresolvedReceiver {
            method: method.to_string(),
            cause,
        }
        .into()
    }

    pub(crate) fn unresolved_type(
        class: &TypeName,
        method: &str,
        position: usize,
        cause: ResolveError,
    ) -> Self {
        BinderErrorKind::UnresolvedType {
            class: class.clone(),
            method: method.to_string(),
            position,
            cause,
        }
        .into()
    }

    pub(crate) fn missing_context_parameter(class: &TypeName, method: &str, span: Span) -> Self {
        BinderErrorKind::MissingContextParameter {
            class: class.clone(),
            method: method.to_string(),
            span,
        }
        .into()
    }

    pub(crate) fn unsupported_receiver(
        class: &TypeName,
        method: &str,
        reason: &'static str,
        span: Span,
    ) -> Self {
        BinderErrorKind::UnsupportedReceiver {
            class: class.clone(),
            method: method.to_string(),
            reason,
            span,
        }
        .into()
    }

    pub(crate) fn duplicate_external_name(
        class: &TypeName,
        name: String,
        methods: (&str, &str),
        span: Span,
    ) -> Self {
        BinderErrorKind::DuplicateExternalName {
            class: class.clone(),
            name,
            first: methods.0.to_string(),
            second: methods.1.to_string(),
            span,
        }
        .into()
    }
}

#[derive(Display, Debug)]
pub enum BinderErrorKind {
    #[display("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[display("{_0}")]
    Parse(ParseError),

    #[display("unknown type {_0}")]
    UnknownType(String),

    #[display("cannot resolve the receiver of method {method}: {cause}")]
    UnresolvedReceiver { method: String, cause: ResolveError },

    #[display("cannot resolve argument {position} of {class}.{method}: {cause}")]
    UnresolvedType {
        class: TypeName,
        method: String,
        position: usize,
        cause: ResolveError,
    },

    #[display("{class}.{method} must take the thread as its first parameter")]
    MissingContextParameter {
        class: TypeName,
        method: String,
        span: Span,
    },

    #[display("cannot bind {class}.{method}: {reason}")]
    UnsupportedReceiver {
        class: TypeName,
        method: String,
        reason: &'static str,
        span: Span,
    },

    #[display("{class}.{first} and {class}.{second} are both registered as \"{name}\"")]
    DuplicateExternalName {
        class: TypeName,
        name: String,
        first: String,
        second: String,
        span: Span,
    },

    #[display("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<ParseError> for BinderErrorKind {
    fn from(error: ParseError) -> Self {
        BinderErrorKind::Parse(error)
    }
}

impl std::error::Error for BinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.kind {
            BinderErrorKind::Io { source, .. } | BinderErrorKind::Write { source, .. } => {
                Some(source)
            }
            BinderErrorKind::Parse(err) => Some(err),
            BinderErrorKind::UnresolvedReceiver { cause, .. }
            | BinderErrorKind::UnresolvedType { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = BinderError::unknown_type("Ghost");
        assert_eq!(err.to_string(), "unknown type Ghost");
        assert!(err.span().is_none());

        let err = BinderError::missing_context_parameter(
            &TypeName::from("Player"),
            "New",
            Span::new(4, 10),
        );
        assert_eq!(
            err.to_string(),
            "Player.New must take the thread as its first parameter"
        );
        assert_eq!(err.span(), Some(Span::new(4, 10)));
    }

    #[test]
    fn test_parse_errors_convert() {
        let err: BinderError = ParseError::MissingPackage.into();
        assert!(matches!(err.kind(), BinderErrorKind::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
