//! Error reporting for the binder CLI.

use ariadne::{Color, Label, Report, ReportKind, Source};
use binder::error::{BinderError, BinderErrorKind};

/// Short code shown in the report header.
pub fn error_code(err: &BinderError) -> &'static str {
    match err.kind() {
        BinderErrorKind::Io { .. } => "io",
        BinderErrorKind::Parse(_) => "parse",
        BinderErrorKind::UnknownType(_) => "unknown-type",
        BinderErrorKind::UnresolvedReceiver { .. } => "unresolved-receiver",
        BinderErrorKind::UnresolvedType { .. } => "unresolved-type",
        BinderErrorKind::MissingContextParameter { .. } => "missing-context",
        BinderErrorKind::UnsupportedReceiver { .. } => "unsupported-receiver",
        BinderErrorKind::DuplicateExternalName { .. } => "duplicate-name",
        BinderErrorKind::Write { .. } => "write",
    }
}

/// Normalize a span to ensure end > start (required by ariadne).
pub fn normalize_span(start: usize, end: usize) -> (usize, usize) {
    (start, end.max(start + 1))
}

/// Print `err`, pointing into `source` when the error has a location.
pub fn print_error(err: &BinderError, source: Option<&str>, file_path: &str) {
    let (Some(span), Some(source)) = (err.span(), source) else {
        eprintln!("error[{}]: {err}", error_code(err));
        return;
    };

    let (start, end) = normalize_span(span.start, span.end);
    let message = err.to_string();
    Report::build(ReportKind::Error, (file_path, start..end))
        .with_code(error_code(err))
        .with_message(&message)
        .with_label(
            Label::new((file_path, start..end))
                .with_message(&message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((file_path, Source::from(source)))
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_span() {
        assert_eq!(normalize_span(0, 10), (0, 10));
        assert_eq!(normalize_span(5, 5), (5, 6));
    }
}
