//! Shared inputs for the binding generator.
use std::ops::Range;
use std::path::{Path, PathBuf};

use derive_more::Display;

/// A single Go source file handed to the generator.
#[salsa::input(debug)]
pub struct SourceUnit {
    #[returns(ref)]
    pub path: PathBuf,
    #[returns(deref)]
    pub text: String,
}

impl SourceUnit {
    /// Create a SourceUnit from a file path (convenience for CLI/tests).
    pub fn from_path(db: &dyn salsa::Database, path: impl AsRef<Path>, text: String) -> Self {
        Self::new(db, path.as_ref().to_path_buf(), text)
    }

    /// Read a source file from disk.
    pub fn load(db: &dyn salsa::Database, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_path(db, path, text))
    }
}

/// Byte range into a source unit.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
#[display("{start}..{end}")]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[derive(Default, Clone)]
#[salsa::db]
pub struct BinderDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for BinderDatabase {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_unit_keeps_path_and_text() {
        let db = BinderDatabase::default();
        let unit = SourceUnit::from_path(&db, "game/player.go", "package game\n".to_string());
        assert_eq!(unit.path(&db), Path::new("game/player.go"));
        assert_eq!(unit.text(&db), "package game\n");
    }

    #[test]
    fn load_reports_missing_files() {
        let db = BinderDatabase::default();
        assert!(SourceUnit::load(&db, "does/not/exist.go").is_err());
    }

    #[test]
    fn span_converts_to_range() {
        let span = Span::new(3, 9);
        assert_eq!(span.len(), 6);
        assert_eq!(Range::from(span), 3..9);
        assert_eq!(span.to_string(), "3..9");
    }
}
