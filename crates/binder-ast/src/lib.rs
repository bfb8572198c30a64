//! Go syntax tree consumed by the binding generator.
//!
//! Parsing is delegated to tree-sitter; [`parse_source_unit`] lowers its
//! concrete tree into the declaration-level [`ast`] and memoizes the result
//! per [`binder_core::SourceUnit`].

pub mod ast;
pub mod parser;
pub mod visit;

pub use ast::*;
pub use parser::{GoParser, ParseError, parse_source_unit};
pub use visit::{Node, inspect};
