//! Go source builder.
//!
//! Callers assemble a [`File`] out of the abstract [`code`] tree; printing
//! takes care of indentation, literal quoting and turning qualified references
//! into an import block.
//!
//! ```
//! use binder_codegen::{File, Function, Stmt, Type, qual, lit};
//!
//! let mut file = File::new("game");
//! file.push(
//!     Function::new("hello")
//!         .body([Stmt::Expr(qual("fmt", "Println").call([lit("hi")]))]),
//! );
//! assert_eq!(
//!     file.render(),
//!     "package game\n\nimport \"fmt\"\n\nfunc hello() {\n\tfmt.Println(\"hi\")\n}\n"
//! );
//! ```

use std::fmt;

pub mod code;
pub mod imports;
mod printer;

pub use code::*;
pub use imports::Imports;
pub use printer::quote;

/// One Go source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    package: String,
    header: Vec<String>,
    items: Vec<Item>,
}

impl File {
    pub fn new(package: impl Into<String>) -> Self {
        File {
            package: package.into(),
            header: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Comment line printed above the package clause.
    pub fn header_comment(&mut self, line: impl Into<String>) {
        self.header.push(line.into());
    }

    pub fn push(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    pub fn render(&self) -> String {
        let imports = Imports::collect(&self.items);
        let mut printer = printer::Printer::new(&imports);

        for line in &self.header {
            printer.output.push_str("// ");
            printer.output.push_str(line);
            printer.output.push('\n');
        }
        if !self.header.is_empty() {
            printer.output.push('\n');
        }
        printer.output.push_str("package ");
        printer.output.push_str(&self.package);
        printer.output.push('\n');

        if !imports.is_empty() {
            printer.output.push('\n');
            printer.imports();
        }
        for item in &self.items {
            printer.output.push('\n');
            printer.item(item);
        }
        printer.finish()
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
