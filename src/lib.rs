//! Generates the glue that exposes Go types to the Goby VM.
//!
//! Given one Go source file, binder finds every method returning the VM's
//! object type, sorts them into class methods (anonymous receiver) and
//! instance methods (named receiver) and emits, for a chosen type, a Go file
//! with one adapter per method plus an `init` block registering the class.

pub mod adapter;
pub mod binding;
pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod registration;
pub mod resolve;

pub use binding::{Binding, BindingTable, MethodDecl, MethodKind};
pub use config::GeneratorConfig;
pub use error::{BinderError, BinderErrorKind, BinderResult};
pub use pipeline::{GeneratedUnit, generate, generate_to_path};
pub use resolve::TypeName;
