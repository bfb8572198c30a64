//! End-to-end generation for one source file.
//!
//! ```text
//! SourceUnit
//!     │
//!     ▼
//! parse_source_unit ─► File (go/ast-shaped tree)
//!     │
//!     ▼
//! classify ─► BindingTable
//!     │
//!     ▼
//! emit_bindings ─► binder_codegen::File ─► Go source text
//! ```
//!
//! Parsing is a salsa query, so running several commands against the same
//! database parses each file once.

use std::fmt;
use std::io::Write;
use std::path::Path;

use binder_ast::{File, parse_source_unit};
use binder_core::SourceUnit;
use tempfile::NamedTempFile;

use crate::binding::{Binding, BindingTable, MethodDecl};
use crate::classify::classify;
use crate::config::GeneratorConfig;
use crate::emit::emit_bindings;
use crate::error::{BinderError, BinderResult};
use crate::naming::external_name;
use crate::resolve::TypeName;

/// Rendered bindings for one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub class_name: TypeName,
    pub package: String,
    pub source: String,
}

pub fn load_unit(db: &dyn salsa::Database, path: &Path) -> BinderResult<SourceUnit> {
    SourceUnit::load(db, path).map_err(|err| BinderError::io(path, err))
}

fn parsed(db: &dyn salsa::Database, unit: SourceUnit) -> BinderResult<&File> {
    parse_source_unit(db, unit)
        .as_ref()
        .map_err(|err| err.clone().into())
}

/// Every binding declared in `unit`.
pub fn bindings_for<'db>(
    db: &'db dyn salsa::Database,
    unit: SourceUnit,
    config: &GeneratorConfig,
) -> BinderResult<BindingTable<'db>> {
    classify(parsed(db, unit)?, &config.marker_type)
}

/// Generate the bindings of `type_name`. Nothing is written.
pub fn generate(
    db: &dyn salsa::Database,
    unit: SourceUnit,
    type_name: &str,
    config: &GeneratorConfig,
) -> BinderResult<GeneratedUnit> {
    let file = parsed(db, unit)?;
    let table = classify(file, &config.marker_type)?;
    let binding = table
        .get(type_name)
        .ok_or_else(|| BinderError::unknown_type(type_name))?;

    let source = emit_bindings(binding, file, config)?.render();
    tracing::debug!(
        class = %binding.class_name,
        class_methods = binding.class_methods.len(),
        instance_methods = binding.instance_methods.len(),
        "bindings generated"
    );
    Ok(GeneratedUnit {
        class_name: binding.class_name.clone(),
        package: file.package.name.clone(),
        source,
    })
}

/// Generate and write the bindings of `type_name` to `out`. On any error the
/// file at `out` is left untouched.
pub fn generate_to_path(
    db: &dyn salsa::Database,
    unit: SourceUnit,
    type_name: &str,
    out: &Path,
    config: &GeneratorConfig,
) -> BinderResult<GeneratedUnit> {
    let generated = generate(db, unit, type_name, config)?;
    write_unit(out, &generated.source)?;
    tracing::info!(path = %out.display(), class = %generated.class_name, "wrote bindings");
    Ok(generated)
}

/// Replace `path` with `source` in one step.
pub fn write_unit(path: &Path, source: &str) -> BinderResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|err| BinderError::write(path, err))?;
    tmp.write_all(source.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|err| BinderError::write(path, err))?;
    tmp.persist(path)
        .map_err(|err| BinderError::write(path, err.error))?;
    Ok(())
}

/// Human-readable view of a binding, as printed by `binder list`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingSummary {
    pub class_name: TypeName,
    /// `(method, external name)`
    pub class_methods: Vec<(String, String)>,
    pub instance_methods: Vec<(String, String)>,
}

impl BindingSummary {
    pub fn of(binding: &Binding<'_>) -> Self {
        fn entries(methods: &[MethodDecl<'_>]) -> Vec<(String, String)> {
            methods
                .iter()
                .map(|method| (method.name().to_string(), external_name(method.name())))
                .collect()
        }
        BindingSummary {
            class_name: binding.class_name.clone(),
            class_methods: entries(&binding.class_methods),
            instance_methods: entries(&binding.instance_methods),
        }
    }
}

impl fmt::Display for BindingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.class_name)?;
        for (label, methods) in [("class", &self.class_methods), ("instance", &self.instance_methods)] {
            for (method, external) in methods {
                writeln!(f, "  {label:<8} {external} -> {method}")?;
            }
        }
        Ok(())
    }
}

pub fn describe(
    db: &dyn salsa::Database,
    unit: SourceUnit,
    config: &GeneratorConfig,
) -> BinderResult<Vec<BindingSummary>> {
    let table = bindings_for(db, unit, config)?;
    Ok(table.iter().map(BindingSummary::of).collect())
}
