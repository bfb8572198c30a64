//! Assembles the generated Go file for one binding.

use binder_ast::File;
use binder_codegen::File as GoFile;

use crate::adapter::AdapterGenerator;
use crate::binding::Binding;
use crate::config::GeneratorConfig;
use crate::error::BinderResult;
use crate::registration::registration;

pub const GENERATED_HEADER: &str = "Code generated by binder. DO NOT EDIT.";

/// Registration first, then the shared receiver, then every adapter.
pub fn emit_bindings(
    binding: &Binding<'_>,
    file: &File,
    config: &GeneratorConfig,
) -> BinderResult<GoFile> {
    let package = file.package.name.as_str();
    let adapters = AdapterGenerator::new(binding, file, config);

    let mut out = GoFile::new(package);
    out.header_comment(GENERATED_HEADER);
    out.push(registration(binding, package, config)?);
    if let Some(shared) = adapters.static_receiver() {
        out.push(shared);
    }
    for adapter in adapters.adapters()? {
        out.push(adapter);
    }
    Ok(out)
}
