//! Single pass over a parsed file that builds the [`BindingTable`].

use binder_ast::{File, FuncDecl, Node, inspect};

use crate::binding::{BindingTable, MethodDecl};
use crate::error::{BinderError, BinderResult};
use crate::resolve::{bare_type_name, receiver_type_name};

/// Collect every type declaration and every method returning `marker`.
///
/// Type declarations nested inside function bodies count too. Re-declaring a
/// type never drops methods already recorded for it.
pub fn classify<'ast>(file: &'ast File, marker: &str) -> BinderResult<BindingTable<'ast>> {
    let mut table = BindingTable::new();
    let mut failure = None;

    inspect(file, |node| {
        if failure.is_some() {
            return false;
        }
        match node {
            Node::TypeSpec(spec) => {
                table.declare_type(spec.name.name.as_str().into());
            }
            Node::FuncDecl(func) => {
                if let Err(err) = classify_method(&mut table, func, marker) {
                    failure = Some(err);
                    return false;
                }
            }
            _ => {}
        }
        true
    });

    match failure {
        Some(err) => Err(err),
        None => {
            tracing::debug!(bindings = table.len(), "classified declarations");
            Ok(table)
        }
    }
}

fn classify_method<'ast>(
    table: &mut BindingTable<'ast>,
    func: &'ast FuncDecl,
    marker: &str,
) -> BinderResult<()> {
    let Some(method) = MethodDecl::new(func) else {
        return Ok(());
    };
    if !returns_marker(func, marker) {
        tracing::trace!(method = method.name(), "skipped, does not return {marker}");
        return Ok(());
    }

    let owner = receiver_type_name(&method.receiver().ty)
        .map_err(|cause| BinderError::unresolved_receiver(method.name(), cause))?;
    tracing::debug!(
        class = %owner,
        method = method.name(),
        kind = %method.kind(),
        "method classified"
    );
    table.record(owner, method);
    Ok(())
}

/// Exactly one result, and its name without pointer is `marker`.
pub fn returns_marker(func: &FuncDecl, marker: &str) -> bool {
    let Some(results) = &func.ty.results else {
        return false;
    };
    if results.num_fields() != 1 {
        return false;
    }
    match bare_type_name(&results.fields[0].ty) {
        Ok(name) => name == marker,
        Err(err) => {
            tracing::trace!(method = %func.name.name, "result type not resolved: {err}");
            false
        }
    }
}
