//! The `init` block registering a class and its method tables with the VM.

use std::collections::HashMap;

use binder_codegen::{Expr, Function, Stmt, Type, ident, lit, map_lit, qual};

use crate::binding::{Binding, MethodDecl};
use crate::config::GeneratorConfig;
use crate::error::{BinderError, BinderResult};
use crate::naming::external_name;

/// ```go
/// func init() {
///     vm.RegisterExternalClass(
///         "game",
///         vm.ExternalClass(
///             "Player",
///             "game.gb",
///             map[string]vm.Method{...},
///             map[string]vm.Method{...},
///         ),
///     )
/// }
/// ```
pub fn registration(
    binding: &Binding<'_>,
    package: &str,
    config: &GeneratorConfig,
) -> BinderResult<Function> {
    let vm = config.vm_package.as_str();
    let class_table = method_table(binding, &binding.class_methods, config)?;
    let instance_table = method_table(binding, &binding.instance_methods, config)?;

    let class = qual(vm, "ExternalClass").call_lines([
        lit(binding.class_name.as_str()),
        lit(config.resource_name(package)),
        class_table,
        instance_table,
    ]);
    let register = qual(vm, "RegisterExternalClass").call_lines([lit(package), class]);

    Ok(Function::new("init").body([Stmt::Expr(register)]))
}

/// External name to adapter, for one kind of method.
fn method_table(
    binding: &Binding<'_>,
    methods: &[MethodDecl<'_>],
    config: &GeneratorConfig,
) -> BinderResult<Expr> {
    let mut seen: HashMap<String, &MethodDecl<'_>> = HashMap::new();
    let mut entries = Vec::with_capacity(methods.len());
    for method in methods {
        let name = external_name(method.name());
        if let Some(first) = seen.insert(name.clone(), method) {
            return Err(BinderError::duplicate_external_name(
                &binding.class_name,
                name,
                (first.name(), method.name()),
                method.span(),
            ));
        }
        entries.push((lit(name), ident(binding.adapter_name(method.name()))));
    }

    let ty = Type::map(Type::named("string"), config.vm_type("Method"));
    Ok(map_lit(ty, entries))
}
