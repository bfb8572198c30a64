//! The binding model: which methods of which type get exposed to the VM.

use std::collections::BTreeMap;
use std::collections::btree_map;

use binder_ast::{Field, FuncDecl, Ident};
use binder_core::Span;
use derive_more::Display;

use crate::resolve::TypeName;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum MethodKind {
    #[display("class")]
    Class,
    #[display("instance")]
    Instance,
}

/// A qualifying method declaration, borrowed from the parsed file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodDecl<'ast> {
    decl: &'ast FuncDecl,
    receiver: &'ast Field,
}

impl<'ast> MethodDecl<'ast> {
    /// `None` for plain functions.
    pub fn new(decl: &'ast FuncDecl) -> Option<Self> {
        decl
            .receiver()
            .map(|receiver| MethodDecl { decl, receiver })
    }

    pub fn name(&self) -> &'ast str {
        &self.decl.name.name
    }

    pub fn span(&self) -> Span {
        self.decl.span
    }

    pub fn receiver(&self) -> &'ast Field {
        self.receiver
    }

    /// A receiver that binds an identifier (even `_`) makes an instance method.
    pub fn has_bound_receiver(&self) -> bool {
        !self.receiver().names.is_empty()
    }

    pub fn kind(&self) -> MethodKind {
        if self.has_bound_receiver() {
            MethodKind::Instance
        } else {
            MethodKind::Class
        }
    }

    pub fn param_count(&self) -> usize {
        self.decl.ty.params.num_fields()
    }

    /// Arguments a caller must pass; the first parameter is the thread.
    /// `None` when the method has no parameters at all.
    pub fn arity(&self) -> Option<usize> {
        self.param_count().checked_sub(1)
    }

    /// Parameters after the thread, one per declared position.
    pub fn user_params(&self) -> impl Iterator<Item = (Option<&'ast Ident>, &'ast Field)> + 'ast {
        self.decl.ty.params.entries().skip(1)
    }
}

/// A type and the methods it exposes, in discovery order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding<'ast> {
    pub class_name: TypeName,
    pub class_methods: Vec<MethodDecl<'ast>>,
    pub instance_methods: Vec<MethodDecl<'ast>>,
}

impl<'ast> Binding<'ast> {
    pub fn new(class_name: TypeName) -> Self {
        Binding {
            class_name,
            class_methods: Vec::new(),
            instance_methods: Vec::new(),
        }
    }

    pub fn push(&mut self, method: MethodDecl<'ast>) {
        match method.kind() {
            MethodKind::Class => self.class_methods.push(method),
            MethodKind::Instance => self.instance_methods.push(method),
        }
    }

    /// Class methods first, then instance methods.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl<'ast>> {
        self.class_methods.iter().chain(&self.instance_methods)
    }

    pub fn is_empty(&self) -> bool {
        self.class_methods.is_empty() && self.instance_methods.is_empty()
    }

    /// Name of the shared receiver used by class-method adapters.
    pub fn static_name(&self) -> String {
        format!("static{}", self.class_name)
    }

    pub fn adapter_name(&self, method: &str) -> String {
        format!("binding{}{}", self.class_name, method)
    }
}

/// Every binding found in one file, keyed by type name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingTable<'ast> {
    bindings: BTreeMap<TypeName, Binding<'ast>>,
}

impl<'ast> BindingTable<'ast> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the binding for `name`. An existing binding keeps its
    /// methods.
    pub fn declare_type(&mut self, name: TypeName) -> &mut Binding<'ast> {
        match self.bindings.entry(name) {
            btree_map::Entry::Occupied(entry) => entry.into_mut(),
            btree_map::Entry::Vacant(entry) => {
                tracing::trace!(class = %entry.key(), "binding created");
                let binding = Binding::new(entry.key().clone());
                entry.insert(binding)
            }
        }
    }

    pub fn record(&mut self, owner: TypeName, method: MethodDecl<'ast>) {
        self.declare_type(owner).push(method);
    }

    pub fn get(&self, name: &str) -> Option<&Binding<'ast>> {
        self.bindings.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding<'ast>> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binder_ast::GoParser;

    const SOURCE: &str = r#"package game

func (p *Player) Attack(t *vm.Thread, target *Player) Object { return nil }
func (*Player) New(t *vm.Thread) Object { return nil }
func (_ Player) Blank() Object { return nil }
func helper() {}
"#;

    #[test]
    fn test_method_shape() {
        let file = GoParser::new().unwrap().parse(SOURCE).unwrap();
        let methods: Vec<_> = file
            .decls
            .iter()
            .filter_map(|decl| match decl {
                binder_ast::Decl::Func(func) => Some(func),
                _ => None,
            })
            .map(|func| MethodDecl::new(func))
            .collect();

        assert!(methods[3].is_none());

        let attack = methods[0].unwrap();
        assert_eq!(attack.name(), "Attack");
        assert_eq!(attack.kind(), MethodKind::Instance);
        assert_eq!(attack.arity(), Some(1));
        assert_eq!(attack.user_params().count(), 1);

        let new = methods[1].unwrap();
        assert_eq!(new.kind(), MethodKind::Class);
        assert_eq!(new.arity(), Some(0));

        let blank = methods[2].unwrap();
        assert_eq!(blank.kind(), MethodKind::Instance);
        assert_eq!(blank.arity(), None);
    }

    #[test]
    fn test_binding_names() {
        let binding = Binding::new(TypeName::from("Player"));
        assert_eq!(binding.static_name(), "staticPlayer");
        assert_eq!(binding.adapter_name("SetHealth"), "bindingPlayerSetHealth");
        assert!(binding.is_empty());
    }

    #[test]
    fn test_declare_type_keeps_methods() {
        let file = GoParser::new().unwrap().parse(SOURCE).unwrap();
        let attack = file.methods().next().and_then(MethodDecl::new).unwrap();

        let mut table = BindingTable::new();
        table.record(TypeName::from("Player"), attack);
        table.declare_type(TypeName::from("Player"));

        let binding = table.get("Player").unwrap();
        assert_eq!(binding.instance_methods.len(), 1);
        assert_eq!(table.len(), 1);
    }
}
