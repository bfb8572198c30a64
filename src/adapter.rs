//! Adapter functions: the VM calling convention on one side, the Go method
//! on the other.
//!
//! Every adapter has the signature
//!
//! ```go
//! func bindingPlayerAttack(receiver vm.Object, line int, t *vm.Thread, args []vm.Object) vm.Object
//! ```
//!
//! and checks, in order, the receiver, the argument count and each argument's
//! type before delegating to the method.

use binder_ast::{Expr as TypeExpr, File};
use binder_codegen::{Function, Stmt, Type, Var, ident, int, len, lit, new_of, nil, not, qual};

use crate::binding::{Binding, MethodDecl, MethodKind};
use crate::config::GeneratorConfig;
use crate::error::{BinderError, BinderResult};
use crate::resolve::{ResolveError, TypeName, type_name};

const RECEIVER: &str = "receiver";
const LINE: &str = "line";
const THREAD: &str = "t";
const ARGS: &str = "args";
const SELF: &str = "r";
const OK: &str = "ok";

/// What can go wrong when the VM calls an adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdapterFailure {
    /// The receiver is not a `*Class`.
    Receiver,
    /// The script passed the wrong number of arguments.
    ArgumentCount { expected: usize },
    /// Argument `position` is not of the declared type.
    ArgumentType { position: usize, expected: TypeName },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Hand an error object back to the script.
    ReturnError,
    /// Abort the call; the binding itself is broken.
    Abort,
}

impl AdapterFailure {
    pub fn recovery(&self) -> Recovery {
        match self {
            AdapterFailure::ArgumentCount { .. } => Recovery::ReturnError,
            AdapterFailure::Receiver | AdapterFailure::ArgumentType { .. } => Recovery::Abort,
        }
    }
}

pub struct AdapterGenerator<'a, 'ast> {
    binding: &'a Binding<'ast>,
    file: &'ast File,
    config: &'a GeneratorConfig,
}

impl<'a, 'ast> AdapterGenerator<'a, 'ast> {
    pub fn new(binding: &'a Binding<'ast>, file: &'ast File, config: &'a GeneratorConfig) -> Self {
        Self {
            binding,
            file,
            config,
        }
    }

    /// One adapter per method, class methods first.
    pub fn adapters(&self) -> BinderResult<Vec<Function>> {
        self.binding
            .methods()
            .map(|method| self.adapter(method))
            .collect()
    }

    /// Receiver shared by all class-method adapters. `None` when the binding
    /// has no class methods.
    pub fn static_receiver(&self) -> Option<Var> {
        if self.binding.class_methods.is_empty() {
            return None;
        }
        let name = self.binding.static_name();
        let class = &self.binding.class_name;
        Some(
            Var::new(&name)
                .doc(format!("{name} is the receiver shared by every class method of {class}."))
                .doc("It is created on first use without locking, so the host runtime must")
                .doc("serialize calls into these adapters.")
                .ty(self.class_type().pointer()),
        )
    }

    pub fn adapter(&self, method: &MethodDecl<'ast>) -> BinderResult<Function> {
        let class = &self.binding.class_name;
        self.check_receiver(method)?;
        let arity = method.arity().ok_or_else(|| {
            BinderError::missing_context_parameter(class, method.name(), method.span())
        })?;

        let mut body = match method.kind() {
            MethodKind::Class => self.static_self(),
            MethodKind::Instance => self.asserted_self(),
        };

        body.push(Stmt::if_then(
            len(ident(ARGS)).not_equal(int(arity)),
            [self.on_failure(AdapterFailure::ArgumentCount { expected: arity })],
        ));

        let mut call_args = vec![ident(THREAD)];
        for (position, (_, field)) in method.user_params().enumerate() {
            let (expected, ty) = type_name(&field.ty)
                .and_then(|name| self.go_type(&field.ty).map(|ty| (name, ty)))
                .map_err(|cause| {
                    BinderError::unresolved_type(class, method.name(), position, cause)
                })?;

            let arg = format!("arg{position}");
            body.push(Stmt::define(
                [arg.as_str(), OK],
                ident(ARGS).index(int(position)).assert(ty),
            ));
            body.push(Stmt::if_then(
                not(ident(OK)),
                [self.on_failure(AdapterFailure::ArgumentType { position, expected })],
            ));
            call_args.push(ident(arg));
        }

        body.push(Stmt::ret(ident(SELF).dot(method.name()).call(call_args)));

        tracing::trace!(class = %class, method = method.name(), arity, "adapter generated");
        Ok(self.signature(self.binding.adapter_name(method.name())).body(body))
    }

    /// Only plain local types can be asserted and instantiated by name.
    fn check_receiver(&self, method: &MethodDecl<'ast>) -> BinderResult<()> {
        let ty = match &method.receiver().ty {
            TypeExpr::Star(star) => &*star.x,
            other => other,
        };
        let reason = match ty {
            TypeExpr::Generic(_) => "its receiver type is generic",
            TypeExpr::Selector(_) => "its receiver type belongs to another package",
            _ => return Ok(()),
        };
        Err(BinderError::unsupported_receiver(
            &self.binding.class_name,
            method.name(),
            reason,
            ty.span(),
        ))
    }

    fn signature(&self, name: String) -> Function {
        let object = self.config.vm_type("Object");
        Function::new(name)
            .param(RECEIVER, object.clone())
            .param(LINE, Type::named("int"))
            .param(THREAD, self.config.vm_type("Thread").pointer())
            .param(ARGS, object.clone().slice())
            .result(object)
    }

    fn class_type(&self) -> Type {
        Type::named(self.binding.class_name.as_str())
    }

    /// `if staticX == nil { staticX = new(X) }; r := staticX`
    fn static_self(&self) -> Vec<Stmt> {
        let shared = ident(self.binding.static_name());
        vec![
            Stmt::if_then(
                shared.clone().equal(nil()),
                [Stmt::assign(shared.clone(), new_of(self.class_type()))],
            ),
            Stmt::define([SELF], shared),
        ]
    }

    /// `r, ok := receiver.(*X)`
    fn asserted_self(&self) -> Vec<Stmt> {
        vec![
            Stmt::define([SELF, OK], ident(RECEIVER).assert(self.class_type().pointer())),
            Stmt::if_then(not(ident(OK)), [self.on_failure(AdapterFailure::Receiver)]),
        ]
    }

    fn on_failure(&self, failure: AdapterFailure) -> Stmt {
        let errors = self.config.errors_package.as_str();
        let value = match &failure {
            AdapterFailure::Receiver => qual("fmt", "Sprintf").call([
                lit(format!(
                    "Impossible receiver type. Wanted {} got %s",
                    self.binding.class_name
                )),
                ident(RECEIVER),
            ]),
            AdapterFailure::ArgumentCount { expected } => ident(THREAD)
                .dot("VM")
                .call([])
                .dot("InitErrorObject")
                .call([
                    qual(errors, "ArgumentError"),
                    ident(LINE),
                    qual(errors, "WrongNumberOfArgumentFormat"),
                    int(*expected),
                    len(ident(ARGS)),
                ]),
            AdapterFailure::ArgumentType { position, expected } => {
                lit(format!("Argument {position} must be {expected}"))
            }
        };
        match failure.recovery() {
            Recovery::ReturnError => Stmt::ret(value),
            Recovery::Abort => Stmt::panic(value),
        }
    }

    /// Parameter type as it must be written in the generated file. Package
    /// qualifiers are mapped back to the import paths of the input file and
    /// keep the local name the input uses for them.
    fn go_type(&self, expr: &TypeExpr) -> Result<Type, ResolveError> {
        match expr {
            TypeExpr::Star(star) => Ok(self.go_type(&star.x)?.pointer()),
            TypeExpr::Selector(selector) => {
                let import = match &*selector.x {
                    TypeExpr::Ident(qualifier) => self
                        .file
                        .import_for(&qualifier.name)
                        .map(|import| (import, qualifier)),
                    _ => None,
                };
                match import {
                    Some((import, qualifier)) => Ok(Type::qual_as(
                        &import.path,
                        &selector.sel.name,
                        &qualifier.name,
                    )),
                    None => Err(ResolveError {
                        kind: "unimported_package".to_string(),
                        text: type_name(expr)?.to_string(),
                        span: selector.span,
                    }),
                }
            }
            other => Ok(Type::named(type_name(other)?.as_str())),
        }
    }
}
