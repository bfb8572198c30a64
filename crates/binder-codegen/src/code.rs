//! Abstract Go statement and expression tree.
//!
//! Nothing here deals with text. Package-qualified names are kept as
//! `(import path, name)` pairs and resolved to local package names only when
//! the enclosing [`crate::File`] is printed.

use derive_more::{Display, From};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Named(String),
    /// `package` is the local name the caller wants the import to carry;
    /// `None` leaves the choice to [`crate::Imports`].
    Qual {
        path: String,
        name: String,
        package: Option<String>,
    },
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Map(Box<Type>, Box<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(name.into())
    }

    pub fn qual(path: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Qual {
            path: path.into(),
            name: name.into(),
            package: None,
        }
    }

    /// Qualified type whose import must be named `package`.
    pub fn qual_as(
        path: impl Into<String>,
        name: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Type::Qual {
            path: path.into(),
            name: name.into(),
            package: Some(package.into()),
        }
    }

    pub fn pointer(self) -> Self {
        Type::Pointer(Box::new(self))
    }

    pub fn slice(self) -> Self {
        Type::Slice(Box::new(self))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum BinaryOp {
    #[display("==")]
    Eq,
    #[display("!=")]
    Ne,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    Qual {
        path: String,
        name: String,
    },
    Str(String),
    Int(usize),
    Nil,
    Selector {
        x: Box<Expr>,
        name: String,
    },
    /// `multiline` puts every argument on its own line.
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        multiline: bool,
    },
    Index {
        x: Box<Expr>,
        index: Box<Expr>,
    },
    TypeAssert {
        x: Box<Expr>,
        ty: Type,
    },
    Not(Box<Expr>),
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    /// `map[K]V{k: v, ...}`; entries are printed sorted by key.
    MapLit {
        ty: Type,
        entries: Vec<(Expr, Expr)>,
    },
    /// A type in expression position, e.g. the operand of `new`.
    Type(Type),
}

pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Ident(name.into())
}

pub fn qual(path: impl Into<String>, name: impl Into<String>) -> Expr {
    Expr::Qual {
        path: path.into(),
        name: name.into(),
    }
}

pub fn lit(value: impl Into<String>) -> Expr {
    Expr::Str(value.into())
}

pub fn int(value: usize) -> Expr {
    Expr::Int(value)
}

pub fn nil() -> Expr {
    Expr::Nil
}

pub fn not(x: Expr) -> Expr {
    Expr::Not(Box::new(x))
}

/// `new(T)`
pub fn new_of(ty: Type) -> Expr {
    ident("new").call([Expr::Type(ty)])
}

/// `len(x)`
pub fn len(x: Expr) -> Expr {
    ident("len").call([x])
}

pub fn map_lit(ty: Type, entries: impl IntoIterator<Item = (Expr, Expr)>) -> Expr {
    Expr::MapLit {
        ty,
        entries: entries.into_iter().collect(),
    }
}

impl Expr {
    pub fn dot(self, name: impl Into<String>) -> Expr {
        Expr::Selector {
            x: Box::new(self),
            name: name.into(),
        }
    }

    pub fn call(self, args: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Call {
            func: Box::new(self),
            args: args.into_iter().collect(),
            multiline: false,
        }
    }

    pub fn call_lines(self, args: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Call {
            func: Box::new(self),
            args: args.into_iter().collect(),
            multiline: true,
        }
    }

    pub fn index(self, index: Expr) -> Expr {
        Expr::Index {
            x: Box::new(self),
            index: Box::new(index),
        }
    }

    pub fn assert(self, ty: Type) -> Expr {
        Expr::TypeAssert {
            x: Box::new(self),
            ty,
        }
    }

    pub fn equal(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Eq, rhs)
    }

    pub fn not_equal(self, rhs: Expr) -> Expr {
        self.binary(BinaryOp::Ne, rhs)
    }

    fn binary(self, op: BinaryOp, rhs: Expr) -> Expr {
        Expr::Binary {
            lhs: Box::new(self),
            op,
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `a, b := value`
    Define { names: Vec<String>, value: Expr },
    /// `target = value`
    Assign { target: Expr, value: Expr },
    If { cond: Expr, body: Vec<Stmt> },
    Return(Expr),
    Expr(Expr),
}

impl Stmt {
    pub fn define<S: Into<String>>(names: impl IntoIterator<Item = S>, value: Expr) -> Stmt {
        Stmt::Define {
            names: names.into_iter().map(Into::into).collect(),
            value,
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Stmt {
        Stmt::Assign { target, value }
    }

    pub fn if_then(cond: Expr, body: impl IntoIterator<Item = Stmt>) -> Stmt {
        Stmt::If {
            cond,
            body: body.into_iter().collect(),
        }
    }

    pub fn ret(value: Expr) -> Stmt {
        Stmt::Return(value)
    }

    /// `panic(value)`
    pub fn panic(value: Expr) -> Stmt {
        Stmt::Expr(ident("panic").call([value]))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Function {
    pub doc: Vec<String>,
    pub name: String,
    pub params: Vec<Param>,
    pub result: Option<Type>,
    pub body: Vec<Stmt>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn result(mut self, ty: Type) -> Self {
        self.result = Some(ty);
        self
    }

    pub fn body(mut self, stmts: impl IntoIterator<Item = Stmt>) -> Self {
        self.body.extend(stmts);
        self
    }
}

/// Package-level `var` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Var {
    pub doc: Vec<String>,
    pub name: String,
    pub ty: Option<Type>,
}

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Var {
            doc: Vec::new(),
            name: name.into(),
            ty: None,
        }
    }

    pub fn doc(mut self, line: impl Into<String>) -> Self {
        self.doc.push(line.into());
        self
    }

    pub fn ty(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, From)]
pub enum Item {
    Func(Function),
    Var(Var),
}
