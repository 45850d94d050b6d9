//! Declaration tree handed to the structure visitor.
//!
//! These are closed sum types over the statement and expression kinds the
//! outline cares about. Anything else lowers to an `Other`/`Unsupported`
//! variant so the visitor can skip it explicitly.

/// A statement at module level or inside a class body
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign {
        line: usize,
        targets: Vec<Target>,
    },
    FunctionDef {
        line: usize,
        name: String,
        params: Parameters,
    },
    ClassDef {
        line: usize,
        name: String,
        bases: Vec<Expr>,
        body: Vec<Stmt>,
    },
    /// Imports, control flow, docstrings, ...
    Other { line: usize, kind: String },
}

impl Stmt {
    pub fn line(&self) -> usize {
        match self {
            Stmt::Assign { line, .. }
            | Stmt::FunctionDef { line, .. }
            | Stmt::ClassDef { line, .. }
            | Stmt::Other { line, .. } => *line,
        }
    }
}

/// Left-hand side of an assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// `a = ...`, `self.a = ...`, `a[0] = ...`
    Single(Expr),
    /// `a, b = ...`
    Tuple(Vec<Expr>),
}

/// Constant-ish expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(Number),
    Str(String),
    /// Bare identifier or dotted name (`True`, `None`, `os.path`)
    Name(String),
    List(Vec<Expr>),
    Tuple(Vec<Expr>),
    Dict { keys: Vec<Expr>, values: Vec<Expr> },
    Unsupported { kind: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
    /// Out-of-range integers and imaginary literals, kept as written
    Text(String),
}

/// Parameter metadata of a function definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    pub positional: Vec<String>,
    /// Defaults of the trailing positional parameters, in order
    pub defaults: Vec<Expr>,
    pub vararg: Option<String>,
    pub keyword_only: Vec<KeywordOnly>,
    pub kwarg: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordOnly {
    pub name: String,
    pub default: Option<Expr>,
}
