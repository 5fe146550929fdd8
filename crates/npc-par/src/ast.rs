//! AST node definitions.
//!
//! The tree is a plain tagged sum type, not a class hierarchy: every
//! walker (semantic analyzer, IR builder) dispatches with an exhaustive
//! `match` over `StmtKind`/`ExprKind` rather than visitor dispatch.
//! `Stmt`/`Expr` wrap their kind together with the source `Span` every
//! node carries.

use npc_util::{Span, Symbol};

/// A whole source file: an ordered list of top-level statements.
pub type Program = Vec<Stmt>;

/// An unresolved type name as written in source (`i32`, `String`,
/// `MyStruct`, …). Resolution against the closed type set happens in the
/// semantic analyzer, not here.
pub type TypeRef = Symbol;

/// A block: `Block` introduces a fresh lexical scope (invariant (b)).
#[derive(Clone, Debug)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    Let {
        name: Symbol,
        ty: Option<TypeRef>,
        value: Option<Expr>,
    },
    FnDef {
        name: Symbol,
        params: Vec<Param>,
        return_type: Option<TypeRef>,
        body: Block,
    },
    Return(Option<Expr>),
    If {
        cond: Expr,
        then_branch: Block,
        else_branch: Option<Block>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    For {
        var: Symbol,
        iterable: Expr,
        body: Block,
    },
    Block(Block),
    StructDef {
        name: Symbol,
        fields: Vec<StructField>,
    },
    Import {
        module: Symbol,
        from: Option<String>,
        version: Option<String>,
        alias: Option<Symbol>,
    },
    PackageDecl {
        name: Symbol,
        version: String,
        deps: Vec<Dependency>,
        exports: Vec<Symbol>,
    },
    ExprStmt(Expr),
    Assign {
        name: Symbol,
        value: Expr,
    },
    /// Legacy `print [ "text" ]` sugar. The modern dialect's `print(x)`
    /// call is an ordinary `ExprStmt(Call(..))` instead, since `print` is
    /// a built-in function, not a keyword-statement, there.
    Print(String),
}

#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    Literal(Literal),
    Ident(Symbol),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        field: Symbol,
    },
}

/// A literal value together with the type the lexer's token kind implies
/// (`Integer→i32, Float→f64, String→String, Boolean→bool`). Integer
/// literals keep their raw digit text rather than a parsed value: the
/// base they are parsed in (10 or 12) depends on lowering context and is
/// resolved by the IR builder, not here.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(String),
    Float(f64),
    Str(String),
    Bool(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub name: Symbol,
    pub ty: TypeRef,
}

#[derive(Clone, Debug)]
pub struct StructField {
    pub name: Symbol,
    pub ty: TypeRef,
}

#[derive(Clone, Debug)]
pub struct Dependency {
    pub package: Symbol,
    pub version_constraint: String,
}

/// The legacy dodecagram tag. Retained only as a debug-dump helper for
/// `--emit ast`; nothing in the compiler dispatches on it.
pub fn dodecagram_tag(stmt: &StmtKind) -> char {
    match stmt {
        StmtKind::FnDef { .. } => '6',
        StmtKind::Block(_) => '7',
        StmtKind::If { .. } => 'b',
        StmtKind::While { .. } | StmtKind::For { .. } => 'a',
        _ => '2',
    }
}
