use prolix_diagnostic::span::Span;
use prolix_ir::{BinOp, Ident, Spanned, Type};

use crate::Node;

#[derive(Node!)]
pub struct Module {
    pub funcs: Vec<FuncDecl>,
}

#[derive(Node!)]
pub struct FuncDecl {
    pub ordinal: Spanned<i32>,
    pub name: Ident,
    pub ret_ty: Type,
    pub params: Vec<Param>,
    pub block: Block,
}

#[derive(Node!)]
pub struct Param {
    pub ident: Ident,
    pub ty: Type,
}

#[derive(Node!)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Node!)]
pub enum Stmt {
    Declare { ident: Ident, ty: Type, expr: Expr },
    Assign { ident: Ident, expr: Expr },
    IfZero { cond: Expr, then: Box<Stmt> },
    WhileNonZero { cond: Expr, body: Box<Stmt> },
    Block(Block),
    Return(Expr),
    Call(Call),
}

#[derive(Node!)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Node!)]
pub enum ExprKind {
    Integer(i32),
    Var(Ident),
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call(Call),
}

#[derive(Node!)]
pub struct Call {
    pub callee: Ident,
    pub args: Vec<Expr>,
    pub span: Span,
}
