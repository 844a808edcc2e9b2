use prolix_diagnostic::span::Span;

use super::{BinOp, Node, NodeCopy};
use crate::symbols::{ExternId, FuncId, LocalId};

/// A name-resolved program. Functions keep their source order.
#[derive(Node!)]
pub struct Module {
    pub funcs: Vec<FuncDecl>,
}

#[derive(Node!)]
pub struct FuncDecl {
    pub id: FuncId,

    /// Parameters followed by every declared variable, in declaration order.
    pub locals: Vec<LocalId>,
    pub num_params: usize,

    pub body: Block,
}

impl FuncDecl {
    pub fn params(&self) -> &[LocalId] {
        &self.locals[..self.num_params]
    }
}

#[derive(Node!)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Node!)]
pub enum Stmt {
    Assign { local: LocalId, expr: Expr },
    IfZero { cond: Expr, then: Box<Stmt> },
    WhileNonZero { cond: Expr, body: Box<Stmt> },
    Block(Block),
    Return(Expr),
    Eval(Expr),
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
    Constant(i32),
    Var(LocalId),
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        callee: Callee,
        args: Vec<Expr>,
    },
}

#[derive(NodeCopy!)]
pub enum Callee {
    Func(FuncId),
    External(ExternId),
}
