use prolix_ir::{BinOp, Ident};
use prolix_utils::peek::Peek;

use super::{ParseResult, Parser};
use crate::ast::*;
use crate::token::*;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Lowest,

    Term,
    Factor,
}

fn binop_prec(binop: BinOp) -> Prec {
    match binop {
        BinOp::Add | BinOp::Sub => Prec::Term,
        BinOp::Mul | BinOp::Div | BinOp::Mod => Prec::Factor,
    }
}

impl Parser {
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_prec(Prec::Lowest)
    }

    fn parse_prec(&mut self, prec: Prec) -> ParseResult<Expr> {
        let mut expr = self.parse_lhs()?;

        // every operator is left associative
        while let Some(op) = self.peek_bin_op(prec) {
            self.tokens.next();

            let rhs = self.parse_prec(binop_prec(op))?;

            let span = expr.span.union(rhs.span);
            expr = Expr::new(
                ExprKind::BinOp {
                    op,
                    lhs: Box::new(expr),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        Ok(expr)
    }

    fn parse_lhs(&mut self) -> ParseResult<Expr> {
        match self.tokens.peek() {
            Some(Token {
                kind: TokenKind::Integer(n),
                span,
            }) => {
                self.tokens.next();
                Ok(Expr::new(ExprKind::Integer(n), span))
            }

            Some(Token {
                kind: TokenKind::Identifier(istr),
                span,
            }) => {
                self.tokens.next();
                Ok(Expr::new(ExprKind::Var(Ident { istr, span }), span))
            }

            Some(t) if t.kind == TokenKind::Keyword(Keyword::Invoke) => {
                let call = self.parse_call()?;
                let span = call.span;
                Ok(Expr::new(ExprKind::Call(call), span))
            }

            Some(t) if t.kind == TokenKind::LBrace => {
                self.tokens.next();

                let mut expr = self.parse_expr()?;
                let end = self.expect(TokenKind::RBrace)?.span;

                expr.span = t.span.union(end);
                Ok(expr)
            }

            other => Err(self.error_expected("an expression", other)),
        }
    }

    fn peek_bin_op(&self, prec: Prec) -> Option<BinOp> {
        let op = match self.tokens.peek_kind()? {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Times => BinOp::Mul,
            TokenKind::Div => BinOp::Div,
            TokenKind::Mod => BinOp::Mod,

            _ => return None,
        };

        (binop_prec(op) > prec).then_some(op)
    }
}
