#[cfg(test)]
mod tests;

mod expr;

use prolix_ir::{Ident, Spanned, Type};
use prolix_session::diagnostics::prelude::*;
use prolix_utils::peek::Peek;

use crate::ast::*;
use crate::lexer::TokenIter;
use crate::token::{Keyword, Token, TokenKind};

#[derive(Debug, serde::Serialize)]
pub struct ParseError {
    pub expected: String,
    pub found: &'static str,
    pub span: Span,
}

impl IntoDiagnostic<SourceId> for ParseError {
    fn into_diagnostic(self, &source_id: &SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_id("parse-error")
            .with_message(format!("expected {}, found {}", self.expected, self.found))
            .with_snippet(Snippet::primary(
                format!("expected {}", self.expected),
                source_id,
                self.span,
            ))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive descent parser. Stops at the first error.
pub struct Parser {
    tokens: TokenIter,
}

impl Parser {
    pub fn new(tokens: TokenIter) -> Self {
        Self { tokens }
    }

    pub fn parse(mut self) -> ParseResult<Module> {
        let mut funcs = vec![];

        loop {
            match self.tokens.peek_kind() {
                Some(TokenKind::Keyword(Keyword::FunctionNumbered)) => {
                    funcs.push(self.parse_func_decl()?);
                }

                Some(TokenKind::Eof) => {
                    self.tokens.next();
                    break;
                }

                _ => {
                    return Err(self.error_expected(
                        "a function declaration or end of input",
                        self.tokens.peek(),
                    ))
                }
            }
        }

        Ok(Module { funcs })
    }

    fn parse_func_decl(&mut self) -> ParseResult<FuncDecl> {
        self.expect(TokenKind::Keyword(Keyword::FunctionNumbered))?;

        let ordinal = self.parse_integer()?;

        self.expect(TokenKind::Keyword(Keyword::Is))?;
        let ret_ty = self.parse_type()?;

        self.expect(TokenKind::Keyword(Keyword::ShallBeEqualTo))?;
        let name = self.parse_ident()?;

        self.expect(TokenKind::LBracket)?;
        let params = self.parse_list(TokenKind::RBracket, Self::parse_param)?;

        let block = self.parse_block()?;

        Ok(FuncDecl {
            ordinal,
            name,
            ret_ty,
            params,
            block,
        })
    }

    fn parse_param(&mut self) -> ParseResult<Param> {
        let ident = self.parse_ident()?;
        self.expect(TokenKind::Keyword(Keyword::Is))?;
        let ty = self.parse_type()?;

        Ok(Param { ident, ty })
    }

    fn parse_type(&mut self) -> ParseResult<Type> {
        match self.tokens.peek() {
            Some(t) if t.kind == TokenKind::Keyword(Keyword::I32) => {
                self.tokens.next();
                Ok(Type::I32)
            }

            other => Err(self.error_expected("a type", other)),
        }
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.expect(TokenKind::LParen)?.span;

        let mut stmts = vec![];
        while self
            .tokens
            .peek()
            .is_some_and(|t| t.kind != TokenKind::RParen)
        {
            stmts.push(self.parse_statement()?);
        }

        let end = self.expect(TokenKind::RParen)?.span;

        Ok(Block {
            stmts,
            span: start.union(end),
        })
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let Some(token) = self.tokens.peek() else {
            return Err(self.error_expected("a statement", None));
        };

        match token.kind {
            TokenKind::Keyword(Keyword::DeclareVariable) => {
                self.tokens.next();

                let ident = self.parse_ident()?;
                self.expect(TokenKind::Keyword(Keyword::Is))?;
                let ty = self.parse_type()?;
                self.expect(TokenKind::Keyword(Keyword::ShallBeEqualTo))?;
                let expr = self.parse_expr()?;
                self.expect_terminator()?;

                Ok(Stmt::Declare { ident, ty, expr })
            }

            TokenKind::Identifier(_) => {
                let ident = self.parse_ident()?;
                self.expect(TokenKind::Keyword(Keyword::ShallNowBeEqualTo))?;
                let expr = self.parse_expr()?;
                self.expect_terminator()?;

                Ok(Stmt::Assign { ident, expr })
            }

            TokenKind::Keyword(Keyword::InTheCaseThat) => {
                self.tokens.next();

                let cond = self.parse_expr()?;
                self.expect(TokenKind::Keyword(Keyword::IsZero))?;
                self.expect(TokenKind::Keyword(Keyword::Do))?;
                let then = self.parse_statement()?;

                Ok(Stmt::IfZero {
                    cond,
                    then: Box::new(then),
                })
            }

            TokenKind::Keyword(Keyword::DuringThePeriodThat) => {
                self.tokens.next();

                let cond = self.parse_expr()?;
                self.expect(TokenKind::Keyword(Keyword::IsNotZero))?;
                self.expect(TokenKind::Keyword(Keyword::Do))?;
                let body = self.parse_statement()?;

                Ok(Stmt::WhileNonZero {
                    cond,
                    body: Box::new(body),
                })
            }

            TokenKind::Keyword(Keyword::Return) => {
                self.tokens.next();

                let expr = self.parse_expr()?;
                self.expect_terminator()?;

                Ok(Stmt::Return(expr))
            }

            TokenKind::Keyword(Keyword::Invoke) => {
                let call = self.parse_call()?;
                self.expect_terminator()?;

                Ok(Stmt::Call(call))
            }

            TokenKind::LParen => self.parse_block().map(Stmt::Block),

            _ => Err(self.error_expected("a statement", Some(token))),
        }
    }

    fn parse_call(&mut self) -> ParseResult<Call> {
        let start = self.expect(TokenKind::Keyword(Keyword::Invoke))?.span;

        let callee = self.parse_ident()?;
        self.expect(TokenKind::Keyword(Keyword::TakeParameters))?;

        self.expect(TokenKind::LBrace)?;
        let args = self.parse_list(TokenKind::RBrace, Self::parse_expr)?;

        Ok(Call {
            callee,
            args,
            span: start.union(self.tokens.prev_span()),
        })
    }

    /// Parses `comma`-separated items up to and including the closing token.
    fn parse_list<T>(
        &mut self,
        close: TokenKind,
        mut parse_item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = vec![];

        if self.eat_kind(close) {
            return Ok(items);
        }

        loop {
            items.push(parse_item(self)?);

            if !self.eat_kind(TokenKind::Comma) {
                break;
            }
        }

        self.expect(close)?;

        Ok(items)
    }

    fn parse_ident(&mut self) -> ParseResult<Ident> {
        match self.tokens.peek() {
            Some(Token {
                kind: TokenKind::Identifier(istr),
                span,
            }) => {
                self.tokens.next();
                Ok(Ident { istr, span })
            }
            other => Err(self.error_expected("an identifier", other)),
        }
    }

    fn parse_integer(&mut self) -> ParseResult<Spanned<i32>> {
        match self.tokens.peek() {
            Some(Token {
                kind: TokenKind::Integer(n),
                span,
            }) => {
                self.tokens.next();
                Ok(Spanned::new(n, span))
            }
            other => Err(self.error_expected("an integer", other)),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.tokens.peek() {
            Some(t) if t.kind == kind => {
                self.tokens.next();
                Ok(t)
            }

            other => Err(self.error_expected_kind(kind, other)),
        }
    }

    fn expect_terminator(&mut self) -> ParseResult<()> {
        match self.tokens.peek() {
            Some(t) if matches!(t.kind, TokenKind::Period | TokenKind::Semicolon) => {
                self.tokens.next();
                Ok(())
            }

            other => Err(self.error_expected("`period` or `semicolon`", other)),
        }
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        match self.tokens.peek() {
            Some(t) if t.kind == kind => {
                self.tokens.next();
                true
            }
            _ => false,
        }
    }

    fn error_expected_kind(&self, kind: TokenKind, found: Option<Token>) -> ParseError {
        self.error_expected(kind.token_name(), found)
    }

    fn error_expected(&self, expected: impl Into<String>, found: Option<Token>) -> ParseError {
        match found {
            Some(token) => ParseError {
                expected: expected.into(),
                found: token.kind.token_name(),
                span: token.span,
            },
            None => ParseError {
                expected: expected.into(),
                found: TokenKind::Eof.token_name(),
                span: Span::empty(self.tokens.prev_span().end),
            },
        }
    }
}
