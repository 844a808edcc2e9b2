#[macro_use]
extern crate macro_rules_attribute;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

mod layout;
mod lexer;
mod parser;

pub mod ast;
pub mod token;

pub use layout::{check_layout, LayoutError, LayoutErrorKind};
pub use lexer::{LexerError, LexerErrorKind, LexerResult, TokenIter};
pub use parser::{ParseError, ParseResult};

use ast::Module;
use lexer::Lexer;
use parser::Parser;
use prolix_interner::Interner;

pub fn lex(source: &str, interner: &mut Interner) -> LexerResult<TokenIter> {
    Lexer::new(source, interner).lex()
}

pub fn parse(tokens: TokenIter) -> ParseResult<Module> {
    Parser::new(tokens).parse()
}
