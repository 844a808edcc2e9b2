use prolix_diagnostic::span::Span;
use prolix_interner::Interner;

use super::{Lexer, LexerError, LexerErrorKind};
use crate::token::{Keyword, Token, TokenKind};

fn lex(source: &str) -> Result<Vec<Token>, LexerError> {
    let mut interner = Interner::new();
    Lexer::new(source, &mut interner).lex().map(Iterator::collect)
}

fn token_names(source: &str) -> String {
    let tokens = lex(source).unwrap();
    tokens
        .iter()
        .map(|t| t.kind.token_name())
        .collect::<Vec<_>>()
        .join(" ")
}

fn error_kind(source: &str) -> LexerErrorKind {
    lex(source).unwrap_err().kind
}

#[test]
fn empty_source() {
    let tokens = lex("").unwrap();
    assert_eq!(
        tokens,
        [Token {
            kind: TokenKind::Eof,
            span: Span::empty(0)
        }]
    );
}

#[test]
fn function_header() {
    insta::assert_snapshot!(
        token_names("the function numbered 1 is integer_meaning_whole_in_latin_with_exactly_thirty_two_bits shall be equal to main left_bracket right_bracket"),
        @"`the function numbered` integer `is` the 32-bit integer type `shall be equal to` identifier `left_bracket` `right_bracket` end of input"
    );
}

#[test]
fn longest_phrase_wins() {
    insta::assert_snapshot!(
        token_names("x is not zero is zero is shall now be equal to shall be equal to"),
        @"identifier `is not zero` `is zero` `is` `shall now be equal to` `shall be equal to` end of input"
    );
}

#[test]
fn spaced_type_tag() {
    let tokens = lex("integer meaning whole in latin with exactly thirty two bits").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::I32));
    assert_eq!(tokens[0].span, Span::new(0, 59));
}

#[test]
fn case_insensitive_and_any_whitespace() {
    let tokens = lex("The\tFUNCTION\n\n  Numbered").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::FunctionNumbered));
    assert_eq!(tokens[0].span, Span::new(0, 24));
}

#[test]
fn partial_phrase_is_identifiers() {
    insta::assert_snapshot!(
        token_names("in the case"),
        @"identifier identifier identifier end of input"
    );
}

#[test]
fn phrases_match_whole_words_only() {
    let mut interner = Interner::new();
    let tokens: Vec<_> = Lexer::new("periodic period", &mut interner)
        .lex()
        .unwrap()
        .collect();

    let periodic = interner.get_interned("periodic").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Identifier(periodic));
    assert_eq!(tokens[1].kind, TokenKind::Period);
}

#[test]
fn integers() {
    let tokens = lex("0 42 2147483647").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        [
            TokenKind::Integer(0),
            TokenKind::Integer(42),
            TokenKind::Integer(i32::MAX),
            TokenKind::Eof
        ]
    );
}

#[test]
fn integer_overflow() {
    assert_eq!(error_kind("2147483648"), LexerErrorKind::IntegerOverflow);
}

#[test]
fn malformed_number() {
    let err = lex("return 12abc period").unwrap_err();
    assert_eq!(err.kind, LexerErrorKind::MalformedNumber);
    assert_eq!(err.span, Span::new(7, 12));
}

#[test]
fn unexpected_char() {
    let err = lex("return 1 + 2").unwrap_err();
    assert_eq!(err.kind, LexerErrorKind::UnexpectedChar('+'));
    assert_eq!(err.span, Span::new(9, 10));
}

#[test]
fn non_ascii_letters_are_rejected() {
    assert_eq!(error_kind("café"), LexerErrorKind::UnexpectedChar('é'));
}
