#[cfg(test)]
mod tests;

use std::str::Chars;

use prolix_interner::Interner;
use prolix_session::diagnostics::prelude::*;
use prolix_utils::peek::Peek;

use crate::token::*;

#[derive(Debug, serde::Serialize)]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub span: Span,
}

#[derive(serde::Serialize, thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("integer literal doesn't fit in 32 bits")]
    IntegerOverflow,

    #[error("word starts with a digit but isn't a number")]
    MalformedNumber,
}

impl IntoDiagnostic<SourceId> for LexerError {
    fn into_diagnostic(self, &source_id: &SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_id("lex-error")
            .with_message("couldn't split the source into words")
            .with_snippet(Snippet::primary(
                self.kind.to_string(),
                source_id,
                self.span,
            ))
    }
}

pub type LexerResult<T> = Result<T, LexerError>;

pub struct Lexer<'sess> {
    interner: &'sess mut Interner,

    all: &'sess str,
    chars: Chars<'sess>,
}

impl<'sess> Lexer<'sess> {
    pub fn new(source: &'sess str, interner: &'sess mut Interner) -> Self {
        Self {
            interner,

            all: source,
            chars: source.chars(),
        }
    }

    /// Produces the token stream, always terminated by a [`TokenKind::Eof`] token.
    pub fn lex(mut self) -> LexerResult<TokenIter> {
        let words = self.split_words()?;

        let mut tokens = Vec::with_capacity(words.len() + 1);
        let mut pos = 0;

        while pos < words.len() {
            let (kind, len) = match match_phrase(self.all, &words[pos..]) {
                Some(matched) => matched,
                None => (self.lex_word(words[pos])?, 1),
            };

            let span = words[pos].union(words[pos + len - 1]);
            tokens.push(Token { kind, span });

            pos += len;
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::empty(self.all.len()),
        });

        Ok(TokenIter::new(tokens))
    }

    fn split_words(&mut self) -> LexerResult<Vec<Span>> {
        let mut words = vec![];

        loop {
            self.chars.eat_while(|ch| ch.is_whitespace());

            let start = self.byte_pos();

            match self.chars.peek() {
                Some(ch) if is_word_char(ch) => {
                    self.chars.eat_while(|&ch| is_word_char(ch));
                    words.push(Span::new(start, self.byte_pos()));
                }

                Some(ch) => {
                    self.chars.next();
                    return Err(LexerError {
                        kind: LexerErrorKind::UnexpectedChar(ch),
                        span: Span::new(start, self.byte_pos()),
                    });
                }

                None => return Ok(words),
            }
        }
    }

    fn lex_word(&mut self, span: Span) -> LexerResult<TokenKind> {
        let word = &self.all[span.start..span.end];

        if !word.starts_with(|ch: char| ch.is_ascii_digit()) {
            return Ok(TokenKind::Identifier(self.interner.intern(word)));
        }

        if !word.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LexerError {
                kind: LexerErrorKind::MalformedNumber,
                span,
            });
        }

        word.parse()
            .map(TokenKind::Integer)
            .map_err(|_| LexerError {
                kind: LexerErrorKind::IntegerOverflow,
                span,
            })
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.chars.as_str().len()
    }
}

/// Finds the first (and therefore longest) phrase matching the upcoming words.
fn match_phrase(source: &str, words: &[Span]) -> Option<(TokenKind, usize)> {
    PHRASES.iter().find_map(|&(phrase, kind)| {
        let mut len = 0;

        for expected in phrase.split(' ') {
            let word = words.get(len)?;
            if !source[word.start..word.end].eq_ignore_ascii_case(expected) {
                return None;
            }

            len += 1;
        }

        Some((kind, len))
    })
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[derive(Debug, Clone)]
pub struct TokenIter {
    tokens: std::vec::IntoIter<Token>,
    prev_span: Span,
}

impl TokenIter {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            prev_span: Span::empty(0),
        }
    }

    pub fn prev_span(&self) -> Span {
        self.prev_span
    }

    pub fn peek_span(&self) -> Span {
        self.peek().map_or(self.prev_span, |t| t.span)
    }

    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }
}

impl Iterator for TokenIter {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.next()?;
        self.prev_span = token.span;
        Some(token)
    }
}

impl Peek for TokenIter {
    fn peek(&self) -> Option<Self::Item> {
        self.tokens.as_slice().first().copied()
    }
}
