use prolix_diagnostic::span::Span;
use prolix_interner::Istr;

use crate::NodeCopy;

#[derive(NodeCopy!)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(NodeCopy!)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier(Istr),
    Integer(i32),

    /// `left_bracket`, opens a parameter list.
    LBracket,
    RBracket,
    /// `left_parenthesis`, opens a block.
    LParen,
    RParen,
    /// `left_brace`, opens an argument list or a grouped expression.
    LBrace,
    RBrace,

    Comma,
    Period,
    Semicolon,

    Plus,
    Minus,
    Times,
    Div,
    Mod,

    Eof,
}

#[derive(NodeCopy!)]
pub enum Keyword {
    FunctionNumbered,
    Is,
    ShallBeEqualTo,
    ShallNowBeEqualTo,
    I32,

    DeclareVariable,
    InTheCaseThat,
    DuringThePeriodThat,
    IsZero,
    IsNotZero,
    Do,
    Return,

    Invoke,
    TakeParameters,
}

const I32_SPELLED: &str = "integer_meaning_whole_in_latin_with_exactly_thirty_two_bits";

/// Every multi-word and single-word phrase with a fixed meaning. Words are separated by a
/// single space. Phrases with more words come first so the longest match always wins.
pub const PHRASES: &[(&str, TokenKind)] = &[
    (
        "integer meaning whole in latin with exactly thirty two bits",
        TokenKind::Keyword(Keyword::I32),
    ),
    (
        "i am declaring a variable named",
        TokenKind::Keyword(Keyword::DeclareVariable),
    ),
    (
        "i shall invoke the function named",
        TokenKind::Keyword(Keyword::Invoke),
    ),
    (
        "and it shall take the parameters",
        TokenKind::Keyword(Keyword::TakeParameters),
    ),
    (
        "shall now be equal to",
        TokenKind::Keyword(Keyword::ShallNowBeEqualTo),
    ),
    (
        "shall be equal to",
        TokenKind::Keyword(Keyword::ShallBeEqualTo),
    ),
    (
        "in the case that",
        TokenKind::Keyword(Keyword::InTheCaseThat),
    ),
    (
        "during the period that",
        TokenKind::Keyword(Keyword::DuringThePeriodThat),
    ),
    (
        "the function numbered",
        TokenKind::Keyword(Keyword::FunctionNumbered),
    ),
    ("is not zero", TokenKind::Keyword(Keyword::IsNotZero)),
    ("is zero", TokenKind::Keyword(Keyword::IsZero)),
    (I32_SPELLED, TokenKind::Keyword(Keyword::I32)),
    ("is", TokenKind::Keyword(Keyword::Is)),
    ("do", TokenKind::Keyword(Keyword::Do)),
    ("return", TokenKind::Keyword(Keyword::Return)),
    ("left_bracket", TokenKind::LBracket),
    ("right_bracket", TokenKind::RBracket),
    ("left_parenthesis", TokenKind::LParen),
    ("right_parenthesis", TokenKind::RParen),
    ("left_brace", TokenKind::LBrace),
    ("right_brace", TokenKind::RBrace),
    ("comma", TokenKind::Comma),
    ("period", TokenKind::Period),
    ("semicolon", TokenKind::Semicolon),
    ("plus", TokenKind::Plus),
    ("minus", TokenKind::Minus),
    ("times", TokenKind::Times),
    ("div", TokenKind::Div),
    ("mod", TokenKind::Mod),
];

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(kw) => match kw {
                Keyword::FunctionNumbered => "`the function numbered`",
                Keyword::Is => "`is`",
                Keyword::ShallBeEqualTo => "`shall be equal to`",
                Keyword::ShallNowBeEqualTo => "`shall now be equal to`",
                Keyword::I32 => "the 32-bit integer type",
                Keyword::DeclareVariable => "`i am declaring a variable named`",
                Keyword::InTheCaseThat => "`in the case that`",
                Keyword::DuringThePeriodThat => "`during the period that`",
                Keyword::IsZero => "`is zero`",
                Keyword::IsNotZero => "`is not zero`",
                Keyword::Do => "`do`",
                Keyword::Return => "`return`",
                Keyword::Invoke => "`i shall invoke the function named`",
                Keyword::TakeParameters => "`and it shall take the parameters`",
            },
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Integer(_) => "integer",
            TokenKind::LBracket => "`left_bracket`",
            TokenKind::RBracket => "`right_bracket`",
            TokenKind::LParen => "`left_parenthesis`",
            TokenKind::RParen => "`right_parenthesis`",
            TokenKind::LBrace => "`left_brace`",
            TokenKind::RBrace => "`right_brace`",
            TokenKind::Comma => "`comma`",
            TokenKind::Period => "`period`",
            TokenKind::Semicolon => "`semicolon`",
            TokenKind::Plus => "`plus`",
            TokenKind::Minus => "`minus`",
            TokenKind::Times => "`times`",
            TokenKind::Div => "`div`",
            TokenKind::Mod => "`mod`",
            TokenKind::Eof => "end of input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PHRASES;

    #[test]
    fn phrases_are_longest_first() {
        let word_counts: Vec<usize> = PHRASES
            .iter()
            .map(|(phrase, _)| phrase.split(' ').count())
            .collect();

        assert!(word_counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn phrases_are_lowercase_words() {
        for (phrase, _) in PHRASES {
            assert!(phrase
                .split(' ')
                .all(|word| !word.is_empty()
                    && word.chars().all(|ch| ch.is_ascii_lowercase() || ch == '_')));
        }
    }
}
