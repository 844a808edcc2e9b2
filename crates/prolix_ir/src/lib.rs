//! Types for representing the program after name resolution.

#[macro_use]
extern crate macro_rules_attribute;

pub mod ir;
pub mod symbols;

use prolix_diagnostic::span::Span;
use prolix_interner::Istr;
use prolix_session::sourcemap::{SourceId, SourceSpan};

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

#[derive(NodeCopy!)]
pub struct Ident {
    pub istr: Istr,
    pub span: Span,
}

impl Ident {
    pub fn with_source(self, source_id: SourceId) -> IdentWithSource {
        IdentWithSource {
            istr: self.istr,
            span: SourceSpan::new(self.span, source_id),
        }
    }
}

#[derive(NodeCopy!)]
pub struct IdentWithSource {
    pub istr: Istr,
    pub span: SourceSpan,
}

#[derive(NodeCopy!)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    /// The LLVM instruction computing this operation on signed 32-bit integers.
    pub fn instruction(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "sdiv",
            Self::Mod => "srem",
        }
    }
}

/// The only value type of the language.
#[derive(NodeCopy!)]
pub enum Type {
    I32,
}

impl Type {
    pub fn llvm_name(self) -> &'static str {
        match self {
            Self::I32 => "i32",
        }
    }
}

#[derive(NodeCopy!)]
pub struct Spanned<T, S = Span> {
    pub node: T,
    pub span: S,
}

impl<T, S> Spanned<T, S> {
    pub fn new(node: T, span: S) -> Self {
        Self { node, span }
    }
}

impl<T> Spanned<T, Span> {
    pub fn to_source_spanned(self, source_id: SourceId) -> Spanned<T, SourceSpan> {
        Spanned {
            node: self.node,
            span: SourceSpan::new(self.span, source_id),
        }
    }
}
