use prolix_interner::Interner;
use prolix_ir::{IdentWithSource, Spanned};
use prolix_session::diagnostics::prelude::*;
use prolix_session::sourcemap::{SourceMap, SourceSpan};

pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentRole {
    Function,
    Param,
    Variable,
}

impl IdentRole {
    fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Param => "parameter",
            Self::Variable => "variable",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ValidationError {
    DuplicateOrdinal {
        ordinal: i32,
        first: SourceSpan,
        second: SourceSpan,
    },

    DuplicateFunction {
        first: IdentWithSource,
        second: IdentWithSource,
    },

    IdentifierTooLong {
        ident: IdentWithSource,
        role: IdentRole,
        max_len: usize,
    },

    DuplicateVariable {
        first: IdentWithSource,
        second: IdentWithSource,
    },

    UndefinedVariable(IdentWithSource),

    UnresolvedCall(IdentWithSource),

    ArityMismatch {
        callee: IdentWithSource,
        expected: usize,
        found: usize,
    },

    CrowdedFunction {
        func: IdentWithSource,
        num_locals: usize,
        max_locals: usize,
    },

    LonelyVariable(IdentWithSource),

    MissingMain,

    MainSignature {
        main: IdentWithSource,
        num_params: usize,
    },
}

/// The data-free discriminant of a [`ValidationError`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    #[error("duplicate function ordinal")]
    DuplicateOrdinal,
    #[error("duplicate function")]
    DuplicateFunction,
    #[error("identifier too long")]
    IdentifierTooLong,
    #[error("duplicate variable")]
    DuplicateVariable,
    #[error("undefined variable")]
    UndefinedVariable,
    #[error("unresolved call")]
    UnresolvedCall,
    #[error("wrong number of arguments")]
    ArityMismatch,
    #[error("too many locals in one function")]
    CrowdedFunction,
    #[error("variable declared but never read")]
    LonelyVariable,
    #[error("no `main` function")]
    MissingMain,
    #[error("`main` takes parameters")]
    MainSignature,
}

impl ValidationErrorKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::DuplicateOrdinal => "duplicate-ordinal",
            Self::DuplicateFunction => "duplicate-function",
            Self::IdentifierTooLong => "identifier-too-long",
            Self::DuplicateVariable => "duplicate-variable",
            Self::UndefinedVariable => "undefined-variable",
            Self::UnresolvedCall => "unresolved-call",
            Self::ArityMismatch => "arity-mismatch",
            Self::CrowdedFunction => "crowded-function",
            Self::LonelyVariable => "lonely-variable",
            Self::MissingMain => "missing-main",
            Self::MainSignature => "main-signature",
        }
    }
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::DuplicateOrdinal { .. } => ValidationErrorKind::DuplicateOrdinal,
            Self::DuplicateFunction { .. } => ValidationErrorKind::DuplicateFunction,
            Self::IdentifierTooLong { .. } => ValidationErrorKind::IdentifierTooLong,
            Self::DuplicateVariable { .. } => ValidationErrorKind::DuplicateVariable,
            Self::UndefinedVariable(_) => ValidationErrorKind::UndefinedVariable,
            Self::UnresolvedCall(_) => ValidationErrorKind::UnresolvedCall,
            Self::ArityMismatch { .. } => ValidationErrorKind::ArityMismatch,
            Self::CrowdedFunction { .. } => ValidationErrorKind::CrowdedFunction,
            Self::LonelyVariable(_) => ValidationErrorKind::LonelyVariable,
            Self::MissingMain => ValidationErrorKind::MissingMain,
            Self::MainSignature { .. } => ValidationErrorKind::MainSignature,
        }
    }
}

fn primary(label: impl Into<String>, span: SourceSpan) -> Snippet<SourceMap> {
    Snippet::primary(label, span.source_id, span.span)
}

fn secondary(label: impl Into<String>, span: SourceSpan) -> Snippet<SourceMap> {
    Snippet::secondary(label, span.source_id, span.span)
}

impl IntoDiagnostic<Interner> for ValidationError {
    fn into_diagnostic(self, interner: &Interner) -> Diagnostic {
        let diagnostic = Diagnostic::error().with_id(self.kind().id());

        match self {
            Self::DuplicateOrdinal {
                ordinal,
                first,
                second,
            } => diagnostic
                .with_message(format!("more than one function is numbered {ordinal}"))
                .with_snippet(secondary("first numbered here", first))
                .with_snippet(primary("numbered again here", second)),

            Self::DuplicateFunction { first, second } => diagnostic
                .with_message(format!(
                    "function `{}` is defined more than once",
                    &interner[first.istr]
                ))
                .with_snippet(secondary("first definition", first.span))
                .with_snippet(primary("second definition", second.span)),

            Self::IdentifierTooLong {
                ident,
                role,
                max_len,
            } => {
                let name = &interner[ident.istr];
                diagnostic
                    .with_message(format!(
                        "{} name `{name}` is too long",
                        role.as_str()
                    ))
                    .with_snippet(primary(
                        format!("{} characters", name.chars().count()),
                        ident.span,
                    ))
                    .with_note(format!(
                        "{} names may have at most {max_len} characters",
                        role.as_str()
                    ))
            }

            Self::DuplicateVariable { first, second } => diagnostic
                .with_message(format!(
                    "variable `{}` is already declared",
                    &interner[first.istr]
                ))
                .with_snippet(secondary("first declared here", first.span))
                .with_snippet(primary("declared again here", second.span)),

            Self::UndefinedVariable(ident) => diagnostic
                .with_message(format!("undefined variable `{}`", &interner[ident.istr]))
                .with_snippet(primary("not declared in this scope", ident.span)),

            Self::UnresolvedCall(ident) => diagnostic
                .with_message(format!(
                    "no function named `{}` to invoke",
                    &interner[ident.istr]
                ))
                .with_snippet(primary("not a function of this program", ident.span))
                .with_note("only functions of this program and the C runtime can be invoked"),

            Self::ArityMismatch {
                callee,
                expected,
                found,
            } => diagnostic
                .with_message(format!(
                    "function `{}` takes {expected} parameters but {found} were given",
                    &interner[callee.istr]
                ))
                .with_snippet(primary(format!("expected {expected}"), callee.span)),

            Self::CrowdedFunction {
                func,
                num_locals,
                max_locals,
            } => diagnostic
                .with_message(format!(
                    "function `{}` has too many variables",
                    &interner[func.istr]
                ))
                .with_snippet(primary(format!("{num_locals} variables"), func.span))
                .with_note(format!(
                    "a function may have at most {max_locals} parameters and variables combined"
                )),

            Self::LonelyVariable(ident) => diagnostic
                .with_message(format!(
                    "variable `{}` is never read",
                    &interner[ident.istr]
                ))
                .with_snippet(primary("declared here", ident.span))
                .with_note("every declared variable must be read at least once"),

            Self::MissingMain => diagnostic.with_message("no function named `main`"),

            Self::MainSignature { main, num_params } => diagnostic
                .with_message("`main` must not take parameters")
                .with_snippet(primary(format!("takes {num_params}"), main.span)),
        }
    }
}

/// An ordinal that doesn't continue the sequence of the previous function.
#[derive(Debug, Clone, Copy)]
pub struct OrdinalWarning {
    pub ordinal: Spanned<i32, SourceSpan>,
    pub expected: i32,
}

impl IntoDiagnostic<Interner> for OrdinalWarning {
    fn into_diagnostic(self, _interner: &Interner) -> Diagnostic {
        Diagnostic::warning()
            .with_id("ordinal-sequence")
            .with_message(format!(
                "function numbered {} where {} was expected",
                self.ordinal.node, self.expected
            ))
            .with_snippet(primary(
                format!("expected {}", self.expected),
                self.ordinal.span,
            ))
    }
}
