use prolix_diagnostic::termcolor::{ColorChoice, StandardStream};

pub use prolix_diagnostic::*;

use crate::sourcemap::SourceMap;

pub mod prelude {
    pub use super::{Diagnostic, IntoDiagnostic};
    pub use crate::sourcemap::SourceId;
    pub use prolix_diagnostic::span::Span;
    pub use prolix_diagnostic::{Severity, Snippet, SnippetKind};
}

pub type Diagnostic = prolix_diagnostic::Diagnostic<SourceMap>;

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _sources: &SourceMap) {
        self.push(diagnostic);
    }
}

impl<D: DiagnosticEmitter + ?Sized> DiagnosticEmitter for &mut D {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        (**self).emit_diagnostic(diagnostic, sources);
    }
}

impl<D: DiagnosticEmitter + ?Sized> DiagnosticEmitter for Box<D> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        (**self).emit_diagnostic(diagnostic, sources);
    }
}

/// Renders diagnostics to stderr, colored when the terminal supports it.
#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self {
            stream: StandardStream::stderr(ColorChoice::Auto),
            config: Config::default(),
        }
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        // nowhere left to report a failure to write to stderr
        let _ = diagnostic.write_to_stream(sources, &self.config, &mut self.stream);
    }
}

/// Counts diagnostics by severity while forwarding them.
#[derive(Debug, Default)]
pub struct CountingEmitter<D> {
    pub inner: D,
    pub warnings: usize,
    pub errors: usize,
}

impl<D: DiagnosticEmitter> CountingEmitter<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            warnings: 0,
            errors: 0,
        }
    }
}

impl<D: DiagnosticEmitter> DiagnosticEmitter for CountingEmitter<D> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        match diagnostic.severity {
            Severity::Warning => self.warnings += 1,
            Severity::Error => self.errors += 1,
        }

        self.inner.emit_diagnostic(diagnostic, sources);
    }
}

pub trait IntoDiagnostic<Context: ?Sized> {
    fn into_diagnostic(self, cx: &Context) -> Diagnostic;
}

impl IntoDiagnostic<()> for Diagnostic {
    fn into_diagnostic(self, _cx: &()) -> Diagnostic {
        self
    }
}
