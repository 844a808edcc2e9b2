pub mod diagnostics;
pub mod sourcemap;

use diagnostics::*;
use sourcemap::SourceMap;
use target_lexicon::Triple;

/// Returned once at least one error-level diagnostic has been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorsEmitted;

/// State shared by every stage of a single compilation.
pub struct Session<D: DiagnosticEmitter> {
    pub target: Triple,
    pub sources: SourceMap,
    pub diagnostics: D,
}

impl<D: DiagnosticEmitter> Session<D> {
    pub fn new(target: Triple, diagnostics: D) -> Self {
        Self {
            target,
            sources: SourceMap::default(),
            diagnostics,
        }
    }

    pub fn report<Context>(
        &mut self,
        diagnostic: impl IntoDiagnostic<Context>,
        cx: &Context,
    ) -> Result<(), ErrorsEmitted> {
        let diagnostic = diagnostic.into_diagnostic(cx);
        let severity = diagnostic.severity;

        self.diagnostics.emit_diagnostic(diagnostic, &self.sources);

        if severity < Severity::Error {
            Ok(())
        } else {
            Err(ErrorsEmitted)
        }
    }

    pub fn report_all<Context, I>(&mut self, diagnostics: I, cx: &Context) -> Result<(), ErrorsEmitted>
    where
        I: IntoIterator,
        I::Item: IntoDiagnostic<Context>,
    {
        let mut had_error = false;

        for diagnostic in diagnostics {
            let diagnostic = diagnostic.into_diagnostic(cx);
            had_error |= diagnostic.severity >= Severity::Error;
            self.diagnostics.emit_diagnostic(diagnostic, &self.sources);
        }

        if had_error {
            Err(ErrorsEmitted)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use target_lexicon::Triple;

    use crate::diagnostics::{Diagnostic, Severity};
    use crate::{ErrorsEmitted, Session};

    #[test]
    fn warnings_do_not_fail_a_session() {
        let mut session = Session::new(Triple::host(), Vec::<Diagnostic>::new());

        assert_eq!(session.report(Diagnostic::warning(), &()), Ok(()));
        assert_eq!(
            session.report_all([Diagnostic::warning(), Diagnostic::error()], &()),
            Err(ErrorsEmitted)
        );

        let severities: Vec<_> = session.diagnostics.iter().map(|d| d.severity).collect();
        assert_eq!(
            severities,
            [Severity::Warning, Severity::Warning, Severity::Error]
        );
    }
}
