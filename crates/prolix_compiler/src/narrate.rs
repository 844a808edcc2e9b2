use std::io::Write;
use std::process::{Command, Stdio};

use prolix_session::diagnostics::{Diagnostic, DiagnosticEmitter};
use prolix_session::sourcemap::SourceMap;

/// Forwards diagnostics to `inner` and reads each message aloud by piping it into the
/// stdin of a narrator program. Narration never affects compilation.
pub struct NarratingEmitter<D> {
    pub inner: D,
    pub program: String,
}

impl<D: DiagnosticEmitter> NarratingEmitter<D> {
    pub fn new(inner: D, program: impl Into<String>) -> Self {
        Self {
            inner,
            program: program.into(),
        }
    }

    fn narrate(&self, text: &str) -> std::io::Result<()> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            writeln!(stdin, "{text}")?;
        }

        child.wait()?;
        Ok(())
    }
}

impl<D: DiagnosticEmitter> DiagnosticEmitter for NarratingEmitter<D> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, sources: &SourceMap) {
        let text = diagnostic.message.clone();

        self.inner.emit_diagnostic(diagnostic, sources);

        if let Some(text) = text {
            let _ = self.narrate(&text);
        }
    }
}

#[cfg(test)]
mod tests {
    use prolix_session::diagnostics::{Diagnostic, DiagnosticEmitter};
    use prolix_session::sourcemap::SourceMap;

    use super::NarratingEmitter;

    #[test]
    fn missing_narrator_is_ignored() {
        let mut emitter = NarratingEmitter::new(Vec::<Diagnostic>::new(), "prolix-no-such-narrator");

        emitter.emit_diagnostic(
            Diagnostic::error().with_message("lonely variable"),
            &SourceMap::default(),
        );

        assert_eq!(emitter.inner.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn narrator_receives_messages() {
        let mut emitter = NarratingEmitter::new(Vec::<Diagnostic>::new(), "cat");

        emitter.emit_diagnostic(
            Diagnostic::warning().with_message("function numbered 3"),
            &SourceMap::default(),
        );
        emitter.emit_diagnostic(Diagnostic::error(), &SourceMap::default());

        assert!(emitter.narrate("read aloud").is_ok());
        assert_eq!(emitter.inner.len(), 2);
    }
}
