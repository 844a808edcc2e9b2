use prolix_session::diagnostics::prelude::*;

#[derive(Debug, serde::Serialize)]
pub struct LayoutError {
    pub kind: LayoutErrorKind,
    pub span: Span,
}

#[derive(serde::Serialize, thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutErrorKind {
    #[error("line starts with whitespace")]
    IndentedLine,

    #[error("empty line")]
    EmptyLine,
}

impl IntoDiagnostic<SourceId> for LayoutError {
    fn into_diagnostic(self, &source_id: &SourceId) -> Diagnostic {
        Diagnostic::error()
            .with_id("layout-error")
            .with_message("source isn't laid out strictly")
            .with_snippet(Snippet::primary(
                self.kind.to_string(),
                source_id,
                self.span,
            ))
            .with_note("strict layout forbids indentation and blank lines")
    }
}

/// Rejects indented and empty lines. A final newline doesn't start a new line.
pub fn check_layout(source: &str) -> Result<(), LayoutError> {
    let mut line_start = 0;

    for line in source.split_inclusive('\n') {
        let content = line.trim_end_matches('\n');
        let content = content.strip_suffix('\r').unwrap_or(content);

        if content.is_empty() {
            return Err(LayoutError {
                kind: LayoutErrorKind::EmptyLine,
                span: Span::empty(line_start),
            });
        }

        let indent = content.len() - content.trim_start().len();
        if indent > 0 {
            return Err(LayoutError {
                kind: LayoutErrorKind::IndentedLine,
                span: Span::new(line_start, line_start + indent),
            });
        }

        line_start += line.len();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use prolix_diagnostic::span::Span;

    use super::{check_layout, LayoutErrorKind};

    #[test]
    fn flush_lines_pass() {
        assert!(check_layout("").is_ok());
        assert!(check_layout("return 0 period\nreturn 1 period\n").is_ok());
        assert!(check_layout("a\r\nb").is_ok());
    }

    #[test]
    fn indented_line() {
        let err = check_layout("a\n\t  b\n").unwrap_err();
        assert_eq!(err.kind, LayoutErrorKind::IndentedLine);
        assert_eq!(err.span, Span::new(2, 5));
    }

    #[test]
    fn empty_line() {
        let err = check_layout("a\n\nb").unwrap_err();
        assert_eq!(err.kind, LayoutErrorKind::EmptyLine);
        assert_eq!(err.span, Span::empty(2));

        let err = check_layout("a\n \n").unwrap_err();
        assert_eq!(err.kind, LayoutErrorKind::IndentedLine);
    }
}
