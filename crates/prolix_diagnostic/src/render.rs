use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::sources::{Cached, Source, Sources};
use super::{Config, Diagnostic, Severity, Snippet, SnippetKind};

const TAB: &str = "    ";

impl<S: Sources> Diagnostic<S> {
    pub fn write_to_stream(
        &self,
        sources: &S,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            sources,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor, S: Sources> {
    diagnostic: &'a Diagnostic<S>,
    sources: &'a S,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor, S: Sources> DiagnosticWriter<'_, 'a, W, S> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        for snippet in &self.diagnostic.snippets {
            // snippets pointing at unknown sources are skipped rather than aborting the report
            if let Some(source) = self.sources.get_source(snippet.source_id) {
                self.draw_snippet(source, snippet)?;
            }
        }

        for note in &self.diagnostic.notes {
            self.stream.set_color(&self.config.emphasis)?;
            write!(self.stream, "note:")?;
            self.stream.reset()?;
            writeln!(self.stream, " {note}")?;
        }

        writeln!(self.stream)
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.primary_color())?;

        if let Some(id) = &self.diagnostic.id {
            write!(self.stream, "[{id}] ")?;
        }

        write!(self.stream, "{}:", self.diagnostic.severity.as_str())?;

        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, " {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_snippet(&mut self, source: &Cached<S::Source>, snippet: &Snippet<S>) -> io::Result<()> {
        let len = source.source_str().len();
        let start = snippet.span.start.min(len);
        let end = snippet.span.end.clamp(start, len);

        let (line_num, col_num) = source.line_col(start).expect("position in bounds");

        self.stream.set_color(&self.config.subtle)?;
        write!(self.stream, "In {}:{line_num}:{col_num}", source.name_str())?;
        if let Some(path) = source.path() {
            write!(self.stream, " ({}:{line_num}:{col_num})", path.display())?;
        }
        writeln!(self.stream)?;
        self.stream.reset()?;

        // the last byte of the span decides its last line, so a span ending with a
        // newline doesn't drag the next line in
        let first_line = source.line_index(start).expect("position in bounds");
        let last_line = source
            .line_index(end.saturating_sub(1).max(start))
            .expect("position in bounds");

        let shown_start = first_line.saturating_sub(self.config.context_size);
        let shown_end = (last_line + self.config.context_size + 1).min(source.num_lines());

        let gutter_width = shown_end.to_string().len();

        for line in shown_start..shown_end {
            let line_str = source.line_str(line).expect("line in bounds");

            self.draw_gutter(Some(line + 1), gutter_width)?;
            if line_str.is_empty() {
                writeln!(self.stream)?;
            } else {
                writeln!(self.stream, " {}", line_str.replace('\t', TAB))?;
            }

            if (first_line..=last_line).contains(&line) {
                let line_start = source.line_start(line).expect("line in bounds");
                let line_end = line_start + line_str.len();

                let underline_start = start.max(line_start) - line_start;
                let underline_end = end.min(line_end).max(start.max(line_start)) - line_start;

                let label = (line == last_line).then_some(snippet.label.as_str());
                self.draw_underline(snippet.kind, line_str, underline_start..underline_end, label, gutter_width)?;
            }
        }

        Ok(())
    }

    fn draw_underline(
        &mut self,
        kind: SnippetKind,
        line_str: &str,
        range: std::ops::Range<usize>,
        label: Option<&str>,
        gutter_width: usize,
    ) -> io::Result<()> {
        let offset = str_width(&line_str[..range.start]);
        let width = str_width(&line_str[range]).max(1);

        self.draw_gutter(None, gutter_width)?;

        self.stream.set_color(self.snippet_color(kind))?;
        write!(
            self.stream,
            " {:offset$}{}",
            "",
            self.config.underline.repeat(width)
        )?;

        match label {
            Some(label) if !label.is_empty() => writeln!(self.stream, " {label}")?,
            _ => writeln!(self.stream)?,
        }

        self.stream.reset()
    }

    fn draw_gutter(&mut self, line: Option<usize>, width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.subtle)?;

        match line {
            Some(line) => write!(self.stream, "{line:>width$} {}", self.config.gutter)?,
            None => write!(self.stream, "{:>width$} {}", "", self.config.gutter)?,
        }

        self.stream.reset()
    }

    fn primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.severity {
            Severity::Warning => &self.config.warning_color,
            Severity::Error => &self.config.error_color,
        }
    }

    fn snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.primary_color(),
            SnippetKind::Secondary => &self.config.emphasis,
        }
    }
}

fn str_width(s: &str) -> usize {
    let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
    s.width() + num_tabs * TAB.len()
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use crate::sources::{Cached, Sources};
    use crate::{Config, Diagnostic, Snippet};

    #[must_use]
    fn diagnostic_to_string<S: Sources>(diagnostic: &Diagnostic<S>, sources: &S) -> String {
        let config = Config::default();
        let mut stream = NoColor::new(vec![]);

        diagnostic
            .write_to_stream(sources, &config, &mut stream)
            .unwrap();

        String::from_utf8(stream.into_inner()).unwrap()
    }

    fn sources(source: &str) -> Vec<Cached<(String, String)>> {
        vec![Cached::new(("sample".to_owned(), source.to_owned()))]
    }

    #[test]
    fn single_line_snippet() {
        let source = "return 1 period\nreturn oops period\nreturn 3 period";
        let start = source.find("oops").unwrap();

        let diagnostic = Diagnostic::error()
            .with_id("parse-error")
            .with_message("expected an expression, found identifier")
            .with_snippet(Snippet::primary("here", 0, start..start + 4))
            .with_note("statements end with `period` or `semicolon`");

        insta::assert_snapshot!(diagnostic_to_string(&diagnostic, &sources(source)), @r###"
        [parse-error] Error: expected an expression, found identifier
        In sample:2:8
        1 │ return 1 period
        2 │ return oops period
          │        ^^^^ here
        3 │ return 3 period
        note: statements end with `period` or `semicolon`
        "###);
    }

    #[test]
    fn multiline_snippet_labels_last_line() {
        let source = "aaa\nbbbb\ncc";

        let diagnostic = Diagnostic::warning()
            .with_message("spans lines")
            .with_snippet(Snippet::primary("these", 0, 1..6));

        insta::assert_snapshot!(diagnostic_to_string(&diagnostic, &sources(source)), @r###"
        Warning: spans lines
        In sample:1:2
        1 │ aaa
          │  ^^
        2 │ bbbb
          │ ^^ these
        3 │ cc
        "###);
    }

    #[test]
    fn message_only() {
        let diagnostic = Diagnostic::error()
            .with_id("injected-failure")
            .with_message("compilation failed");

        let output = diagnostic_to_string(&diagnostic, &sources(""));
        assert_eq!(output, "[injected-failure] Error: compilation failed\n\n");
    }
}
