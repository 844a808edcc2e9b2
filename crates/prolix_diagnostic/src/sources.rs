use std::path::{Path, PathBuf};

pub trait Sources {
    type SourceId: Copy + Eq + std::hash::Hash;
    type Source: Source;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>>;
}

pub trait Source {
    fn name_str(&self) -> &str;
    fn path(&self) -> Option<&Path>;

    fn source_str(&self) -> &str;
}

impl<S: Source> Sources for Vec<Cached<S>> {
    type SourceId = usize;
    type Source = S;

    fn get_source(&self, id: Self::SourceId) -> Option<&Cached<Self::Source>> {
        self.get(id)
    }
}

impl Source for (String, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn source_str(&self) -> &str {
        &self.1
    }
}

impl Source for (String, PathBuf, String) {
    fn name_str(&self) -> &str {
        &self.0
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.1)
    }

    fn source_str(&self) -> &str {
        &self.2
    }
}

/// A source together with the byte offsets where each of its lines start.
#[derive(Debug)]
pub struct Cached<S: Source> {
    source: S,
    line_starts: Vec<usize>,
}

impl<S: Source> Cached<S> {
    pub fn new(source: S) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .source_str()
                    .match_indices('\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        Self {
            source,
            line_starts,
        }
    }

    pub fn as_source(&self) -> &S {
        &self.source
    }

    /// The zero-based line containing `byte`. The end of the source is a valid position.
    pub fn line_index(&self, byte: usize) -> Option<usize> {
        if byte > self.source_str().len() {
            return None;
        }

        Some(self.line_starts.partition_point(|&start| start <= byte) - 1)
    }

    /// One-based line and column (in characters) of `byte`.
    pub fn line_col(&self, byte: usize) -> Option<(usize, usize)> {
        let line = self.line_index(byte)?;
        let line_start = self.line_start(line)?;

        let col = self.source_str().get(line_start..byte)?.chars().count();

        Some((line + 1, col + 1))
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    pub fn line_str(&self, line: usize) -> Option<&str> {
        let start = self.line_start(line)?;
        let end = self
            .line_start(line + 1)
            .map_or(self.source_str().len(), |next| next - 1);

        let s = &self.source_str()[start..end];
        Some(s.strip_suffix('\r').unwrap_or(s))
    }

    pub fn num_lines(&self) -> usize {
        self.line_starts.len()
    }
}

impl<S: Source> Source for Cached<S> {
    fn name_str(&self) -> &str {
        self.source.name_str()
    }

    fn path(&self) -> Option<&Path> {
        self.source.path()
    }

    fn source_str(&self) -> &str {
        self.source.source_str()
    }
}

#[cfg(test)]
mod tests {
    use super::Cached;

    fn cached_str(s: impl Into<String>) -> Cached<(String, String)> {
        Cached::new(("sample".to_owned(), s.into()))
    }

    #[test]
    fn line_index() {
        let cached = cached_str("");
        assert_eq!(cached.line_index(0), Some(0));
        assert_eq!(cached.line_index(1), None);

        let cached = cached_str("x\n");
        assert_eq!(cached.line_index(0), Some(0));
        assert_eq!(cached.line_index(1), Some(0));
        assert_eq!(cached.line_index(2), Some(1));
        assert_eq!(cached.line_index(3), None);

        let cached = cached_str("\nx");
        assert_eq!(cached.line_index(0), Some(0));
        assert_eq!(cached.line_index(1), Some(1));
        assert_eq!(cached.line_index(2), Some(1));
    }

    #[test]
    fn line_col_counts_characters() {
        let cached = cached_str("return\nzéro period");
        assert_eq!(cached.line_col(0), Some((1, 1)));
        assert_eq!(cached.line_col(7), Some((2, 1)));

        // `é` is two bytes but one column
        let period = "return\nzéro ".len();
        assert_eq!(cached.line_col(period), Some((2, 6)));
    }

    #[test]
    fn line_str() {
        let cached = cached_str("");
        assert_eq!(cached.line_str(0), Some(""));
        assert_eq!(cached.line_str(1), None);

        let cached = cached_str("x\r\ny\n");
        assert_eq!(cached.num_lines(), 3);
        assert_eq!(cached.line_str(0), Some("x"));
        assert_eq!(cached.line_str(1), Some("y"));
        assert_eq!(cached.line_str(2), Some(""));
        assert_eq!(cached.line_str(3), None);
    }
}
