use thiserror::Error;

/// Compact byte-span used across the front-end.
///
/// Offsets are `u32`; inputs past 4GiB are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32, // exclusive
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        let s = if start > u32::MAX as usize {
            u32::MAX
        } else {
            start as u32
        };
        let e = if end > u32::MAX as usize {
            u32::MAX
        } else {
            end as u32
        };
        Self { start: s, end: e }
    }

    #[inline]
    pub const fn empty_at(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    #[inline]
    pub const fn single_at(pos: usize) -> Self {
        Self::new(pos, pos.saturating_add(1))
    }

    pub const fn from_range(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub const fn to(self, other: Span) -> Span {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }

    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Maps byte offsets to 1-based line/column pairs.
///
/// Columns count chars, not bytes. `\r\n`, `\n` and a lone `\r` all end a line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(src: &str) -> Self {
        let bytes = src.as_bytes();
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push((i + 1) as u32),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => line_starts.push((i + 1) as u32),
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    pub fn line_col(&self, src: &str, offset: u32) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(l) => l,
            Err(l) => l - 1,
        };
        let start = self.line_starts[line] as usize;
        let end = (offset as usize).min(src.len());
        let col = src
            .get(start..end)
            .map_or(end.saturating_sub(start), |s| s.chars().count());
        (line + 1, col + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagKind {
    Lex,
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub kind: DiagKind,
    pub span: Span,
    pub message: String,
}

impl Diag {
    /// `line:col: message`, resolved against the source the diag came from.
    pub fn render(&self, src: &str, index: &LineIndex) -> String {
        let (line, col) = index.line_col(src, self.span.start);
        format!("{line}:{col}: {}", self.message)
    }
}

/// Outcome of a resilient parse that recorded at least one diagnostic.
#[derive(Debug)]
pub struct ParseFailure {
    pub partial: Option<crate::parser::ParsedFile>,
    pub diags: Vec<Diag>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid numeric literal")]
    InvalidNumber,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid rune literal")]
    InvalidRune,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated rune literal")]
    UnterminatedRune,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("byte order mark only allowed at start of file")]
    MisplacedBom,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[inline]
    pub fn diag(&self) -> Diag {
        Diag {
            kind: DiagKind::Lex,
            span: self.span,
            message: self.kind.to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct ParseError {
    pub span: Span,
    pub expected: String,
    pub found: String,
}

impl ParseError {
    pub fn new(span: Span, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    #[inline]
    pub fn diag(&self) -> Diag {
        Diag {
            kind: DiagKind::Parse,
            span: self.span,
            message: self.to_string(),
        }
    }
}

/// Any failure surfaced by the scanner or the parser.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Error::Lex(e) => e.span,
            Error::Parse(e) => e.span,
        }
    }

    pub fn diag(&self) -> Diag {
        match self {
            Error::Lex(e) => e.diag(),
            Error::Parse(e) => e.diag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_handles_all_newline_styles() {
        let src = "a\nbc\r\nd\re";
        let idx = LineIndex::new(src);
        assert_eq!(idx.line_col(src, 0), (1, 1));
        assert_eq!(idx.line_col(src, 3), (2, 2));
        assert_eq!(idx.line_col(src, 6), (3, 1));
        assert_eq!(idx.line_col(src, 8), (4, 1));
    }

    #[test]
    fn line_col_counts_chars() {
        let src = "ñx";
        let idx = LineIndex::new(src);
        assert_eq!(idx.line_col(src, 2), (1, 2));
    }

    #[test]
    fn parse_error_message() {
        let e = ParseError::new(Span::new(3, 4), "`;`", "`)`");
        assert_eq!(e.to_string(), "expected `;`, found `)`");
        assert_eq!(Error::from(e).span(), Span::new(3, 4));
    }
}
