/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) => text,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, Span::Bold(_))
    }
}

/// Top-level segment of a Markdown source: a header line or the block of
/// text between two headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<'a> {
    Header {
        /// Number of leading `#` characters as written, not clamped.
        level: usize,
        text: &'a str,
    },
    Body(&'a str),
}

impl Section<'_> {
    /// True for body blocks holding nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Section::Header { .. } => false,
            Section::Body(text) => text.trim().is_empty(),
        }
    }
}

/// A classified body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `ordinal` is the position among numbered items in the current block,
    /// not the number written in the source.
    Numbered { ordinal: usize, text: &'a str },
    Bullet { text: &'a str },
    Plain { text: &'a str },
}

impl<'a> Line<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Line::Numbered { text, .. } | Line::Bullet { text } | Line::Plain { text } => text,
        }
    }
}

/// Running ordinal for numbered items within one body block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingCounter(usize);

impl NumberingCounter {
    pub fn new() -> Self {
        Self(1)
    }

    /// Returns the ordinal to display and advances the counter.
    pub fn advance(&mut self) -> usize {
        let current = self.0;
        self.0 += 1;
        current
    }

    pub fn peek(&self) -> usize {
        self.0
    }
}

impl Default for NumberingCounter {
    fn default() -> Self {
        Self::new()
    }
}
