/// Highest heading level with a built-in style.
pub const MAX_HEADING_LEVEL: u8 = 9;

/// Paragraph styles emitted by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    /// Right-to-left body text.
    Body,
    BulletList,
    NumberedList,
    Heading(u8),
}

impl ParagraphStyle {
    /// Heading style for a level as written in the source, clamped to 1..=9.
    pub fn heading(level: usize) -> Self {
        let level = level.clamp(1, MAX_HEADING_LEVEL as usize) as u8;
        ParagraphStyle::Heading(level)
    }

    /// Identifier referenced from `w:pStyle`.
    pub fn style_id(&self) -> String {
        match self {
            ParagraphStyle::Body => "RTL".to_string(),
            ParagraphStyle::BulletList => "RTLList".to_string(),
            ParagraphStyle::NumberedList => "RTLNumberList".to_string(),
            ParagraphStyle::Heading(level) => format!("Heading{level}"),
        }
    }

    /// Display name shown in the word processor's style gallery.
    pub fn name(&self) -> String {
        match self {
            ParagraphStyle::Body => "RTL".to_string(),
            ParagraphStyle::BulletList => "RTL List".to_string(),
            ParagraphStyle::NumberedList => "RTL Number List".to_string(),
            ParagraphStyle::Heading(level) => format!("heading {level}"),
        }
    }

    /// Every style the converter can reference, in the order they are declared.
    pub fn all() -> Vec<ParagraphStyle> {
        let mut styles = vec![
            ParagraphStyle::Body,
            ParagraphStyle::BulletList,
            ParagraphStyle::NumberedList,
        ];
        styles.extend((1..=MAX_HEADING_LEVEL).map(ParagraphStyle::Heading));
        styles
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A run of uniformly formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub rtl: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    /// Direct alignment. `None` inherits from the style.
    pub alignment: Option<Alignment>,
    pub bidi: bool,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            alignment: None,
            bidi: false,
            runs: Vec::new(),
        }
    }

    pub fn add_run(&mut self, text: impl Into<String>, bold: bool) -> &mut Run {
        self.runs.push(Run {
            text: text.into(),
            bold,
            rtl: false,
        });
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// Flag the paragraph and every run it holds right-to-left.
    ///
    /// Runs appended afterwards are not flagged.
    pub fn set_rtl(&mut self) {
        self.bidi = true;
        for run in &mut self.runs {
            run.rtl = true;
        }
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// In-memory word-processing document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Stored in the package core properties.
    pub title: Option<String>,
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_paragraph(&mut self, style: ParagraphStyle) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new(style));
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }
}
