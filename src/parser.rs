use once_cell::sync::Lazy;
use regex::{Match, Matches, Regex};

use crate::block::{Line, NumberingCounter, Section, Span};

/// A header line: one or more `#`, a blank, then anything up to end of line.
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#+[ \t].*$").unwrap());

/// Leading ordinal of a numbered item together with the whitespace after it.
static NUMBERED_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Non-greedy `**bold**` span.
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// Split markdown into header lines and the body blocks between them.
pub fn sections(markdown: &str) -> Sections<'_> {
    let headers: &'static Regex = &HEADER_LINE;
    Sections {
        source: markdown,
        headers: headers.find_iter(markdown),
        cursor: 0,
        pending: None,
        done: false,
    }
}

/// Lazy iterator returned by [`sections`].
///
/// Header lines act as delimiters and are kept as their own elements. Body
/// blocks are yielded verbatim, so a block may be whitespace only; callers
/// decide whether to skip it.
pub struct Sections<'a> {
    source: &'a str,
    headers: Matches<'static, 'a>,
    cursor: usize,
    pending: Option<Match<'a>>,
    done: bool,
}

impl<'a> Iterator for Sections<'a> {
    type Item = Section<'a>;

    fn next(&mut self) -> Option<Section<'a>> {
        loop {
            if let Some(header) = self.pending.take() {
                self.cursor = header.end();
                return Some(parse_header(header.as_str()));
            }

            if self.done {
                return None;
            }

            match self.headers.next() {
                Some(header) => {
                    let body = &self.source[self.cursor..header.start()];
                    self.pending = Some(header);
                    if !body.is_empty() {
                        return Some(Section::Body(body));
                    }
                }
                None => {
                    self.done = true;
                    let rest = &self.source[self.cursor..];
                    if !rest.is_empty() {
                        return Some(Section::Body(rest));
                    }
                }
            }
        }
    }
}

/// `#` characters are trimmed from both ends of the line, so a closing
/// sequence such as `## Title ##` is dropped as well.
fn parse_header(line: &str) -> Section<'_> {
    let line = line.trim();
    let level = line.chars().take_while(|&c| c == '#').count();
    let text = line.trim_matches('#').trim();
    Section::Header { level, text }
}

/// Classify one body line.
///
/// The numbered check runs before the bullet check, so `1. - text` is a
/// numbered item with text `- text`. Only numbered items advance `counter`.
pub fn classify_line<'a>(line: &'a str, counter: &mut NumberingCounter) -> Line<'a> {
    let line = line.trim();

    if let Some(prefix) = NUMBERED_PREFIX.find(line) {
        return Line::Numbered {
            ordinal: counter.advance(),
            text: &line[prefix.end()..],
        };
    }

    if let Some(rest) = line.strip_prefix("- ") {
        return Line::Bullet { text: rest.trim() };
    }

    Line::Plain { text: line }
}

/// Split a line into plain and bold spans.
///
/// Unbalanced `**` stays in the surrounding plain text. Never returns an
/// empty vector.
pub fn tokenize_emphasis(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last_end = 0;

    for caps in BOLD.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last_end {
            spans.push(Span::Text(line[last_end..whole.start()].to_string()));
        }
        spans.push(Span::Bold(inner.as_str().to_string()));
        last_end = whole.end();
    }

    if last_end < line.len() {
        spans.push(Span::Text(line[last_end..].to_string()));
    }

    if spans.is_empty() {
        spans.push(Span::Text(line.to_string()));
    }

    spans
}
