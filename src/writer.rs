use tracing::debug;

use crate::block::{Line, NumberingCounter, Section};
use crate::document::{Alignment, Document, ParagraphStyle};
use crate::parser::{classify_line, sections, tokenize_emphasis};

/// Marker appended to bullet items. It is the last run because the paragraph
/// reads right to left, so it renders first.
const BULLET_MARKER: &str = "•";

/// Build a right-to-left document from markdown.
pub fn markdown_to_document(markdown: &str) -> Document {
    let mut doc = Document::new();

    for section in sections(markdown) {
        if section.is_blank() {
            continue;
        }

        match section {
            Section::Header { level, text } => emit_header(&mut doc, level, text),
            Section::Body(body) => emit_body(&mut doc, body),
        }
    }

    debug!(paragraphs = doc.paragraphs.len(), "built document");
    doc
}

fn emit_header(doc: &mut Document, level: usize, text: &str) {
    if doc.title.is_none() && !text.is_empty() {
        doc.title = Some(text.to_string());
    }

    let paragraph = doc.add_paragraph(ParagraphStyle::heading(level));
    paragraph.add_run(text, false);
    paragraph.alignment = Some(Alignment::Right);
    paragraph.set_rtl();
}

/// Emit every non-empty line of a body block. Numbering restarts at 1 for
/// each block.
fn emit_body(doc: &mut Document, body: &str) {
    let mut counter = NumberingCounter::new();
    let mut emitted = 0usize;

    for line in body.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        emit_line(doc, classify_line(line, &mut counter));
        emitted += 1;
    }

    debug!(
        lines = emitted,
        numbered = counter.peek() - 1,
        "emitted body block"
    );
}

fn emit_line(doc: &mut Document, line: Line<'_>) {
    let (style, marker) = match line {
        Line::Numbered { ordinal, .. } => (ParagraphStyle::NumberedList, Some(format!(".{ordinal}"))),
        Line::Bullet { .. } => (ParagraphStyle::BulletList, Some(BULLET_MARKER.to_string())),
        Line::Plain { .. } => (ParagraphStyle::Body, None),
    };

    let paragraph = doc.add_paragraph(style);
    for span in tokenize_emphasis(line.text()) {
        // List runs are padded so the words stay apart from the marker.
        let text = if marker.is_some() {
            format!("{} ", span.text())
        } else {
            span.text().to_string()
        };
        paragraph.add_run(text, span.is_bold());
    }

    if let Some(marker) = marker {
        paragraph.add_run(marker, false);
    }

    // After the marker run, so it is flagged too.
    paragraph.set_rtl();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Paragraph, Run};

    fn run(text: &str, bold: bool) -> Run {
        Run {
            text: text.to_string(),
            bold,
            rtl: true,
        }
    }

    fn run_texts(paragraph: &Paragraph) -> Vec<&str> {
        paragraph.runs.iter().map(|run| run.text.as_str()).collect()
    }

    #[test]
    fn header_paragraph() {
        let doc = markdown_to_document("## Attractions");
        assert_eq!(doc.paragraphs.len(), 1);

        let heading = &doc.paragraphs[0];
        assert_eq!(heading.style, ParagraphStyle::Heading(2));
        assert_eq!(heading.alignment, Some(Alignment::Right));
        assert!(heading.bidi);
        assert_eq!(heading.runs, vec![run("Attractions", false)]);
    }

    #[test]
    fn deep_header_uses_heading_nine() {
        let doc = markdown_to_document("############ Too deep");
        assert_eq!(doc.paragraphs[0].style, ParagraphStyle::Heading(9));
        assert_eq!(doc.paragraphs[0].text(), "Too deep");
    }

    #[test]
    fn header_bold_markers_are_kept_literally() {
        let doc = markdown_to_document("# **Title**");
        assert_eq!(doc.paragraphs[0].runs, vec![run("**Title**", false)]);
    }

    #[test]
    fn round_trip_scenario() {
        let doc = markdown_to_document("# Title\n\n1. **First** item\n2. Second item\n- A bullet\n");
        assert_eq!(doc.title.as_deref(), Some("Title"));
        assert_eq!(doc.paragraphs.len(), 4);

        assert_eq!(doc.paragraphs[0].style, ParagraphStyle::Heading(1));
        assert_eq!(run_texts(&doc.paragraphs[0]), vec!["Title"]);

        let first = &doc.paragraphs[1];
        assert_eq!(first.style, ParagraphStyle::NumberedList);
        assert_eq!(
            first.runs,
            vec![run("First ", true), run(" item ", false), run(".1", false)]
        );

        let second = &doc.paragraphs[2];
        assert_eq!(second.style, ParagraphStyle::NumberedList);
        assert_eq!(
            second.runs,
            vec![run("Second item ", false), run(".2", false)]
        );

        let bullet = &doc.paragraphs[3];
        assert_eq!(bullet.style, ParagraphStyle::BulletList);
        assert_eq!(bullet.runs, vec![run("A bullet ", false), run("•", false)]);
    }

    #[test]
    fn bold_bullet_has_no_leading_plain_run() {
        let doc = markdown_to_document("- **Paris**");
        assert_eq!(
            doc.paragraphs[0].runs,
            vec![run("Paris ", true), run("•", false)]
        );
    }

    #[test]
    fn plain_paragraph_runs_are_not_padded() {
        let doc = markdown_to_document("Visit **Haifa** today");
        let paragraph = &doc.paragraphs[0];
        assert_eq!(paragraph.style, ParagraphStyle::Body);
        assert_eq!(paragraph.alignment, None);
        assert_eq!(
            paragraph.runs,
            vec![run("Visit ", false), run("Haifa", true), run(" today", false)]
        );
    }

    #[test]
    fn unbalanced_bold_is_one_plain_run() {
        let doc = markdown_to_document("Cost is **50 per person");
        assert_eq!(
            doc.paragraphs[0].runs,
            vec![run("Cost is **50 per person", false)]
        );
    }

    #[test]
    fn ordinals_follow_position_not_source_digits() {
        let doc = markdown_to_document("5. First\n2. Second");
        assert_eq!(doc.paragraphs[0].runs.last(), Some(&run(".1", false)));
        assert_eq!(doc.paragraphs[1].runs.last(), Some(&run(".2", false)));
    }

    #[test]
    fn numbering_restarts_per_block() {
        let doc = markdown_to_document("1. a\n2. b\n# Break\n1. c\nplain\n7. d");
        let markers: Vec<&str> = doc
            .paragraphs
            .iter()
            .filter(|p| p.style == ParagraphStyle::NumberedList)
            .filter_map(|p| p.runs.last())
            .map(|run| run.text.as_str())
            .collect();
        assert_eq!(markers, vec![".1", ".2", ".1", ".2"]);
    }

    #[test]
    fn every_paragraph_and_run_is_rtl() {
        let doc = markdown_to_document("# H\ntext **b**\n- x\n1. y\n### H3\n- **z**");
        assert!(!doc.paragraphs.is_empty());
        for paragraph in &doc.paragraphs {
            assert!(paragraph.bidi);
            assert!(paragraph.runs.iter().all(|run| run.rtl));
        }
    }

    #[test]
    fn blank_lines_and_blocks_are_skipped() {
        let doc = markdown_to_document("\n\n   \n# A\n\n\n# B\n  \n");
        assert_eq!(doc.paragraphs.len(), 2);
    }

    #[test]
    fn empty_numbered_item_still_gets_marker() {
        let doc = markdown_to_document("3.");
        assert_eq!(doc.paragraphs[0].runs, vec![run(" ", false), run(".1", false)]);
    }

    #[test]
    fn title_is_first_header() {
        let doc = markdown_to_document("intro\n# First\n# Second");
        assert_eq!(doc.title.as_deref(), Some("First"));
        assert_eq!(markdown_to_document("no headers").title, None);
    }
}
