mod block;
mod config;
mod document;
mod docx;
mod error;
mod parser;
mod writer;

pub use block::{Line, NumberingCounter, Section, Span};
pub use config::{Config, LogConfig, PathsConfig};
pub use document::{Alignment, Document, Paragraph, ParagraphStyle, Run, MAX_HEADING_LEVEL};
pub use docx::write_docx;
pub use error::{Error, Result};
pub use parser::{Sections, classify_line, sections, tokenize_emphasis};
pub use writer::markdown_to_document;

/// Convert markdown to `.docx` bytes.
pub fn markdown_to_docx(markdown: &str) -> Result<Vec<u8>> {
    let doc = markdown_to_document(markdown);
    write_docx(&doc)
}
