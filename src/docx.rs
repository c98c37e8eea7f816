use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::{Alignment, Document, Paragraph, ParagraphStyle, Run};
use crate::error::Result;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CT_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Quarter inch, in twentieths of a point.
const LIST_INDENT_TWIPS: &str = "360";

/// Heading font sizes in half-points, indexed by level - 1.
const HEADING_SIZES: [u32; 9] = [32, 28, 26, 24, 22, 22, 22, 20, 20];

const CREATOR: &str = "rtl-docx";

type XmlWriter = Writer<Vec<u8>>;
type XmlResult = std::result::Result<(), quick_xml::Error>;

/// Package a document as `.docx` bytes.
pub fn write_docx(doc: &Document) -> Result<Vec<u8>> {
    let parts: [(&str, Vec<u8>); 8] = [
        ("[Content_Types].xml", content_types_xml()?),
        ("_rels/.rels", package_rels_xml()?),
        ("docProps/core.xml", core_props_xml(doc)?),
        ("docProps/app.xml", app_props_xml()?),
        ("word/document.xml", document_xml(doc)?),
        ("word/styles.xml", styles_xml()?),
        ("word/settings.xml", settings_xml()?),
        ("word/_rels/document.xml.rels", document_rels_xml()?),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in &parts {
        debug!(part = *name, bytes = bytes.len(), "writing part");
        zip.start_file(*name, options)?;
        zip.write_all(bytes)?;
    }

    let bytes = zip.finish()?.into_inner();
    info!(
        paragraphs = doc.paragraphs.len(),
        bytes = bytes.len(),
        "packaged docx"
    );
    Ok(bytes)
}

fn new_writer() -> std::result::Result<XmlWriter, quick_xml::Error> {
    let mut w = Writer::new(Vec::new());
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(w)
}

fn start(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> XmlResult {
    let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
    w.write_event(Event::Start(elem))
}

fn end(w: &mut XmlWriter, name: &str) -> XmlResult {
    w.write_event(Event::End(BytesEnd::new(name)))
}

fn empty(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> XmlResult {
    let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
    w.write_event(Event::Empty(elem))
}

fn text_element(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)], text: &str) -> XmlResult {
    start(w, name, attrs)?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, name)
}

fn content_types_xml() -> Result<Vec<u8>> {
    let mut w = new_writer()?;
    start(&mut w, "Types", &[("xmlns", CT_NS)])?;
    empty(
        &mut w,
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    empty(
        &mut w,
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;

    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/settings.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    for (part, content_type) in overrides {
        empty(
            &mut w,
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    end(&mut w, "Types")?;
    Ok(w.into_inner())
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
    let mut w = new_writer()?;
    start(&mut w, "Relationships", &[("xmlns", REL_NS)])?;
    for &(id, kind, target) in rels {
        empty(
            &mut w,
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    end(&mut w, "Relationships")?;
    Ok(w.into_inner())
}

fn package_rels_xml() -> Result<Vec<u8>> {
    let office_document = format!("{REL_TYPE}/officeDocument");
    let extended = format!("{REL_TYPE}/extended-properties");
    relationships_xml(&[
        ("rId1", office_document.as_str(), "word/document.xml"),
        (
            "rId2",
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            "docProps/core.xml",
        ),
        ("rId3", extended.as_str(), "docProps/app.xml"),
    ])
}

fn document_rels_xml() -> Result<Vec<u8>> {
    let styles = format!("{REL_TYPE}/styles");
    let settings = format!("{REL_TYPE}/settings");
    relationships_xml(&[
        ("rId1", styles.as_str(), "styles.xml"),
        ("rId2", settings.as_str(), "settings.xml"),
    ])
}

fn core_props_xml(doc: &Document) -> Result<Vec<u8>> {
    let mut w = new_writer()?;
    start(
        &mut w,
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
        ],
    )?;
    if let Some(title) = &doc.title {
        text_element(&mut w, "dc:title", &[], title)?;
    }
    text_element(&mut w, "dc:creator", &[], CREATOR)?;
    end(&mut w, "cp:coreProperties")?;
    Ok(w.into_inner())
}

fn app_props_xml() -> Result<Vec<u8>> {
    let mut w = new_writer()?;
    start(
        &mut w,
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    text_element(&mut w, "Application", &[], CREATOR)?;
    end(&mut w, "Properties")?;
    Ok(w.into_inner())
}

fn settings_xml() -> Result<Vec<u8>> {
    let mut w = new_writer()?;
    start(&mut w, "w:settings", &[("xmlns:w", W_NS)])?;
    empty(&mut w, "w:defaultTabStop", &[("w:val", "720")])?;
    empty(&mut w, "w:compat", &[])?;
    end(&mut w, "w:settings")?;
    Ok(w.into_inner())
}

fn document_xml(doc: &Document) -> Result<Vec<u8>> {
    let mut w = new_writer()?;
    start(&mut w, "w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
    start(&mut w, "w:body", &[])?;

    for paragraph in &doc.paragraphs {
        write_paragraph(&mut w, paragraph)?;
    }

    // US Letter, one inch margins, right-to-left section.
    start(&mut w, "w:sectPr", &[])?;
    empty(&mut w, "w:pgSz", &[("w:w", "12240"), ("w:h", "15840")])?;
    empty(
        &mut w,
        "w:pgMar",
        &[
            ("w:top", "1440"),
            ("w:right", "1440"),
            ("w:bottom", "1440"),
            ("w:left", "1440"),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    empty(&mut w, "w:bidi", &[])?;
    end(&mut w, "w:sectPr")?;

    end(&mut w, "w:body")?;
    end(&mut w, "w:document")?;
    Ok(w.into_inner())
}

fn write_paragraph(w: &mut XmlWriter, paragraph: &Paragraph) -> XmlResult {
    start(w, "w:p", &[])?;

    start(w, "w:pPr", &[])?;
    empty(w, "w:pStyle", &[("w:val", paragraph.style.style_id().as_str())])?;
    if paragraph.bidi {
        empty(w, "w:bidi", &[])?;
    }
    if let Some(alignment) = paragraph.alignment {
        empty(w, "w:jc", &[("w:val", alignment.as_str())])?;
    }
    end(w, "w:pPr")?;

    for run in &paragraph.runs {
        write_run(w, run)?;
    }

    end(w, "w:p")
}

fn write_run(w: &mut XmlWriter, run: &Run) -> XmlResult {
    start(w, "w:r", &[])?;

    if run.bold || run.rtl {
        start(w, "w:rPr", &[])?;
        if run.bold {
            empty(w, "w:b", &[])?;
            // Complex-script bold, used for Hebrew and Arabic glyphs.
            empty(w, "w:bCs", &[])?;
        }
        if run.rtl {
            empty(w, "w:rtl", &[])?;
        }
        end(w, "w:rPr")?;
    }

    text_element(w, "w:t", &[("xml:space", "preserve")], &run.text)?;
    end(w, "w:r")
}

fn styles_xml() -> Result<Vec<u8>> {
    let mut w = new_writer()?;
    start(&mut w, "w:styles", &[("xmlns:w", W_NS)])?;

    start(&mut w, "w:docDefaults", &[])?;
    start(&mut w, "w:rPrDefault", &[])?;
    start(&mut w, "w:rPr", &[])?;
    empty(&mut w, "w:sz", &[("w:val", "22")])?;
    empty(&mut w, "w:szCs", &[("w:val", "22")])?;
    end(&mut w, "w:rPr")?;
    end(&mut w, "w:rPrDefault")?;
    end(&mut w, "w:docDefaults")?;

    start(
        &mut w,
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    empty(&mut w, "w:name", &[("w:val", "Normal")])?;
    empty(&mut w, "w:qFormat", &[])?;
    end(&mut w, "w:style")?;

    for style in ParagraphStyle::all() {
        write_style(&mut w, style)?;
    }

    end(&mut w, "w:styles")?;
    Ok(w.into_inner())
}

fn write_style(w: &mut XmlWriter, style: ParagraphStyle) -> XmlResult {
    let id = style.style_id();
    let name = style.name();
    start(w, "w:style", &[("w:type", "paragraph"), ("w:styleId", id.as_str())])?;
    empty(w, "w:name", &[("w:val", name.as_str())])?;
    empty(w, "w:basedOn", &[("w:val", "Normal")])?;
    empty(w, "w:next", &[("w:val", "Normal")])?;
    empty(w, "w:qFormat", &[])?;

    start(w, "w:pPr", &[])?;
    match style {
        ParagraphStyle::Heading(level) => {
            empty(w, "w:keepNext", &[])?;
            empty(w, "w:spacing", &[("w:before", "240"), ("w:after", "60")])?;
            empty(w, "w:bidi", &[])?;
            let outline = (level - 1).to_string();
            empty(w, "w:outlineLvl", &[("w:val", outline.as_str())])?;
        }
        ParagraphStyle::BulletList | ParagraphStyle::NumberedList => {
            empty(w, "w:bidi", &[])?;
            empty(
                w,
                "w:ind",
                &[("w:left", LIST_INDENT_TWIPS), ("w:hanging", LIST_INDENT_TWIPS)],
            )?;
            empty(w, "w:jc", &[("w:val", Alignment::Right.as_str())])?;
        }
        ParagraphStyle::Body => {
            empty(w, "w:bidi", &[])?;
            empty(w, "w:jc", &[("w:val", Alignment::Right.as_str())])?;
        }
    }
    end(w, "w:pPr")?;

    start(w, "w:rPr", &[])?;
    if let ParagraphStyle::Heading(level) = style {
        let size = HEADING_SIZES[usize::from(level - 1)].to_string();
        empty(w, "w:b", &[])?;
        empty(w, "w:bCs", &[])?;
        empty(w, "w:sz", &[("w:val", size.as_str())])?;
        empty(w, "w:szCs", &[("w:val", size.as_str())])?;
    }
    empty(w, "w:rtl", &[])?;
    end(w, "w:rPr")?;

    end(w, "w:style")
}
