//! In-memory `.pptx` packages for tests.

use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const NS_DECLS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// Builds a minimal presentation package.
#[derive(Debug, Default)]
pub struct PptxBuilder {
    slides: Vec<String>,
    order: Option<Vec<usize>>,
    without_root_rels: bool,
    omitted: HashSet<String>,
}

impl PptxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slide with one text box per entry. A `\n` inside an entry starts
    /// a new paragraph.
    pub fn slide(mut self, texts: &[&str]) -> Self {
        let shapes: String = texts
            .iter()
            .enumerate()
            .map(|(idx, text)| text_box(idx + 2, text))
            .collect();
        self.slides.push(slide_xml(&shapes));
        self
    }

    /// Add a slide whose `p:spTree` children are given verbatim.
    pub fn raw_slide(mut self, shape_tree: &str) -> Self {
        self.slides.push(slide_xml(shape_tree));
        self
    }

    /// List slides in the presentation in this order (indexes into the
    /// slides added so far) instead of the order they were added.
    pub fn order(mut self, order: &[usize]) -> Self {
        self.order = Some(order.to_vec());
        self
    }

    /// Leave out `_rels/.rels`.
    pub fn without_root_rels(mut self) -> Self {
        self.without_root_rels = true;
        self
    }

    /// Leave a part out of the archive.
    pub fn omit_part(mut self, part_name: &str) -> Self {
        self.omitted.insert(part_name.to_string());
        self
    }

    /// Assemble the package bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut parts: Vec<(String, String)> = vec![
            ("[Content_Types].xml".into(), self.content_types()),
            ("ppt/presentation.xml".into(), self.presentation()),
            (
                "ppt/_rels/presentation.xml.rels".into(),
                self.presentation_rels(),
            ),
        ];
        if !self.without_root_rels {
            parts.push(("_rels/.rels".into(), root_rels()));
        }
        for (idx, xml) in self.slides.iter().enumerate() {
            parts.push((format!("ppt/slides/slide{}.xml", idx + 1), xml.clone()));
        }

        for (name, content) in parts {
            if self.omitted.contains(&name) {
                continue;
            }
            zip.start_file(name, options).expect("start zip entry");
            zip.write_all(content.as_bytes()).expect("write zip entry");
        }

        zip.finish().expect("finish zip").into_inner()
    }

    fn slide_order(&self) -> Vec<usize> {
        self.order
            .clone()
            .unwrap_or_else(|| (0..self.slides.len()).collect())
    }

    fn content_types(&self) -> String {
        let overrides: String = (1..=self.slides.len())
            .map(|n| {
                format!(
                    r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                    n
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>{}</Types>"#,
            overrides
        )
    }

    fn presentation(&self) -> String {
        let ids: String = self
            .slide_order()
            .iter()
            .map(|idx| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + idx, idx + 2))
            .collect();
        let list = if ids.is_empty() {
            String::new()
        } else {
            format!("<p:sldIdLst>{}</p:sldIdLst>", ids)
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation {}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{}<p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
            NS_DECLS, list
        )
    }

    fn presentation_rels(&self) -> String {
        let slides: String = (0..self.slides.len())
            .map(|idx| {
                format!(
                    r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
                    idx + 2,
                    REL_SLIDE,
                    idx + 1
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>{}</Relationships>"#,
            slides
        )
    }
}

/// A minimal word-processing package: valid OOXML, but not a presentation.
pub fn docx_package() -> Vec<u8> {
    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#,
        ),
        (
            "word/document.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Dear reader</w:t></w:r></w:p></w:body></w:document>"#,
        ),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        zip.start_file(name, options).expect("start zip entry");
        zip.write_all(content.as_bytes()).expect("write zip entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

fn root_rels() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#
        .to_string()
}

fn slide_xml(shape_tree: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        NS_DECLS, shape_tree
    )
}

/// A `p:sp` text box holding `text`, one paragraph per line.
pub fn text_box(id: usize, text: &str) -> String {
    let paragraphs: String = text
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                "<a:p/>".to_string()
            } else {
                format!(
                    r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
                    escape(line)
                )
            }
        })
        .collect();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#,
        id = id,
        paragraphs = paragraphs
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
