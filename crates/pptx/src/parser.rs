//! PPTX file parser implementation.

use crate::package::{local_name, Package, Relationship};
use crate::slide::{parse_shapes, Slide};
use pptx_reader_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use std::io::{Read, Seek};

/// Content types of main parts that hold a slide list.
const PRESENTATION_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
    "application/vnd.ms-powerpoint.presentation.macroEnabled.main+xml",
    "application/vnd.openxmlformats-officedocument.presentationml.slideshow.main+xml",
    "application/vnd.ms-powerpoint.slideshow.macroEnabled.main+xml",
    "application/vnd.openxmlformats-officedocument.presentationml.template.main+xml",
    "application/vnd.ms-powerpoint.template.macroEnabled.main+xml",
];

/// A parsed presentation: its slides in native order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub slides: Vec<Slide>,
}

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Presentation> {
        let mut package = Package::open(reader)?;

        let presentation_part = package.presentation_part()?;
        ensure_presentation(&mut package, &presentation_part)?;
        let slide_order = self.get_slide_order(&mut package, &presentation_part)?;
        log::debug!("Found {} slides in {}", slide_order.len(), presentation_part);

        let mut slides = Vec::with_capacity(slide_order.len());
        for slide_path in slide_order {
            let content = package.read_part(&slide_path)?;
            let shapes = parse_shapes(&content)?;
            log::debug!("{}: {} shapes", slide_path, shapes.len());
            slides.push(Slide {
                part_name: slide_path,
                shapes,
            });
        }

        Ok(Presentation { slides })
    }

    /// Get the ordered list of slide part names.
    ///
    /// The order is that of `p:sldIdLst` in the presentation part, with each
    /// entry's relationship id resolved through the presentation's relationships.
    fn get_slide_order<R: Read + Seek>(
        &self,
        package: &mut Package<R>,
        presentation_part: &str,
    ) -> Result<Vec<String>> {
        let xml = package.read_part(presentation_part)?;
        let rel_ids = slide_rel_ids(&xml)?;
        if rel_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rels = package.relationships(presentation_part)?;
        rel_ids
            .iter()
            .map(|rel_id| {
                find_relationship(&rels, rel_id)
                    .map(|rel| rel.target.clone())
                    .ok_or_else(|| {
                        Error::CorruptedFile(format!(
                            "slide relationship '{}' not found in {}",
                            rel_id, presentation_part
                        ))
                    })
            })
            .collect()
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject packages whose main part is not a presentation (documents,
/// workbooks).
fn ensure_presentation<R: Read + Seek>(package: &mut Package<R>, part_name: &str) -> Result<()> {
    match package.content_type(part_name)? {
        Some(ct) if PRESENTATION_CONTENT_TYPES.contains(&ct.as_str()) => Ok(()),
        Some(ct) => Err(Error::UnsupportedFormat(format!(
            "not a PowerPoint file, content-type is '{}'",
            ct
        ))),
        None => Err(Error::UnsupportedFormat(format!(
            "not a PowerPoint file, no content type for '{}'",
            part_name
        ))),
    }
}

fn find_relationship<'a>(rels: &'a [Relationship], id: &str) -> Option<&'a Relationship> {
    rels.iter().find(|rel| rel.id == id)
}

/// Relationship ids of the `p:sldId` entries, in list order.
fn slide_rel_ids(xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut in_list = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                in_list = true;
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                in_list = false;
            }
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if in_list && local_name(e.name().as_ref()) == b"sldId" =>
            {
                // `id` is the numeric slide id; the relationship id is the
                // namespaced `r:id`.
                let rel_id = e
                    .attributes()
                    .flatten()
                    .find(|attr| {
                        let key = attr.key.as_ref();
                        key.contains(&b':') && local_name(key) == b"id"
                    })
                    .map(|attr| String::from_utf8_lossy(&attr.value).to_string());

                match rel_id {
                    Some(id) => ids.push(id),
                    None => log::warn!("Skipping sldId entry without a relationship id"),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}
