//! OPC package access: parts and relationships inside the ZIP container.

use pptx_reader_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Relationship type suffix of the main presentation part.
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Part name used when a package has no root relationships.
const DEFAULT_PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Content types part at the package root.
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// A relationship from one part to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    /// Target part name, resolved against the source part and without a leading `/`.
    pub target: String,
}

/// An open `.pptx` package.
pub struct Package<R> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    /// Open the ZIP container.
    pub fn open(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader).map_err(|e| Error::ZipError(e.to_string()))?;
        Ok(Self { archive })
    }

    /// Read a part as UTF-8 text.
    pub fn read_part(&mut self, part_name: &str) -> Result<String> {
        let mut file = self.archive.by_name(part_name).map_err(|e| match e {
            ZipError::FileNotFound => Error::MissingPart(part_name.to_string()),
            other => Error::ZipError(format!("Failed to open '{}': {}", part_name, other)),
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", part_name, e)))?;

        Ok(content)
    }

    /// Whether the archive contains the named part.
    pub fn has_part(&self, part_name: &str) -> bool {
        self.archive.file_names().any(|name| name == part_name)
    }

    /// Relationships whose source is `part_name`; empty when the part has no
    /// relationships part. Use `""` for the package itself.
    pub fn relationships(&mut self, part_name: &str) -> Result<Vec<Relationship>> {
        let rels_name = rels_part_name(part_name);
        if !self.has_part(&rels_name) {
            log::debug!("No relationships part at {}", rels_name);
            return Ok(Vec::new());
        }

        let xml = self.read_part(&rels_name)?;
        parse_relationships(&xml, part_dir(part_name))
    }

    /// Locate the main presentation part.
    pub fn presentation_part(&mut self) -> Result<String> {
        let root = self.relationships("")?;
        let part = root
            .into_iter()
            .find(|rel| rel.rel_type.ends_with(OFFICE_DOCUMENT_REL))
            .map(|rel| rel.target)
            .unwrap_or_else(|| DEFAULT_PRESENTATION_PART.to_string());

        log::debug!("Main presentation part: {}", part);
        Ok(part)
    }

    /// Content type of a part, from its `Override` entry or else the
    /// `Default` entry for its extension.
    pub fn content_type(&mut self, part_name: &str) -> Result<Option<String>> {
        let xml = self.read_part(CONTENT_TYPES_PART)?;
        let types = parse_content_types(&xml)?;
        Ok(types.lookup(part_name).map(str::to_string))
    }
}

/// Entries of `[Content_Types].xml`. Part names and extensions are stored
/// lowercased since the package format compares them case-insensitively.
#[derive(Debug, Default)]
struct ContentTypes {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    fn lookup(&self, part_name: &str) -> Option<&str> {
        let wanted = format!("/{}", part_name.trim_start_matches('/')).to_lowercase();
        if let Some((_, ct)) = self.overrides.iter().find(|(name, _)| *name == wanted) {
            return Some(ct.as_str());
        }

        let ext = wanted.rsplit_once('.').map(|(_, ext)| ext)?;
        self.defaults
            .iter()
            .find(|(e, _)| e == ext)
            .map(|(_, ct)| ct.as_str())
    }
}

fn parse_content_types(xml: &str) -> Result<ContentTypes> {
    let mut types = ContentTypes::default();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                let kind = local_name(e.name().as_ref()).to_vec();
                if kind != b"Default" && kind != b"Override" {
                    continue;
                }

                let mut key = String::new();
                let mut content_type = String::new();
                for attr in e.attributes().flatten() {
                    let value = attr
                        .unescape_value()
                        .map_err(|e| Error::XmlError(format!("Bad content type attribute: {}", e)))?;
                    match attr.key.as_ref() {
                        b"Extension" | b"PartName" => key = value.to_lowercase(),
                        b"ContentType" => content_type = value.into_owned(),
                        _ => {}
                    }
                }

                if kind == b"Default" {
                    types.defaults.push((key, content_type));
                } else {
                    types.overrides.push((key, content_type));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing content types: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(types)
}

/// Parse a relationships part, resolving each internal target against `base_dir`.
fn parse_relationships(xml: &str, base_dir: &str) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();
                let mut external = false;

                for attr in e.attributes().flatten() {
                    let value = attr
                        .unescape_value()
                        .map_err(|e| Error::XmlError(format!("Bad relationship attribute: {}", e)))?;
                    match attr.key.as_ref() {
                        b"Id" => id = value.into_owned(),
                        b"Type" => rel_type = value.into_owned(),
                        b"Target" => target = value.into_owned(),
                        b"TargetMode" => external = value == "External",
                        _ => {}
                    }
                }

                if external {
                    continue;
                }

                rels.push(Relationship {
                    id,
                    rel_type,
                    target: resolve_target(base_dir, &target),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(rels)
}

/// Name of the relationships part for `part_name`, e.g.
/// `ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`.
pub fn rels_part_name(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part_name),
    }
}

/// Directory portion of a part name (`""` for root-level parts).
fn part_dir(part_name: &str) -> &str {
    part_name.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Resolve a relationship target to a part name.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None if base_dir.is_empty() => target.to_string(),
        None => format!("{}/{}", base_dir, target),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Extract the local name from a potentially namespaced XML name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
