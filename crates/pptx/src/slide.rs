//! Slide part parsing: the top-level shapes of a slide's shape tree and the
//! text of each shape's text frame.

use crate::package::local_name;
use pptx_reader_core::{Error, Result, TextSource};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

/// The kind of a shape-tree element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShapeKind {
    /// `p:sp`: auto shape, placeholder or text box.
    AutoShape,
    /// `p:grpSp`
    Group,
    /// `p:graphicFrame`: table, chart or diagram.
    GraphicFrame,
    /// `p:cxnSp`
    Connector,
    /// `p:pic`
    Picture,
    /// `p:contentPart`
    ContentPart,
}

impl ShapeKind {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"sp" => Some(Self::AutoShape),
            b"grpSp" => Some(Self::Group),
            b"graphicFrame" => Some(Self::GraphicFrame),
            b"cxnSp" => Some(Self::Connector),
            b"pic" => Some(Self::Picture),
            b"contentPart" => Some(Self::ContentPart),
            _ => None,
        }
    }
}

/// One top-level shape of a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Text frame contents; `None` for shapes that cannot hold text.
    pub text: Option<String>,
}

impl TextSource for Shape {
    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// A slide and its shapes, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    /// Part name inside the package, e.g. `ppt/slides/slide1.xml`.
    pub part_name: String,
    pub shapes: Vec<Shape>,
}

/// Text accumulated for the auto shape currently being read.
#[derive(Debug, Default)]
struct TextFrame {
    /// Depth of the `p:sp` element in the element stack.
    depth: usize,
    in_body: bool,
    paragraphs: Vec<String>,
}

impl TextFrame {
    fn push_str(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraphs.last_mut() {
            paragraph.push_str(text);
        }
    }

    fn finish(self) -> String {
        self.paragraphs.join("\n")
    }
}

/// Extract the top-level shapes from slide XML.
pub fn parse_shapes(xml: &str) -> Result<Vec<Shape>> {
    let mut reader = Reader::from_str(xml);
    // Whitespace inside runs is significant.
    reader.trim_text(false);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut shapes = Vec::new();
    let mut frame: Option<TextFrame> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref()).to_vec();
                open_element(&name, &stack, &mut shapes, &mut frame, false);
                stack.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                let name = local_name(e.name().as_ref()).to_vec();
                open_element(&name, &stack, &mut shapes, &mut frame, true);
            }
            Ok(Event::End(_)) => {
                let name = stack.pop().unwrap_or_default();
                let closes_shape = match frame.as_mut() {
                    Some(f) => {
                        if name == b"txBody" && stack.len() == f.depth + 1 {
                            f.in_body = false;
                        }
                        name == b"sp" && stack.len() == f.depth
                    }
                    None => false,
                };
                if closes_shape {
                    if let Some(f) = frame.take() {
                        shapes.push(Shape {
                            kind: ShapeKind::AutoShape,
                            text: Some(f.finish()),
                        });
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(ref mut f) = frame {
                    if in_run_text(f, &stack) {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::XmlError(format!("Bad slide text: {}", e)))?;
                        f.push_str(&text);
                    }
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(ref mut f) = frame {
                    if in_run_text(f, &stack) {
                        f.push_str(&String::from_utf8_lossy(e));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing slide at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(shapes)
}

/// Handle a start or empty tag. `stack` holds the element's ancestors.
fn open_element(
    name: &[u8],
    stack: &[Vec<u8>],
    shapes: &mut Vec<Shape>,
    frame: &mut Option<TextFrame>,
    empty: bool,
) {
    if let Some(f) = frame {
        if !f.in_body {
            if name == b"txBody" && stack.len() == f.depth + 1 && !empty {
                f.in_body = true;
            }
            return;
        }

        match (name, parent(stack)) {
            (b"p", Some(b"txBody")) => f.paragraphs.push(String::new()),
            // A line break inside a paragraph is a vertical tab, keeping it
            // distinct from the newline between paragraphs.
            (b"br", Some(b"p")) => f.push_str("\u{b}"),
            _ => {}
        }
        return;
    }

    if !is_shape_tree(stack) {
        return;
    }

    match ShapeKind::from_local_name(name) {
        Some(ShapeKind::AutoShape) if !empty => {
            *frame = Some(TextFrame {
                depth: stack.len(),
                ..TextFrame::default()
            });
        }
        Some(ShapeKind::AutoShape) => shapes.push(Shape {
            kind: ShapeKind::AutoShape,
            text: Some(String::new()),
        }),
        Some(kind) => shapes.push(Shape { kind, text: None }),
        None => {}
    }
}

/// True when the ancestors end in `p:cSld/p:spTree`.
fn is_shape_tree(stack: &[Vec<u8>]) -> bool {
    match stack {
        [.., csld, tree] => csld == b"cSld" && tree == b"spTree",
        _ => false,
    }
}

fn parent(stack: &[Vec<u8>]) -> Option<&[u8]> {
    stack.last().map(Vec::as_slice)
}

/// Text nodes count only inside `a:r/a:t` or `a:fld/a:t` of the frame's body.
fn in_run_text(frame: &TextFrame, stack: &[Vec<u8>]) -> bool {
    if !frame.in_body {
        return false;
    }
    match stack {
        [.., run, t] => t == b"t" && (run == b"r" || run == b"fld"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide_xml(tree: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
      {}
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sld>"#,
            tree
        )
    }

    fn text_shape(body: &str) -> String {
        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
            body
        )
    }

    fn texts(shapes: &[Shape]) -> Vec<Option<&str>> {
        shapes.iter().map(|s| s.text()).collect()
    }

    #[test]
    fn test_runs_concatenate_with_whitespace() {
        let xml = slide_xml(&text_shape(
            r#"<a:p><a:r><a:rPr lang="en-US"/><a:t>Hello</a:t></a:r><a:r><a:t> </a:t></a:r><a:r><a:rPr b="1"/><a:t>world</a:t></a:r></a:p>"#,
        ));
        let shapes = parse_shapes(&xml).unwrap();
        assert_eq!(texts(&shapes), vec![Some("Hello world")]);
    }

    #[test]
    fn test_paragraphs_and_breaks() {
        let xml = slide_xml(&text_shape(
            r#"<a:p><a:r><a:t>One</a:t></a:r></a:p><a:p/><a:p><a:r><a:t>Two</a:t></a:r><a:br/><a:r><a:t>Three</a:t></a:r><a:endParaRPr/></a:p>"#,
        ));
        let shapes = parse_shapes(&xml).unwrap();
        assert_eq!(texts(&shapes), vec![Some("One\n\nTwo\u{b}Three")]);
    }

    #[test]
    fn test_fields_and_entities() {
        let xml = slide_xml(&text_shape(
            r#"<a:p><a:r><a:t>R&amp;D &lt;2024&gt; page </a:t></a:r><a:fld id="{B6F15528-21DE-4FAA-801E-634DDDAF4B2B}" type="slidenum"><a:t>7</a:t></a:fld></a:p>"#,
        ));
        let shapes = parse_shapes(&xml).unwrap();
        assert_eq!(texts(&shapes), vec![Some("R&D <2024> page 7")]);
    }

    #[test]
    fn test_shape_kinds_in_order() {
        let tree = format!(
            r#"{}<p:pic><p:nvPicPr><p:cNvPr id="4" name="Picture 3"/></p:nvPicPr></p:pic><p:graphicFrame><a:graphic><a:graphicData><a:tbl><a:tr><a:tc><a:txBody><a:p><a:r><a:t>cell</a:t></a:r></a:p></a:txBody></a:tc></a:tr></a:tbl></a:graphicData></a:graphic></p:graphicFrame><p:cxnSp/>{}"#,
            text_shape("<a:p><a:r><a:t>Title</a:t></a:r></a:p>"),
            text_shape("<a:p><a:r><a:t>Body</a:t></a:r></a:p>"),
        );
        let shapes = parse_shapes(&slide_xml(&tree)).unwrap();
        let kinds: Vec<ShapeKind> = shapes.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ShapeKind::AutoShape,
                ShapeKind::Picture,
                ShapeKind::GraphicFrame,
                ShapeKind::Connector,
                ShapeKind::AutoShape,
            ]
        );
        assert_eq!(
            texts(&shapes),
            vec![Some("Title"), None, None, None, Some("Body")]
        );
    }

    #[test]
    fn test_group_members_are_not_flattened() {
        let tree = format!(
            r#"<p:grpSp><p:nvGrpSpPr><p:cNvPr id="5" name="Group 4"/></p:nvGrpSpPr><p:grpSpPr/>{}</p:grpSp>"#,
            text_shape("<a:p><a:r><a:t>inside group</a:t></a:r></a:p>")
        );
        let shapes = parse_shapes(&slide_xml(&tree)).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind, ShapeKind::Group);
        assert_eq!(shapes[0].text(), None);
    }

    #[test]
    fn test_shape_without_text_body() {
        let tree = r#"<p:sp><p:nvSpPr><p:cNvPr id="6" name="Rectangle 5"/></p:nvSpPr><p:spPr/></p:sp><p:sp/>"#;
        let shapes = parse_shapes(&slide_xml(tree)).unwrap();
        assert_eq!(texts(&shapes), vec![Some(""), Some("")]);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let err = parse_shapes("<p:sld><p:cSld><p:spTree></p:cSld></p:sld>").unwrap_err();
        assert!(matches!(err, Error::XmlError(_)));
    }
}
