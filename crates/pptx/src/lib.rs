//! PPTX (Office Open XML) reader for slide text extraction.
//!
//! Parses .pptx files, which are ZIP archives of XML parts, far enough to
//! list the slides in presentation order and the text of their shapes.

pub mod extract;
pub mod package;
pub mod parser;
pub mod slide;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use extract::{content_from_presentation, extract_from_reader, read_pptx};
pub use parser::{Presentation, PptxParser};
pub use slide::{Shape, ShapeKind, Slide};
