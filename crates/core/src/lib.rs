//! Core result records, text collection, and report formatting
//! for PowerPoint text extraction.

pub mod collect;
pub mod error;
pub mod report;
pub mod types;

pub use collect::{collect_slide_text, TextSource};
pub use error::{Error, Result};
pub use report::{render_error_json, render_error_line, render_text_report};
pub use types::{ErrorReport, PresentationContent, ReadOutcome, SlideRecord};
