//! Result records produced by one extraction run.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Outcome of reading one presentation: either its slide text or an error
/// record, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadOutcome {
    /// Extraction succeeded.
    Extracted(PresentationContent),
    /// Extraction failed; the record carries the user-facing message.
    Failed(ErrorReport),
}

impl ReadOutcome {
    /// Build the failure outcome for an extraction error.
    pub fn from_error(err: &Error) -> Self {
        Self::Failed(ErrorReport::from_extraction_error(err))
    }

    /// True when the outcome carries an error record.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Text content of a whole presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationContent {
    /// The path exactly as it was supplied.
    pub file_path: String,

    /// Number of slides in the presentation.
    pub total_slides: usize,

    /// Slides in presentation order.
    pub slides: Vec<SlideRecord>,
}

impl PresentationContent {
    /// Create an empty record for the given path.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            total_slides: 0,
            slides: Vec::new(),
        }
    }

    /// Append the next slide, numbering it after the ones already present.
    pub fn push_slide(&mut self, content: impl Into<String>) {
        let slide_number = self.slides.len() + 1;
        self.slides.push(SlideRecord {
            slide_number,
            content: content.into(),
        });
        self.total_slides = self.slides.len();
    }
}

/// Text of a single slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based slide number.
    pub slide_number: usize,

    /// Trimmed shape texts joined with newlines; empty when the slide has no text.
    pub content: String,
}

/// Error record printed as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorReport {
    /// Error record with no hint.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    /// Attach a remediation hint.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// No input path was given on the command line.
    pub fn missing_argument() -> Self {
        Self::new("No file path provided")
    }

    /// The presentation reader could not be loaded.
    ///
    /// `read-pptx` links `pptx-reader-pptx` statically, so the binary never
    /// produces this record; it is kept for front ends that load a reader at
    /// runtime.
    pub fn missing_dependency() -> Self {
        Self::new("pptx reader not available")
            .with_message("Install a read-pptx build that includes the pptx reader")
    }

    /// Map an extraction error to its user-facing record.
    ///
    /// A missing file keeps its own wording; every other failure is reported
    /// as a read error carrying the underlying message.
    pub fn from_extraction_error(err: &Error) -> Self {
        match err {
            Error::FileNotFound(_) => Self::new(err.to_string()),
            other => Self::new(format!("Error reading PowerPoint: {}", other)),
        }
    }
}
