//! Error types for PowerPoint text extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not resolve to an existing file.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The package is a valid OOXML container but not a presentation.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error inside a package part.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// A part required to walk the presentation is absent from the package.
    #[error("Package part not found: {0}")]
    MissingPart(String),

    /// The package is structurally invalid.
    #[error("Invalid or corrupted file: {0}")]
    CorruptedFile(String),
}
