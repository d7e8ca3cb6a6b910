//! The extraction routine: presentation in, result record out.

use crate::parser::{PptxParser, Presentation};
use pptx_reader_core::{collect_slide_text, Error, PresentationContent, ReadOutcome, Result};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::Path;

/// Read the presentation at `path` and collect the text of every slide.
///
/// Never fails: errors come back as [`ReadOutcome::Failed`].
pub fn read_pptx(path: &Path) -> ReadOutcome {
    let file_path = path.display().to_string();

    let file = match open_file(path, &file_path) {
        Ok(file) => file,
        Err(e) => return failed(&file_path, e),
    };

    extract_from_reader(BufReader::new(file), &file_path)
}

/// Same as [`read_pptx`] for an already opened source. `file_path` is only
/// recorded in the result.
pub fn extract_from_reader<R: Read + Seek>(reader: R, file_path: &str) -> ReadOutcome {
    match PptxParser::new().parse(reader) {
        Ok(presentation) => {
            ReadOutcome::Extracted(content_from_presentation(file_path, &presentation))
        }
        Err(e) => failed(file_path, e),
    }
}

/// Build the result record for a parsed presentation.
pub fn content_from_presentation(
    file_path: &str,
    presentation: &Presentation,
) -> PresentationContent {
    let mut content = PresentationContent::new(file_path);
    for slide in &presentation.slides {
        content.push_slide(collect_slide_text(&slide.shapes));
    }
    content
}

fn open_file(path: &Path, file_path: &str) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(file_path.to_string()),
        _ => Error::IoError(e),
    })
}

fn failed(file_path: &str, err: Error) -> ReadOutcome {
    log::debug!("Extraction of {} failed: {}", file_path, err);
    ReadOutcome::from_error(&err)
}
