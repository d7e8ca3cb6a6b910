//! Output formatting.
//!
//! A successful extraction renders as a plain-text report with one section
//! per slide. Errors render as JSON: indented for extraction failures, single
//! line for failures that happen before extraction starts.

use crate::types::{ErrorReport, PresentationContent};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::io;
use std::path::Path;

/// Width of the separator lines.
pub const RULE_WIDTH: usize = 80;

/// Render the human-readable report for an extracted presentation.
///
/// # Example output
/// ```text
///
/// # PowerPoint Content: deck.pptx
///
/// Total Slides: 1
///
/// ========...
///
/// ## Slide 1
/// --------...
/// Title
/// Body
///
/// ========...
///
/// ```
pub fn render_text_report(content: &PresentationContent) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!(
        "\n# PowerPoint Content: {}\n\n",
        display_name(&content.file_path)
    ));
    out.push_str(&format!("Total Slides: {}\n\n", content.total_slides));
    out.push_str(&heavy);
    out.push_str("\n\n");

    for slide in &content.slides {
        out.push_str(&format!("## Slide {}\n", slide.slide_number));
        out.push_str(&light);
        out.push('\n');
        out.push_str(&slide.content);
        out.push('\n');
        out.push('\n');
        out.push_str(&heavy);
        out.push_str("\n\n");
    }

    out
}

/// Render an error record as 2-space indented JSON with a trailing newline.
///
/// Non-ASCII characters are written as-is.
pub fn render_error_json(report: &ErrorReport) -> serde_json::Result<String> {
    let mut json = to_string_with(report, PrettyFormatter::with_indent(b"  "))?;
    json.push('\n');
    Ok(json)
}

/// Render an error record on a single line with `", "` and `": "` separators.
pub fn render_error_line(report: &ErrorReport) -> serde_json::Result<String> {
    let mut json = to_string_with(report, SpacedCompactFormatter)?;
    json.push('\n');
    Ok(json)
}

/// Base name of the input path, or the path itself when it has none.
fn display_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string())
}

fn to_string_with<T, F>(value: &T, formatter: F) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
    F: Formatter,
{
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde::ser::Error::custom)
}

/// Compact JSON with a space after every `,` and `:`.
struct SpacedCompactFormatter;

impl Formatter for SpacedCompactFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
