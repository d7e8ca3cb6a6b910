//! Slide text collection.

/// A shape that may expose readable text.
///
/// Shapes without a text frame (pictures, groups, connectors, tables) return
/// `None`.
pub trait TextSource {
    fn text(&self) -> Option<&str>;
}

impl TextSource for &str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextSource for Option<&str> {
    fn text(&self) -> Option<&str> {
        *self
    }
}

/// Collect the text of one slide's shapes into a single string.
///
/// Every shape with non-empty text contributes its trimmed text, in shape
/// order, one per line. A shape holding only whitespace still contributes a
/// (blank) line.
pub fn collect_slide_text<'a, S, I>(shapes: I) -> String
where
    S: TextSource + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let fragments: Vec<&str> = shapes
        .into_iter()
        .filter_map(|shape| shape.text())
        .filter(|text| !text.is_empty())
        .map(str::trim)
        .collect();

    fragments.join("\n")
}
