// Markdown line classification shared by the screen renderer and both exporters.
// One classifier, three consumers: render (display nodes / HTML), export::pdf, export::docx.

pub mod classifier;
pub mod render;

pub use classifier::{classify, HeadingLevel, InlineSpan, LineRecord};

/// Visible text of the first non-blank line. Used for list previews.
pub fn excerpt(document: &str) -> Option<String> {
    classify(document)
        .find(|record| !matches!(record, LineRecord::Blank))
        .map(|record| record.plain_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_skips_blank_lines() {
        assert_eq!(
            excerpt("\n\n**Overall Performance:** see [notes](https://n.io)\n- a"),
            Some("Overall Performance: see notes".to_string())
        );
    }

    #[test]
    fn test_excerpt_of_empty_document() {
        assert_eq!(excerpt(""), None);
        assert_eq!(excerpt("\n   \n"), None);
    }
}
