//! DOCX Exporter: tags each Markdown line as a paragraph descriptor.
//!
//! The descriptors are consumed by an external document-assembly library.
//! Pagination is left to that library; this module only classifies and tags.

use serde::Serialize;

use crate::export::ExportDocument;
use crate::markdown::{classify, HeadingLevel, InlineSpan, LineRecord};

/// Word heading styles emitted by this exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocxHeading {
    #[serde(rename = "HEADING_1")]
    Heading1,
    #[serde(rename = "HEADING_2")]
    Heading2,
}

/// Paragraph spacing in twentieths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

pub const HEADING_SPACING: Spacing = Spacing {
    before: 240,
    after: 120,
};

/// Paragraph bottom border (used under the top-level heading).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Border {
    pub color: &'static str,
    pub space: u32,
    pub value: &'static str,
    pub size: u32,
}

pub const HEADING_1_BORDER: Border = Border {
    color: "auto",
    space: 1,
    value: "single",
    size: 6,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TextRun {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            bold: false,
            link: None,
        }
    }

    fn bold(text: &str) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }
}

impl From<&InlineSpan<'_>> for TextRun {
    fn from(span: &InlineSpan<'_>) -> Self {
        Self {
            text: span.text().to_string(),
            bold: false,
            link: span.safe_url().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<DocxHeading>,
    /// Bullet indent level; `Some(0)` for top-level list items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<Border>,
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocxDocument {
    pub file_name: &'static str,
    pub paragraphs: Vec<ParagraphDescriptor>,
}

fn runs(spans: &[InlineSpan<'_>]) -> Vec<TextRun> {
    spans.iter().map(TextRun::from).collect()
}

/// Maps one classified line to its paragraph descriptor.
pub fn to_paragraph(record: &LineRecord<'_>) -> ParagraphDescriptor {
    match record {
        LineRecord::Heading {
            level: HeadingLevel::H1,
            text,
        } => ParagraphDescriptor {
            heading: Some(DocxHeading::Heading1),
            spacing: Some(HEADING_SPACING),
            border_bottom: Some(HEADING_1_BORDER),
            runs: vec![TextRun::plain(text)],
            ..Default::default()
        },
        LineRecord::Heading {
            level: HeadingLevel::H2,
            text,
        } => ParagraphDescriptor {
            heading: Some(DocxHeading::Heading2),
            spacing: Some(HEADING_SPACING),
            runs: vec![TextRun::plain(text)],
            ..Default::default()
        },
        // Sub-headings stay body paragraphs, set in bold.
        LineRecord::Heading {
            level: HeadingLevel::H3,
            text,
        } => ParagraphDescriptor {
            runs: vec![TextRun::bold(text)],
            ..Default::default()
        },
        LineRecord::BoldLead { bold, rest } => {
            let mut all = vec![TextRun::bold(bold)];
            all.extend(runs(rest));
            ParagraphDescriptor {
                runs: all,
                ..Default::default()
            }
        }
        LineRecord::Bullet { spans } => ParagraphDescriptor {
            bullet: Some(0),
            runs: runs(spans),
            ..Default::default()
        },
        LineRecord::Blank => ParagraphDescriptor::default(),
        LineRecord::Paragraph { spans } => ParagraphDescriptor {
            runs: runs(spans),
            ..Default::default()
        },
    }
}

pub fn build_docx(markdown: &str, document: ExportDocument) -> DocxDocument {
    DocxDocument {
        file_name: document.docx_file_name(),
        paragraphs: classify(markdown).map(|r| to_paragraph(&r)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(md: &str) -> Vec<ParagraphDescriptor> {
        build_docx(md, ExportDocument::TailoredResume).paragraphs
    }

    fn text(p: &ParagraphDescriptor) -> String {
        p.runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_heading_one_descriptor() {
        let p = &paragraphs("# Jane Doe")[0];
        assert_eq!(p.heading, Some(DocxHeading::Heading1));
        assert_eq!(text(p), "Jane Doe");
        assert_eq!(p.spacing, Some(HEADING_SPACING));
        assert_eq!(p.border_bottom, Some(HEADING_1_BORDER));
    }

    #[test]
    fn test_heading_one_survives_serialization() {
        let doc = build_docx("# Jane Doe", ExportDocument::TailoredResume);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["fileName"], "tailored-resume.docx");
        assert_eq!(json["paragraphs"][0]["heading"], "HEADING_1");
        assert_eq!(json["paragraphs"][0]["runs"][0]["text"], "Jane Doe");
        assert_eq!(json["paragraphs"][0]["borderBottom"]["value"], "single");
    }

    #[test]
    fn test_heading_two_has_no_border() {
        let p = &paragraphs("## Summary")[0];
        assert_eq!(p.heading, Some(DocxHeading::Heading2));
        assert_eq!(p.border_bottom, None);
    }

    #[test]
    fn test_heading_three_is_bold_body_paragraph() {
        let p = &paragraphs("### Acme Corp")[0];
        assert_eq!(p.heading, None);
        assert_eq!(p.runs, vec![TextRun::bold("Acme Corp")]);
    }

    #[test]
    fn test_bullets_and_blanks() {
        let ps = paragraphs("- Led a team\n\ntext");
        assert_eq!(ps.len(), 3);
        assert_eq!(ps[0].bullet, Some(0));
        assert_eq!(text(&ps[0]), "Led a team");
        assert_eq!(ps[1], ParagraphDescriptor::default());
        assert_eq!(ps[2].bullet, None);
        assert_eq!(text(&ps[2]), "text");
    }

    #[test]
    fn test_bold_lead_runs_keep_links() {
        let p = &paragraphs("**Course:** [Intro](https://x.test)")[0];
        assert_eq!(p.runs[0], TextRun::bold("Course:"));
        assert_eq!(p.runs[1], TextRun::plain(" "));
        assert_eq!(p.runs[2].link.as_deref(), Some("https://x.test"));
        assert_eq!(text(p), "Course: Intro");
    }

    #[test]
    fn test_script_link_becomes_plain_run() {
        let p = &paragraphs("- [Portfolio](javascript:void0)")[0];
        assert_eq!(p.runs, vec![TextRun::plain("Portfolio")]);
    }
}
