//! Screen renderer: display nodes and an HTML fragment for the preview pane.

use serde::Serialize;

use crate::markdown::classifier::{classify, HeadingLevel, InlineSpan, LineRecord};

/// An owned inline run, detached from the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Link { text: String, url: String },
}

/// Links with a disallowed scheme degrade to their label.
impl From<&InlineSpan<'_>> for Inline {
    fn from(span: &InlineSpan<'_>) -> Self {
        match span.safe_url() {
            Some(url) => Inline::Link {
                text: span.text().to_string(),
                url: url.to_string(),
            },
            None => Inline::Text {
                text: span.text().to_string(),
            },
        }
    }
}

/// What the preview pane draws for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum DisplayNode {
    Heading { level: u8, text: String },
    Paragraph { strong: Option<String>, inlines: Vec<Inline> },
    BulletItem { inlines: Vec<Inline> },
    /// Fixed vertical spacing; carries no text.
    Spacer,
}

fn owned(spans: &[InlineSpan<'_>]) -> Vec<Inline> {
    spans.iter().map(Inline::from).collect()
}

/// Converts one classified line into a display node.
pub fn to_display_node(record: &LineRecord<'_>) -> DisplayNode {
    match record {
        LineRecord::Heading { level, text } => DisplayNode::Heading {
            level: level.depth(),
            text: (*text).to_string(),
        },
        LineRecord::BoldLead { bold, rest } => DisplayNode::Paragraph {
            strong: Some((*bold).to_string()),
            inlines: owned(rest),
        },
        LineRecord::Bullet { spans } => DisplayNode::BulletItem {
            inlines: owned(spans),
        },
        LineRecord::Blank => DisplayNode::Spacer,
        LineRecord::Paragraph { spans } => DisplayNode::Paragraph {
            strong: None,
            inlines: owned(spans),
        },
    }
}

pub fn render_nodes(document: &str) -> Vec<DisplayNode> {
    classify(document).map(|r| to_display_node(&r)).collect()
}

/// Renders the document as an HTML fragment. All text is escaped.
pub fn render_html(document: &str) -> String {
    let mut html = String::with_capacity(document.len() * 2);
    for record in classify(document) {
        match &record {
            LineRecord::Heading { level, text } => {
                let tag = match level {
                    HeadingLevel::H1 => "h1",
                    HeadingLevel::H2 => "h2",
                    HeadingLevel::H3 => "h3",
                };
                html.push_str(&format!("<{tag}>{}</{tag}>", escape(text)));
            }
            LineRecord::BoldLead { bold, rest } => {
                html.push_str("<p><strong>");
                html.push_str(&escape(bold));
                html.push_str("</strong>");
                push_inlines(&mut html, rest);
                html.push_str("</p>");
            }
            LineRecord::Bullet { spans } => {
                html.push_str("<div class=\"bullet\"><span>&#8226;</span><p>");
                push_inlines(&mut html, spans);
                html.push_str("</p></div>");
            }
            LineRecord::Blank => html.push_str("<div class=\"spacer\"></div>"),
            LineRecord::Paragraph { spans } => {
                html.push_str("<p>");
                push_inlines(&mut html, spans);
                html.push_str("</p>");
            }
        }
        html.push('\n');
    }
    html
}

fn push_inlines(html: &mut String, spans: &[InlineSpan<'_>]) {
    for span in spans {
        match span.safe_url() {
            Some(url) => html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                escape(url),
                escape(span.text())
            )),
            None => html.push_str(&escape(span.text())),
        }
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_cover_every_kind() {
        let nodes = render_nodes("# T\n**B:** x\n- item\n\nplain");
        assert_eq!(
            nodes,
            vec![
                DisplayNode::Heading {
                    level: 1,
                    text: "T".to_string()
                },
                DisplayNode::Paragraph {
                    strong: Some("B:".to_string()),
                    inlines: vec![Inline::Text {
                        text: " x".to_string()
                    }]
                },
                DisplayNode::BulletItem {
                    inlines: vec![Inline::Text {
                        text: "item".to_string()
                    }]
                },
                DisplayNode::Spacer,
                DisplayNode::Paragraph {
                    strong: None,
                    inlines: vec![Inline::Text {
                        text: "plain".to_string()
                    }]
                },
            ]
        );
    }

    #[test]
    fn test_html_links_open_in_new_tab() {
        let html = render_html("- see [site](https://a.test/?q=1&r=2)");
        assert!(html.contains(
            "<a href=\"https://a.test/?q=1&amp;r=2\" target=\"_blank\" rel=\"noopener noreferrer\">site</a>"
        ));
        assert!(html.starts_with("<div class=\"bullet\">"));
    }

    #[test]
    fn test_script_links_render_as_text() {
        let html = render_html("- [click](javascript:alert(document.cookie))");
        assert!(!html.contains("<a"));
        assert!(!html.contains("javascript"));
        assert!(html.contains("click"));

        let nodes = render_nodes("[click](javascript:alert(1)) and [mail](mailto:a@b.test)");
        let DisplayNode::Paragraph { inlines, .. } = &nodes[0] else {
            panic!("expected a paragraph, got {:?}", nodes[0]);
        };
        assert_eq!(
            inlines[0],
            Inline::Text {
                text: "click".to_string()
            }
        );
        assert!(inlines.contains(&Inline::Link {
            text: "mail".to_string(),
            url: "mailto:a@b.test".to_string()
        }));
    }

    #[test]
    fn test_html_escapes_text() {
        let html = render_html("## <script>");
        assert_eq!(html, "<h2>&lt;script&gt;</h2>\n");
    }
}
