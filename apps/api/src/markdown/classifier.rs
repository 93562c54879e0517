//! Markdown Line Classifier: turns a constrained Markdown subset into line records.
//!
//! # Supported subset
//! - `# `, `## `, `### ` headings
//! - a leading `**bold**` lead-in followed by trailing text
//! - `- ` bullets
//! - blank lines
//! - `[text](url)` inline links in every non-heading, non-bold segment
//!
//! Classification is prefix-based and evaluated in a fixed priority order:
//! heading markers, then bold, then bullet, then blank, then plain text.
//! Nothing here fails: malformed markers degrade to plain text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

const BOLD_MARKER: &str = "**";

/// Heading depth. Only three levels are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// One run of inline content produced by the link scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineSpan<'a> {
    Text { text: &'a str },
    Link { text: &'a str, url: &'a str },
}

impl<'a> InlineSpan<'a> {
    /// The visible text of the span (link label for links).
    pub fn text(&self) -> &'a str {
        match self {
            InlineSpan::Text { text } | InlineSpan::Link { text, .. } => text,
        }
    }

    pub fn url(&self) -> Option<&'a str> {
        match self {
            InlineSpan::Text { .. } => None,
            InlineSpan::Link { url, .. } => Some(url),
        }
    }

    /// The link target, only when it uses an allowed scheme. Other links are
    /// meant to be shown as plain text.
    pub fn safe_url(&self) -> Option<&'a str> {
        self.url().filter(|url| has_safe_scheme(url))
    }
}

const SAFE_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

fn has_safe_scheme(url: &str) -> bool {
    let url = url.trim_start();
    SAFE_SCHEMES.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// A classified line. Exactly one variant per input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineRecord<'a> {
    Heading {
        level: HeadingLevel,
        text: &'a str,
    },
    /// `**bold** rest`. Only `rest` is link-scanned.
    BoldLead {
        bold: &'a str,
        rest: Vec<InlineSpan<'a>>,
    },
    Bullet {
        spans: Vec<InlineSpan<'a>>,
    },
    Blank,
    Paragraph {
        spans: Vec<InlineSpan<'a>>,
    },
}

impl<'a> LineRecord<'a> {
    /// Visible text of the line with link markup removed.
    pub fn plain_text(&self) -> String {
        match self {
            LineRecord::Heading { text, .. } => (*text).to_string(),
            LineRecord::BoldLead { bold, rest } => {
                let mut out = (*bold).to_string();
                out.extend(rest.iter().map(InlineSpan::text));
                out
            }
            LineRecord::Bullet { spans } | LineRecord::Paragraph { spans } => {
                spans.iter().map(InlineSpan::text).collect()
            }
            LineRecord::Blank => String::new(),
        }
    }
}

/// Classifies a single line (without its terminator).
pub fn classify_line(line: &str) -> LineRecord<'_> {
    if let Some(text) = line.strip_prefix("### ") {
        return LineRecord::Heading {
            level: HeadingLevel::H3,
            text,
        };
    }
    if let Some(text) = line.strip_prefix("## ") {
        return LineRecord::Heading {
            level: HeadingLevel::H2,
            text,
        };
    }
    if let Some(text) = line.strip_prefix("# ") {
        return LineRecord::Heading {
            level: HeadingLevel::H1,
            text,
        };
    }
    if let Some(after_open) = line.strip_prefix(BOLD_MARKER) {
        if let Some(close) = after_open.find(BOLD_MARKER) {
            return LineRecord::BoldLead {
                bold: &after_open[..close],
                rest: scan_inline(&after_open[close + BOLD_MARKER.len()..]),
            };
        }
        // Unclosed `**`: fall through to the remaining rules.
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return LineRecord::Bullet {
            spans: scan_inline(rest),
        };
    }
    if line.trim().is_empty() {
        return LineRecord::Blank;
    }
    LineRecord::Paragraph {
        spans: scan_inline(line),
    }
}

/// Splits a text segment into literal and link runs, preserving order.
///
/// An empty input yields no spans.
pub fn scan_inline(text: &str) -> Vec<InlineSpan<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in LINK_RE.captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(InlineSpan::Text {
                text: &text[last..whole.start()],
            });
        }
        spans.push(InlineSpan::Link {
            text: label.as_str(),
            url: url.as_str(),
        });
        last = whole.end();
    }

    if last < text.len() {
        spans.push(InlineSpan::Text { text: &text[last..] });
    }
    spans
}

/// Lazy, restartable sequence of classified lines.
///
/// Cloning yields an independent cursor; calling [`classify`] again restarts.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: std::str::Lines<'a>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = LineRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(classify_line)
    }
}

/// Classifies every line of `document`. A trailing newline does not add a blank line.
pub fn classify(document: &str) -> Lines<'_> {
    Lines {
        inner: document.lines(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(t: &str) -> InlineSpan<'_> {
        InlineSpan::Text { text: t }
    }

    fn link<'a>(t: &'a str, u: &'a str) -> InlineSpan<'a> {
        InlineSpan::Link { text: t, url: u }
    }

    #[test]
    fn test_heading_levels_strip_prefix_once() {
        assert_eq!(
            classify_line("### # Nested"),
            LineRecord::Heading {
                level: HeadingLevel::H3,
                text: "# Nested"
            }
        );
        assert_eq!(
            classify_line("## ## Twice"),
            LineRecord::Heading {
                level: HeadingLevel::H2,
                text: "## Twice"
            }
        );
        assert_eq!(
            classify_line("# Jane"),
            LineRecord::Heading {
                level: HeadingLevel::H1,
                text: "Jane"
            }
        );
    }

    #[test]
    fn test_heading_requires_space_after_marker() {
        assert_eq!(
            classify_line("#hashtag"),
            LineRecord::Paragraph {
                spans: vec![text("#hashtag")]
            }
        );
    }

    #[test]
    fn test_bullet_with_link_reconstructs() {
        assert_eq!(
            classify_line("- abc [x](http://y) def"),
            LineRecord::Bullet {
                spans: vec![text("abc "), link("x", "http://y"), text(" def")]
            }
        );
    }

    #[test]
    fn test_bold_lead_scans_remainder_for_links() {
        assert_eq!(
            classify_line("**Key Skills:** see [docs](https://d.example)"),
            LineRecord::BoldLead {
                bold: "Key Skills:",
                rest: vec![text(" see "), link("docs", "https://d.example")]
            }
        );
    }

    #[test]
    fn test_bold_segment_is_not_link_scanned() {
        match classify_line("**[a](b)** tail") {
            LineRecord::BoldLead { bold, rest } => {
                assert_eq!(bold, "[a](b)");
                assert_eq!(rest, vec![text(" tail")]);
            }
            other => panic!("expected bold lead, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_bold_degrades_to_plain() {
        assert_eq!(
            classify_line("**dangling"),
            LineRecord::Paragraph {
                spans: vec![text("**dangling")]
            }
        );
    }

    #[test]
    fn test_bold_remainder_does_not_rematch() {
        let line = "**Lead** and then **more** words";
        let LineRecord::BoldLead { rest, .. } = classify_line(line) else {
            panic!("expected bold lead");
        };
        let remainder: String = rest.iter().map(InlineSpan::text).collect();
        assert_eq!(remainder, " and then **more** words");
        assert!(!matches!(
            classify_line(&remainder),
            LineRecord::BoldLead { .. }
        ));
    }

    #[test]
    fn test_blank_and_whitespace_lines() {
        assert_eq!(classify_line(""), LineRecord::Blank);
        assert_eq!(classify_line("   \t"), LineRecord::Blank);
    }

    #[test]
    fn test_unmatched_brackets_stay_literal() {
        assert_eq!(scan_inline("a [b] (c) [d](e"), vec![text("a [b] (c) [d](e")]);
    }

    #[test]
    fn test_adjacent_links() {
        assert_eq!(
            scan_inline("[a](1)[b](2)"),
            vec![link("a", "1"), link("b", "2")]
        );
    }

    #[test]
    fn test_empty_segment_has_no_spans() {
        assert!(scan_inline("").is_empty());
    }

    #[test]
    fn test_bullet_prefix_without_space_is_paragraph() {
        assert!(matches!(
            classify_line("-not a bullet"),
            LineRecord::Paragraph { .. }
        ));
    }

    #[test]
    fn test_end_to_end_classification() {
        let doc = "# Jane Doe\n## Summary\nExperienced engineer.\n- Led a team\n";
        let records: Vec<_> = classify(doc).collect();
        assert_eq!(
            records,
            vec![
                LineRecord::Heading {
                    level: HeadingLevel::H1,
                    text: "Jane Doe"
                },
                LineRecord::Heading {
                    level: HeadingLevel::H2,
                    text: "Summary"
                },
                LineRecord::Paragraph {
                    spans: vec![text("Experienced engineer.")]
                },
                LineRecord::Bullet {
                    spans: vec![text("Led a team")]
                },
            ]
        );
    }

    #[test]
    fn test_sequence_is_restartable() {
        let lines = classify("a\n\nb");
        let first: Vec<_> = lines.clone().collect();
        let second: Vec<_> = lines.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_crlf_line_endings() {
        let records: Vec<_> = classify("# A\r\n- b\r\n").collect();
        assert_eq!(
            records[0],
            LineRecord::Heading {
                level: HeadingLevel::H1,
                text: "A"
            }
        );
        assert_eq!(
            records[1],
            LineRecord::Bullet {
                spans: vec![text("b")]
            }
        );
    }

    #[test]
    fn test_plain_text_drops_link_markup() {
        let record = classify_line("**Role:** at [Acme](https://acme.test)");
        assert_eq!(record.plain_text(), "Role: at Acme");
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(classify_line("- [x](y)")).unwrap();
        assert_eq!(json["kind"], "bullet");
        assert_eq!(json["spans"][0]["type"], "link");
        assert_eq!(json["spans"][0]["url"], "y");
    }

    #[test]
    fn test_safe_url_allows_web_and_mail_only() {
        let safe = |url| link("x", url).safe_url();
        assert_eq!(safe("https://a.io"), Some("https://a.io"));
        assert_eq!(safe("HTTP://a.io"), Some("HTTP://a.io"));
        assert_eq!(safe("mailto:jane@a.io"), Some("mailto:jane@a.io"));
        assert_eq!(safe("javascript:alert(1)"), None);
        assert_eq!(safe(" data:text/html,hi"), None);
        assert_eq!(safe("/relative"), None);
        assert_eq!(safe("ж"), None);
        assert_eq!(text("plain").safe_url(), None);
    }
}
