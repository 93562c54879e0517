//! PDF Exporter: turns a Markdown document into a paginated drawing plan.
//!
//! # Algorithm
//! - A vertical cursor starts at the top margin of page 1.
//! - Each classified line is tokenized into styled words, then greedily
//!   word-wrapped to the content width with the Helvetica width tables.
//! - Before every wrapped line is drawn, the cursor checks
//!   `y + line_height > content_limit`; if so a `PageBreak` is emitted and
//!   `y` resets to the top margin.
//! - Consecutive words on one wrapped line that share a weight and link are
//!   merged into a single draw instruction.
//!
//! The plan is a pure function of the text and the geometry: the same input
//! always yields the same instructions.

use serde::Serialize;

use crate::export::metrics::{FontWeight, PageGeometry};
use crate::export::ExportDocument;
use crate::markdown::{classify, HeadingLevel, InlineSpan, LineRecord};

// ────────────────────────────────────────────────────────────────────────────
// Per-kind constants
// ────────────────────────────────────────────────────────────────────────────

/// Vertical space and font size for one kind of line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub line_height_mm: f32,
    pub size_pt: f32,
}

pub const HEADING_1: LineStyle = LineStyle {
    line_height_mm: 12.0,
    size_pt: 22.0,
};
pub const HEADING_2: LineStyle = LineStyle {
    line_height_mm: 10.0,
    size_pt: 16.0,
};
pub const HEADING_3: LineStyle = LineStyle {
    line_height_mm: 8.0,
    size_pt: 14.0,
};
pub const BODY: LineStyle = LineStyle {
    line_height_mm: 7.0,
    size_pt: 12.0,
};
/// Gap left by a blank line.
pub const BLANK_GAP_MM: f32 = 5.0;

const BULLET_GLYPH: &str = "•";

fn heading_style(level: HeadingLevel) -> LineStyle {
    match level {
        HeadingLevel::H1 => HEADING_1,
        HeadingLevel::H2 => HEADING_2,
        HeadingLevel::H3 => HEADING_3,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One text draw at a fixed position. `y` is the baseline, in millimetres from the page top.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawInstruction {
    /// 1-based page number.
    pub page: u32,
    pub x: f32,
    pub y: f32,
    pub weight: FontWeight,
    pub size_pt: f32,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanItem {
    Draw(DrawInstruction),
    PageBreak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfPlan {
    pub file_name: &'static str,
    pub geometry: PageGeometry,
    pub page_count: u32,
    pub items: Vec<PlanItem>,
}

impl PdfPlan {
    pub fn draws(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.items.iter().filter_map(|item| match item {
            PlanItem::Draw(d) => Some(d),
            PlanItem::PageBreak => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// Vertical position and current page. `y` never passes the content limit.
#[derive(Debug)]
struct ExportCursor {
    y: f32,
    page: u32,
    top: f32,
    limit: f32,
}

impl ExportCursor {
    fn new(geometry: &PageGeometry) -> Self {
        Self {
            y: geometry.top_margin_mm,
            page: 1,
            top: geometry.top_margin_mm,
            limit: geometry.content_limit_mm(),
        }
    }

    /// Breaks the page first if `height` would overflow it.
    fn reserve(&mut self, height: f32, items: &mut Vec<PlanItem>) {
        // A fresh page always accepts the line, even one taller than the page.
        if self.y + height > self.limit && self.y > self.top {
            items.push(PlanItem::PageBreak);
            self.page += 1;
            self.y = self.top;
        }
    }

    fn advance(&mut self, height: f32) {
        self.y = (self.y + height).min(self.limit);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenizing and wrapping
// ────────────────────────────────────────────────────────────────────────────

/// A whitespace-free piece of text with its style.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Token<'a> {
    text: &'a str,
    weight: FontWeight,
    link: Option<&'a str>,
    /// Whether whitespace separated this token from the previous one.
    space_before: bool,
}

/// Splits `text` on whitespace, remembering where whitespace sat across span boundaries.
fn push_tokens<'a>(
    tokens: &mut Vec<Token<'a>>,
    text: &'a str,
    weight: FontWeight,
    link: Option<&'a str>,
    pending_space: &mut bool,
) {
    let mut rest = text;
    loop {
        let trimmed = rest.trim_start();
        if trimmed.len() != rest.len() {
            *pending_space = true;
        }
        if trimmed.is_empty() {
            break;
        }
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        tokens.push(Token {
            text: &trimmed[..end],
            weight,
            link,
            space_before: *pending_space,
        });
        *pending_space = false;
        rest = &trimmed[end..];
    }
}

fn push_spans<'a>(
    tokens: &mut Vec<Token<'a>>,
    spans: &[InlineSpan<'a>],
    weight: FontWeight,
    pending_space: &mut bool,
) {
    for span in spans {
        push_tokens(tokens, span.text(), weight, span.safe_url(), pending_space);
    }
}

/// Groups glued tokens (no whitespace between them) into unbreakable words.
fn group_words<'a>(tokens: &[Token<'a>]) -> Vec<Vec<Token<'a>>> {
    let mut words: Vec<Vec<Token<'a>>> = Vec::new();
    for token in tokens {
        match words.last_mut() {
            Some(word) if !token.space_before => word.push(*token),
            _ => words.push(vec![*token]),
        }
    }
    words
}

/// Greedy word-wrap. Returns one token list per printed line.
/// A word wider than `max_width` sits alone on its own line.
fn wrap<'a>(tokens: &[Token<'a>], size_pt: f32, max_width: f32) -> Vec<Vec<Token<'a>>> {
    let mut lines: Vec<Vec<Token<'a>>> = Vec::new();
    let mut current: Vec<Token<'a>> = Vec::new();
    let mut current_width = 0.0_f32;

    for word in group_words(tokens) {
        let word_w: f32 = word.iter().map(|t| t.weight.measure_mm(t.text, size_pt)).sum();
        let space_w = if current.is_empty() {
            0.0
        } else {
            FontWeight::Normal.space_mm(size_pt)
        };

        if !current.is_empty() && current_width + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = word_w;
        } else {
            current_width += space_w + word_w;
        }
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Merges a wrapped line's tokens into positioned runs.
fn line_runs(
    line: &[Token<'_>],
    x0: f32,
    y: f32,
    page: u32,
    size_pt: f32,
) -> Vec<DrawInstruction> {
    let mut runs: Vec<DrawInstruction> = Vec::new();
    let mut x = x0;

    for (i, token) in line.iter().enumerate() {
        let spaced = i > 0 && token.space_before;
        let gap = if spaced {
            FontWeight::Normal.space_mm(size_pt)
        } else {
            0.0
        };

        match runs.last_mut() {
            Some(run) if run.weight == token.weight && run.link.as_deref() == token.link => {
                if spaced {
                    run.text.push(' ');
                }
                run.text.push_str(token.text);
            }
            _ => runs.push(DrawInstruction {
                page,
                x: x + gap,
                y,
                weight: token.weight,
                size_pt,
                text: token.text.to_string(),
                link: token.link.map(str::to_string),
            }),
        }
        x += gap + token.weight.measure_mm(token.text, size_pt);
    }
    runs
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `markdown` onto pages of `geometry`.
pub fn layout_pdf(markdown: &str, geometry: &PageGeometry, document: ExportDocument) -> PdfPlan {
    let mut items = Vec::new();
    let mut cursor = ExportCursor::new(geometry);
    let content_width = geometry.content_width_mm();
    let left = geometry.side_margin_mm;

    for record in classify(markdown) {
        let mut tokens = Vec::new();
        let mut pending_space = false;

        let (style, x0, width) = match &record {
            LineRecord::Blank => {
                cursor.advance(BLANK_GAP_MM);
                continue;
            }
            LineRecord::Heading { level, text } => {
                push_tokens(&mut tokens, text, FontWeight::Bold, None, &mut pending_space);
                (heading_style(*level), left, content_width)
            }
            LineRecord::BoldLead { bold, rest } => {
                push_tokens(&mut tokens, bold, FontWeight::Bold, None, &mut pending_space);
                push_spans(&mut tokens, rest, FontWeight::Normal, &mut pending_space);
                (BODY, left, content_width)
            }
            LineRecord::Bullet { spans } => {
                push_tokens(
                    &mut tokens,
                    BULLET_GLYPH,
                    FontWeight::Normal,
                    None,
                    &mut pending_space,
                );
                pending_space = true;
                push_spans(&mut tokens, spans, FontWeight::Normal, &mut pending_space);
                let indent = geometry.bullet_indent_mm;
                (BODY, left + indent, content_width - indent)
            }
            LineRecord::Paragraph { spans } => {
                push_spans(&mut tokens, spans, FontWeight::Normal, &mut pending_space);
                (BODY, left, content_width)
            }
        };

        let mut lines = wrap(&tokens, style.size_pt, width);
        if lines.is_empty() {
            // e.g. "# " with no title: keeps its vertical space, draws nothing.
            lines.push(Vec::new());
        }

        for line in &lines {
            cursor.reserve(style.line_height_mm, &mut items);
            items.extend(
                line_runs(line, x0, cursor.y, cursor.page, style.size_pt)
                    .into_iter()
                    .map(PlanItem::Draw),
            );
            cursor.advance(style.line_height_mm);
        }
    }

    PdfPlan {
        file_name: document.pdf_file_name(),
        geometry: geometry.clone(),
        page_count: cursor.page,
        items,
    }
}
