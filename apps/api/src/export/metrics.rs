//! Static font-metric tables and page geometry for the PDF layout.
//!
//! Widths are the standard Type 1 Helvetica / Helvetica-Bold advance widths in
//! 1/1000 em, covering ASCII 0x20..=0x7E. Index = (char as usize) - 32.
//! Non-ASCII characters fall back to an average width; the bullet glyph has its own entry.

use serde::{Deserialize, Serialize};

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const BULLET_WIDTH: u16 = 350;
const FALLBACK_WIDTH: u16 = 556;

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Font weight of a draw instruction. Maps to Helvetica / Helvetica-Bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    fn table(self) -> &'static [u16; 95] {
        match self {
            FontWeight::Normal => &HELVETICA,
            FontWeight::Bold => &HELVETICA_BOLD,
        }
    }

    /// Advance width of `c` in 1/1000 em.
    pub fn char_units(self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.table()[code - 32]
        } else if c == '•' {
            BULLET_WIDTH
        } else {
            FALLBACK_WIDTH
        }
    }

    /// Rendered width of `s` in millimetres at `size_pt`.
    pub fn measure_mm(self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| self.char_units(c) as u32).sum();
        units as f32 / 1000.0 * size_pt * MM_PER_PT
    }

    pub fn space_mm(self, size_pt: f32) -> f32 {
        self.char_units(' ') as f32 / 1000.0 * size_pt * MM_PER_PT
    }
}

/// Page geometry for the PDF plan, in millimetres.
///
/// Defaults: A4 portrait, 10 mm side and bottom margins, 15 mm top margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub side_margin_mm: f32,
    pub top_margin_mm: f32,
    pub bottom_margin_mm: f32,
    /// Extra left indent for bullet items.
    pub bullet_indent_mm: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            side_margin_mm: 10.0,
            top_margin_mm: 15.0,
            bottom_margin_mm: 10.0,
            bullet_indent_mm: 5.0,
        }
    }
}

impl PageGeometry {
    /// Lowest `y` a line may reach (baseline plus its height).
    pub fn content_limit_mm(&self) -> f32 {
        self.height_mm - self.bottom_margin_mm
    }

    /// Vertical space available between the top margin and the content limit.
    pub fn usable_height_mm(&self) -> f32 {
        self.content_limit_mm() - self.top_margin_mm
    }

    pub fn content_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.side_margin_mm
    }

    /// Rejects geometries with no room for text.
    pub fn is_usable(&self) -> bool {
        self.usable_height_mm() > 0.0 && self.content_width_mm() - self.bullet_indent_mm > 0.0
    }
}
