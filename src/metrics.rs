//! Text measurement. Everything that wraps or paginates text asks a
//! [MetricsProvider]; nothing else in layout looks at fonts.

use crate::style::{Style, StyleTrait};
use crate::units::Px;
use serde::Serialize;

/// Line spacing used for wrapped text unless configured otherwise
pub const DEFAULT_LINE_SPACING: f32 = 1.5;

/// Which face of a family to use
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Face {
    #[default]
    Regular,
    Italic,
    Bold,
    BoldItalic,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Regular, Face::Italic, Face::Bold, Face::BoldItalic];

    pub fn new(bold: bool, italic: bool) -> Face {
        match (bold, italic) {
            (false, false) => Face::Regular,
            (false, true) => Face::Italic,
            (true, false) => Face::Bold,
            (true, true) => Face::BoldItalic,
        }
    }
}

/// A face at a size, in device pixels (the em size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSpec {
    pub face: Face,
    pub size: Px,
}

impl FontSpec {
    pub fn new(face: Face, size: Px) -> FontSpec {
        FontSpec { face, size }
    }

    /// Select the face and size for a block style, given the base and small
    /// text sizes
    pub fn for_style(style: &Style, base: Px, small: Px) -> FontSpec {
        FontSpec {
            face: Face::new(style.has(StyleTrait::Bold), style.has(StyleTrait::Italic)),
            size: if style.has(StyleTrait::Small) {
                small
            } else {
                base
            },
        }
    }
}

/// Measures single lines of text. Implementations must be pure: the same
/// font and text always give the same result within one composition.
pub trait MetricsProvider {
    /// Advance width of `text` laid out on one line
    fn advance_width(&self, font: &FontSpec, text: &str) -> Px;

    /// Distance from the top of a line to its baseline
    fn ascent(&self, font: &FontSpec) -> Px;

    /// Height of one single-spaced line (ascent plus descent)
    fn base_line_height(&self, font: &FontSpec) -> Px;

    /// Height of one line at `spacing` times the single-spaced height
    fn line_height(&self, font: &FontSpec, spacing: f32) -> Px {
        self.base_line_height(font) * spacing
    }
}

impl<M: MetricsProvider + ?Sized> MetricsProvider for &M {
    fn advance_width(&self, font: &FontSpec, text: &str) -> Px {
        (**self).advance_width(font, text)
    }

    fn ascent(&self, font: &FontSpec) -> Px {
        (**self).ascent(font)
    }

    fn base_line_height(&self, font: &FontSpec) -> Px {
        (**self).base_line_height(font)
    }
}

/// Fixed-advance metrics: every character is `char_width` wide and every
/// single-spaced line `line_height` tall, regardless of face or size. Useful
/// for previewing pagination without loading fonts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: Px,
    pub line_height: Px,
    pub ascent: Px,
}

impl MonospaceMetrics {
    pub fn new(char_width: Px, line_height: Px) -> MonospaceMetrics {
        MonospaceMetrics {
            char_width,
            line_height,
            ascent: line_height * 0.8,
        }
    }
}

impl MetricsProvider for MonospaceMetrics {
    fn advance_width(&self, _font: &FontSpec, text: &str) -> Px {
        self.char_width * text.chars().count() as f32
    }

    fn ascent(&self, _font: &FontSpec) -> Px {
        self.ascent
    }

    fn base_line_height(&self, _font: &FontSpec) -> Px {
        self.line_height
    }
}
