//! Per-block presentation: alignment within a cell and a small set of
//! typographic traits.
//!
//! Older callers describe a cell with one packed integer (see [format]);
//! [Style::from_bits] decodes that into the explicit types used here.

use serde::{Deserialize, Serialize};

/// Vertical placement of content inside its cell
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
    /// Fallback for an unset vertical alignment. Placed like [VerticalAlign::Top].
    #[default]
    Baseline,
}

/// Horizontal placement of content inside its cell
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
    /// Fallback for an unset horizontal alignment. Justified typography is
    /// not supported, so this is placed like [HorizontalAlign::Left].
    #[default]
    Justify,
}

/// A typographic or drawing trait of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTrait {
    Italic,
    Bold,
    /// Use the small text size instead of the base size
    Small,
    /// Draw the cell text in a single clipped call at natural line spacing
    /// instead of running full paragraph layout
    FastDraw,
}

impl StyleTrait {
    fn bit(self) -> u8 {
        match self {
            StyleTrait::Italic => 1,
            StyleTrait::Bold => 1 << 1,
            StyleTrait::Small => 1 << 2,
            StyleTrait::FastDraw => 1 << 3,
        }
    }
}

/// A set of [StyleTrait]s
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Traits(u8);

impl Traits {
    pub fn empty() -> Traits {
        Traits(0)
    }

    pub fn contains(&self, t: StyleTrait) -> bool {
        self.0 & t.bit() != 0
    }

    pub fn insert(&mut self, t: StyleTrait) {
        self.0 |= t.bit();
    }

    pub fn remove(&mut self, t: StyleTrait) {
        self.0 &= !t.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = StyleTrait> + '_ {
        [
            StyleTrait::Italic,
            StyleTrait::Bold,
            StyleTrait::Small,
            StyleTrait::FastDraw,
        ]
        .into_iter()
        .filter(|t| self.contains(*t))
    }
}

impl FromIterator<StyleTrait> for Traits {
    fn from_iter<I: IntoIterator<Item = StyleTrait>>(iter: I) -> Self {
        let mut traits = Traits::empty();
        for t in iter {
            traits.insert(t);
        }
        traits
    }
}

impl Serialize for Traits {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for Traits {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let traits: Vec<StyleTrait> = Vec::deserialize(deserializer)?;
        Ok(traits.into_iter().collect())
    }
}

/// How a block is presented: its placement within the cell and its traits
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub vertical: VerticalAlign,
    pub horizontal: HorizontalAlign,
    pub traits: Traits,
}

/// The packed integer format: vertical alignment in bits 0-1, horizontal
/// alignment in bits 2-3, one bit per remaining flag
pub mod format {
    pub const ALIGN_TOP: u32 = 1;
    pub const ALIGN_VCENTER: u32 = 2;
    pub const ALIGN_BOTTOM: u32 = 3;
    pub const ALIGN_LEFT: u32 = 4;
    pub const ALIGN_HCENTER: u32 = 8;
    pub const ALIGN_RIGHT: u32 = 12;
    pub const ITALIC: u32 = 16;
    pub const BOLD: u32 = 32;
    pub const PICTURE: u32 = 64;
    pub const FAST_DRAW: u32 = 128;
    pub const SMALL: u32 = 256;

    pub(crate) const VERTICAL_MASK: u32 = 3;
    pub(crate) const HORIZONTAL_MASK: u32 = 12;
}

impl Style {
    pub fn new(vertical: VerticalAlign, horizontal: HorizontalAlign) -> Style {
        Style {
            vertical,
            horizontal,
            traits: Traits::empty(),
        }
    }

    /// Add a trait, builder style
    pub fn with(mut self, t: StyleTrait) -> Style {
        self.traits.insert(t);
        self
    }

    pub fn has(&self, t: StyleTrait) -> bool {
        self.traits.contains(t)
    }

    /// Decode a packed [format] integer. Returns the style and whether the
    /// [format::PICTURE] bit was set. A vertical field of 0 decodes to
    /// [VerticalAlign::Baseline] and a horizontal field of 0 to
    /// [HorizontalAlign::Justify].
    pub fn from_bits(bits: u32) -> (Style, bool) {
        let vertical = match bits & format::VERTICAL_MASK {
            format::ALIGN_TOP => VerticalAlign::Top,
            format::ALIGN_VCENTER => VerticalAlign::Center,
            format::ALIGN_BOTTOM => VerticalAlign::Bottom,
            _ => VerticalAlign::Baseline,
        };
        let horizontal = match bits & format::HORIZONTAL_MASK {
            format::ALIGN_LEFT => HorizontalAlign::Left,
            format::ALIGN_HCENTER => HorizontalAlign::Center,
            format::ALIGN_RIGHT => HorizontalAlign::Right,
            _ => HorizontalAlign::Justify,
        };

        let mut traits = Traits::empty();
        for (flag, t) in [
            (format::ITALIC, StyleTrait::Italic),
            (format::BOLD, StyleTrait::Bold),
            (format::SMALL, StyleTrait::Small),
            (format::FAST_DRAW, StyleTrait::FastDraw),
        ] {
            if bits & flag != 0 {
                traits.insert(t);
            }
        }

        (
            Style {
                vertical,
                horizontal,
                traits,
            },
            bits & format::PICTURE != 0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::format::*;
    use super::*;

    #[test]
    fn decodes_both_alignment_fields_independently() {
        let (style, picture) = Style::from_bits(ALIGN_BOTTOM + ALIGN_RIGHT + ITALIC + SMALL);
        assert_eq!(style.vertical, VerticalAlign::Bottom);
        assert_eq!(style.horizontal, HorizontalAlign::Right);
        assert!(style.has(StyleTrait::Italic));
        assert!(style.has(StyleTrait::Small));
        assert!(!style.has(StyleTrait::Bold));
        assert!(!picture);
    }

    #[test]
    fn unset_fields_fall_back() {
        let (style, picture) = Style::from_bits(PICTURE);
        assert_eq!(style.vertical, VerticalAlign::Baseline);
        assert_eq!(style.horizontal, HorizontalAlign::Justify);
        assert!(style.traits.is_empty());
        assert!(picture);
    }

    #[test]
    fn centre_shortcut_and_fast_draw() {
        let (style, _) = Style::from_bits(ALIGN_VCENTER + ALIGN_HCENTER + FAST_DRAW + BOLD);
        assert_eq!(style.vertical, VerticalAlign::Center);
        assert_eq!(style.horizontal, HorizontalAlign::Center);
        assert!(style.has(StyleTrait::FastDraw));
        assert!(style.has(StyleTrait::Bold));
    }

    #[test]
    fn traits_deserialize_from_names() {
        let style: Style =
            serde_json::from_str(r#"{"vertical":"bottom","traits":["italic","fast_draw"]}"#)
                .expect("valid style");
        assert_eq!(style.vertical, VerticalAlign::Bottom);
        assert_eq!(style.horizontal, HorizontalAlign::Justify);
        assert!(style.has(StyleTrait::Italic));
        assert!(style.has(StyleTrait::FastDraw));
    }
}
