//! Content fed to the composer: blocks, table rows and paragraph fragments.

use crate::style::Style;
use crate::units::Px;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A unit of content. Text is plain UTF-8 with `\n` paragraph breaks; images
/// are kept encoded (PNG or JPEG) until a cell needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentBlock {
    Text(String),
    Image(Vec<u8>),
}

impl ContentBlock {
    pub fn text<S: Into<String>>(text: S) -> ContentBlock {
        ContentBlock::Text(text.into())
    }

    /// An empty text block, used for spacer columns
    pub fn empty() -> ContentBlock {
        ContentBlock::Text(String::new())
    }

    /// Read an encoded image from disk
    pub fn image_from_disk<P: AsRef<Path>>(path: P) -> Result<ContentBlock, std::io::Error> {
        Ok(ContentBlock::Image(std::fs::read(path)?))
    }
}

impl From<&str> for ContentBlock {
    fn from(text: &str) -> Self {
        ContentBlock::Text(text.to_string())
    }
}

impl From<String> for ContentBlock {
    fn from(text: String) -> Self {
        ContentBlock::Text(text)
    }
}

/// One table row: `N + 1` column boundaries (device pixels from the left edge
/// of the paint area), `N` content blocks and `N` styles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRowSpec {
    pub boundaries: Vec<Px>,
    pub cells: Vec<ContentBlock>,
    pub styles: Vec<Style>,
    /// Upper bound on the row height, if any
    #[serde(default)]
    pub max_height: Option<Px>,
    /// Stroke the outline of every cell
    #[serde(default)]
    pub grid: bool,
}

impl TableRowSpec {
    pub fn new<B, C>(boundaries: B, cells: C, styles: Vec<Style>) -> TableRowSpec
    where
        B: IntoIterator,
        B::Item: Into<Px>,
        C: IntoIterator,
        C::Item: Into<ContentBlock>,
    {
        TableRowSpec {
            boundaries: boundaries.into_iter().map(Into::into).collect(),
            cells: cells.into_iter().map(Into::into).collect(),
            styles,
            max_height: None,
            grid: false,
        }
    }

    /// Build a row from raw cell bytes and packed [format](crate::style::format)
    /// integers. Cells flagged as pictures become image blocks; every other cell
    /// is decoded as (lossy) UTF-8 text.
    pub fn from_legacy(boundaries: &[f32], cells: &[&[u8]], formats: &[u32]) -> TableRowSpec {
        let decoded: Vec<(Style, bool)> = formats.iter().map(|&f| Style::from_bits(f)).collect();
        let cells = cells.iter().enumerate().map(|(i, bytes)| {
            let picture = decoded.get(i).is_some_and(|(_, picture)| *picture);
            if picture {
                ContentBlock::Image(bytes.to_vec())
            } else {
                ContentBlock::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        });
        // one style per format, even when the counts disagree
        TableRowSpec {
            boundaries: boundaries.iter().copied().map(Px).collect(),
            cells: cells.collect(),
            styles: decoded.into_iter().map(|(style, _)| style).collect(),
            ..Default::default()
        }
    }

    pub fn with_max_height(mut self, max_height: Px) -> TableRowSpec {
        self.max_height = Some(max_height);
        self
    }

    pub fn with_grid(mut self, grid: bool) -> TableRowSpec {
        self.grid = grid;
        self
    }

    pub fn column_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the boundary, content and style arrays agree with each other
    /// and the boundaries run left to right
    pub fn is_well_formed(&self) -> bool {
        self.boundaries.len() >= 2
            && self.cells.len() == self.boundaries.len() - 1
            && self.cells.len() == self.styles.len()
            && self.boundaries.windows(2).all(|w| w[0] <= w[1])
    }
}

/// A run of text sharing one style inside a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    #[serde(default)]
    pub style: Style,
}

impl Fragment {
    pub fn new<S: Into<String>>(text: S, style: Style) -> Fragment {
        Fragment {
            text: text.into(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{format, HorizontalAlign, StyleTrait};

    #[test]
    fn legacy_row_splits_pictures_from_text() {
        let row = TableRowSpec::from_legacy(
            &[0.0, 100.0, 300.0],
            &[&b"\x89PNG"[..], "Подпись".as_bytes()],
            &[format::PICTURE, format::ALIGN_HCENTER + format::ITALIC],
        );
        assert!(row.is_well_formed());
        assert!(matches!(row.cells[0], ContentBlock::Image(_)));
        assert_eq!(row.cells[1], ContentBlock::text("Подпись"));
        assert_eq!(row.styles[1].horizontal, HorizontalAlign::Center);
        assert!(row.styles[1].has(StyleTrait::Italic));
    }

    #[test]
    fn mismatched_arrays_are_malformed() {
        let row = TableRowSpec::new(
            [Px(0.0), Px(10.0), Px(20.0), Px(30.0)],
            ["a", "b"],
            vec![Style::default(); 2],
        );
        assert!(!row.is_well_formed());

        let row = TableRowSpec::new([Px(0.0)], Vec::<&str>::new(), vec![]);
        assert!(!row.is_well_formed());

        let row = TableRowSpec::new([Px(50.0), Px(10.0)], ["a"], vec![Style::default()]);
        assert!(!row.is_well_formed());

        let row = TableRowSpec::from_legacy(
            &[0.0, 500.0, 1000.0],
            &[&b"a"[..], &b"b"[..]],
            &[format::ALIGN_LEFT, format::ALIGN_LEFT, format::BOLD],
        );
        assert_eq!(row.styles.len(), 3);
        assert!(!row.is_well_formed());

        let row = TableRowSpec::from_legacy(
            &[0.0, 500.0, 1000.0],
            &[&b"a"[..], &b"b"[..]],
            &[format::BOLD],
        );
        assert!(!row.is_well_formed());
    }
}
