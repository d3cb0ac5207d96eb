//! Page layout: word wrapping, page breaking and the flow of table rows and
//! paragraphs down a sequence of pages.
//!
//! Everything here works in device pixels relative to the top-left corner of
//! the paint area and produces [DrawCommand]s; nothing touches the PDF layer.
//!
//! # Example
//!
//! ```
//! use report_composer::layout::{wrap_paragraph, split_by_height};
//! use report_composer::{Face, FontSpec, MonospaceMetrics, Px};
//!
//! let metrics = MonospaceMetrics::new(Px(10.0), Px(100.0));
//! let font = FontSpec::new(Face::Regular, Px(58.0));
//!
//! let lines = wrap_paragraph(&metrics, &font, "Alpha Beta Gamma", Px(100.0));
//! assert_eq!(lines[0].text, "Alpha Beta");
//!
//! let split = split_by_height(&metrics, &font, "one\ntwo", Px(100.0), Px(150.0), 1.0);
//! assert_eq!((split.first, split.second), ("one", "two"));
//! ```

mod command;
mod cursor;
mod paragraph;
mod split;
mod table;
mod wrap;

pub use command::*;
pub use cursor::*;
pub use paragraph::*;
pub use split::*;
pub use table::*;
pub use wrap::*;

use crate::metrics::{FontSpec, MetricsProvider};
use crate::style::{HorizontalAlign, Style, VerticalAlign};
use crate::units::Px;

/// Text sizes and spacing shared by the row and paragraph layouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    pub base_size: Px,
    /// Size used for blocks with [StyleTrait::Small](crate::StyleTrait::Small)
    pub small_size: Px,
    pub line_spacing: f32,
    /// Outline every cell and paragraph chunk
    pub debug_overlay: bool,
}

impl LayoutSettings {
    pub fn font_for(&self, style: &Style) -> FontSpec {
        FontSpec::for_style(style, self.base_size, self.small_size)
    }
}

/// Offset of content `inner` wide inside a box `outer` wide
pub(crate) fn horizontal_offset(align: HorizontalAlign, outer: Px, inner: Px) -> Px {
    match align {
        HorizontalAlign::Left | HorizontalAlign::Justify => Px::ZERO,
        HorizontalAlign::Center => (outer - inner) / 2.0,
        HorizontalAlign::Right => outer - inner,
    }
}

/// Offset of content `inner` high inside a box `outer` high. Content taller
/// than the box always starts at its top.
pub(crate) fn vertical_offset(align: VerticalAlign, outer: Px, inner: Px) -> Px {
    if inner >= outer {
        return Px::ZERO;
    }
    match align {
        VerticalAlign::Top | VerticalAlign::Baseline => Px::ZERO,
        VerticalAlign::Center => (outer - inner) / 2.0,
        VerticalAlign::Bottom => outer - inner,
    }
}

/// Position wrapped lines inside a box, one line every `line_height`.
/// Lines whose box would extend below `max_height` are clipped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn place_lines(
    metrics: &dyn MetricsProvider,
    font: &FontSpec,
    lines: &[LayoutLine],
    left: Px,
    top: Px,
    width: Px,
    line_height: Px,
    max_height: Px,
    align: HorizontalAlign,
) -> Vec<DrawCommand> {
    // absorbs rounding in box edges computed from different offsets
    let max_height = max_height + Px(0.01);
    let ascent = metrics.ascent(font);
    lines
        .iter()
        .enumerate()
        .take_while(|(i, _)| line_height * (*i as f32 + 1.0) <= max_height)
        .filter(|(_, line)| !line.text.is_empty())
        .map(|(i, line)| {
            let advance = metrics.advance_width(font, &line.text);
            DrawCommand::Text(TextRun {
                text: line.text.clone(),
                font: *font,
                x: left + horizontal_offset(align, width, advance),
                baseline: top + line_height * i as f32 + ascent,
            })
        })
        .collect()
}
