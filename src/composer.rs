//! The document composer: feeds rows, paragraphs and text blocks through
//! the layout engine against a single flow cursor.

use crate::block::{Fragment, TableRowSpec};
use crate::geometry::PageGeometry;
use crate::image::Image;
use crate::layout::{
    layout_paragraph, layout_table_row, FlowCursor, LaidOutPage, LayoutSettings, PageStamp,
    RowOutcome,
};
use crate::metrics::{Face, FontSpec, MetricsProvider, DEFAULT_LINE_SPACING};
use crate::style::Style;
use crate::units::{Pt, Px};
use id_arena::Arena;

/// How the trailing page numbers look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageNumberStyle {
    pub size: Pt,
    /// Gap between the number and the right edge of the paint area
    pub right_inset: Px,
    /// Distance of the baseline below the bottom of the paint area
    pub baseline_drop: Px,
}

impl Default for PageNumberStyle {
    fn default() -> Self {
        PageNumberStyle {
            size: Pt(12.0),
            right_inset: Px(20.0),
            baseline_drop: Px(40.0),
        }
    }
}

/// Settings for one composition
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerConfig {
    pub geometry: PageGeometry,
    /// Line height as a multiple of the font's single-spaced height
    pub line_spacing: f32,
    pub base_size: Pt,
    pub small_size: Pt,
    pub page_numbers: PageNumberStyle,
    /// Number of spaces a tab expands to in [Composer::add_text]
    pub tab_width: usize,
    /// Outline every cell and paragraph chunk
    pub debug_overlay: bool,
}

impl ComposerConfig {
    /// Create a configuration with the default text sizes and spacing
    pub fn new(geometry: PageGeometry) -> ComposerConfig {
        ComposerConfig {
            geometry,
            line_spacing: DEFAULT_LINE_SPACING,
            base_size: Pt(14.0),
            small_size: Pt(12.0),
            page_numbers: PageNumberStyle::default(),
            tab_width: 4,
            debug_overlay: false,
        }
    }

    pub fn line_spacing(&mut self, spacing: f32) -> &mut Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the base and small text sizes
    pub fn text_sizes(&mut self, base: Pt, small: Pt) -> &mut Self {
        self.base_size = base;
        self.small_size = small;
        self
    }

    pub fn page_numbers(&mut self, style: PageNumberStyle) -> &mut Self {
        self.page_numbers = style;
        self
    }

    pub fn tab_width(&mut self, width: usize) -> &mut Self {
        self.tab_width = width;
        self
    }

    pub fn debug_overlay(&mut self, enabled: bool) -> &mut Self {
        self.debug_overlay = enabled;
        self
    }

    pub(crate) fn layout_settings(&self) -> LayoutSettings {
        let dpi = self.geometry.resolution();
        LayoutSettings {
            base_size: self.base_size.to_px(dpi),
            small_size: self.small_size.to_px(dpi),
            line_spacing: self.line_spacing,
            debug_overlay: self.debug_overlay,
        }
    }
}

/// A finished layout: every page's drawing commands and the images they use
#[derive(Debug)]
pub struct Composition {
    pub geometry: PageGeometry,
    pub pages: Vec<LaidOutPage>,
    pub images: Arena<Image>,
}

impl Composition {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lays content out top to bottom, page after page.
///
/// Content is added in document order; the composer owns the flow cursor
/// and the decoded images until [Composer::finish] hands them over.
///
/// ```
/// use report_composer::*;
///
/// let geometry = PageGeometry::new(pagesize::A4, Margins::all(Mm(10.0)))?;
/// let metrics = MonospaceMetrics::new(Px(30.0), Px(60.0));
/// let mut composer = Composer::new(ComposerConfig::new(geometry), &metrics);
///
/// let w = composer.width();
/// composer.add_table_row(&TableRowSpec::new(
///     [Px(0.0), w],
///     ["Measurement report"],
///     vec![Style::default().with(StyleTrait::Bold)],
/// ));
/// composer.skip(Px(40.0));
/// composer.add_text("Notes go here", Style::default());
///
/// let composition = composer.finish();
/// assert_eq!(composition.page_count(), 1);
/// # Ok::<(), ComposeError>(())
/// ```
pub struct Composer<'m> {
    config: ComposerConfig,
    settings: LayoutSettings,
    metrics: &'m dyn MetricsProvider,
    cursor: FlowCursor,
    images: Arena<Image>,
}

impl<'m> Composer<'m> {
    /// Start a composition; the first page is opened immediately
    pub fn new(config: ComposerConfig, metrics: &'m dyn MetricsProvider) -> Composer<'m> {
        let geometry = config.geometry;
        let stamp = PageStamp {
            font: FontSpec::new(
                Face::Regular,
                config.page_numbers.size.to_px(geometry.resolution()),
            ),
            right_inset: config.page_numbers.right_inset,
            baseline_drop: config.page_numbers.baseline_drop,
        };
        let mut cursor = FlowCursor::new(geometry.width(), geometry.height(), stamp);
        cursor.begin();
        log::debug!(
            "composing on a {}x{} paint area at {} dpi",
            geometry.width(),
            geometry.height(),
            geometry.resolution()
        );

        Composer {
            settings: config.layout_settings(),
            config,
            metrics,
            cursor,
            images: Arena::new(),
        }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Width of the paint area
    pub fn width(&self) -> Px {
        self.cursor.page_width()
    }

    /// Height of the paint area
    pub fn height(&self) -> Px {
        self.cursor.page_height()
    }

    /// The current 1-based page number
    pub fn page(&self) -> u32 {
        self.cursor.page()
    }

    /// Distance of the write position from the top of the paint area
    pub fn offset(&self) -> Px {
        self.cursor.offset()
    }

    /// Move the write position without drawing; negative values move up
    pub fn skip(&mut self, delta: Px) {
        self.cursor.skip(delta);
    }

    pub fn new_page(&mut self) {
        self.cursor.new_page(self.metrics);
    }

    pub fn add_table_row(&mut self, row: &TableRowSpec) -> RowOutcome {
        layout_table_row(
            self.metrics,
            &self.settings,
            &mut self.cursor,
            &mut self.images,
            row,
        )
    }

    /// Flow `fragments` between `left` and `right`, outlining each chunk
    /// when `borders` is set
    pub fn add_paragraph(&mut self, left: Px, right: Px, fragments: &[Fragment], borders: bool) {
        layout_paragraph(
            self.metrics,
            &self.settings,
            &mut self.cursor,
            left,
            right,
            fragments,
            borders,
        );
    }

    /// Flow a block of plain text across the full width. Line endings are
    /// normalised to `\n` and tabs expanded to spaces first.
    pub fn add_text(&mut self, text: &str, style: Style) {
        self.add_text_between(Px::ZERO, self.width(), text, style);
    }

    /// [Composer::add_text], restricted to the band between `left` and `right`
    pub fn add_text_between(&mut self, left: Px, right: Px, text: &str, style: Style) {
        let text = normalise_text(text, self.config.tab_width);
        self.add_paragraph(left, right, &[Fragment::new(text, style)], false);
    }

    /// Close the last page and hand over the result
    pub fn finish(mut self) -> Composition {
        let pages = self.cursor.close(self.metrics);
        log::debug!("composition finished with {} pages", pages.len());
        Composition {
            geometry: self.config.geometry,
            pages,
            images: self.images,
        }
    }
}

fn normalise_text(text: &str, tab_width: usize) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', &" ".repeat(tab_width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MonospaceMetrics;

    fn geometry() -> PageGeometry {
        PageGeometry::from_pixels(Px(1000.0), Px(1000.0)).expect("valid geometry")
    }

    #[test]
    fn text_is_normalised_before_layout() {
        assert_eq!(normalise_text("a\r\nb\rc\td", 2), "a\nb\nc  d");
    }

    #[test]
    fn sizes_are_converted_at_the_page_resolution() {
        let settings = ComposerConfig::new(geometry()).layout_settings();
        assert_eq!(settings.base_size, Pt(14.0).to_px(300.0));
        assert_eq!(settings.small_size, Pt(12.0).to_px(300.0));
        assert_eq!(settings.line_spacing, 1.5);
    }

    #[test]
    fn empty_composition_has_one_unnumbered_page() {
        let metrics = MonospaceMetrics::new(Px(10.0), Px(100.0));
        let composer = Composer::new(ComposerConfig::new(geometry()), &metrics);
        let composition = composer.finish();
        assert_eq!(composition.page_count(), 1);
        assert!(composition.pages[0].commands.is_empty());
    }

    #[test]
    fn text_blocks_turn_pages_and_number_them() {
        let metrics = MonospaceMetrics::new(Px(10.0), Px(100.0));
        let mut composer = Composer::new(ComposerConfig::new(geometry()), &metrics);
        let text = vec!["line"; 10].join("\r\n");
        composer.add_text(&text, Style::default());
        assert_eq!(composer.page(), 2);

        let composition = composer.finish();
        assert_eq!(composition.page_count(), 2);
        for page in &composition.pages {
            let number = page
                .texts()
                .find(|r| r.baseline > Px(1000.0))
                .expect("every page is numbered");
            assert_eq!(number.text, page.number.to_string());
        }
    }
}
