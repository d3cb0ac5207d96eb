use super::command::DrawCommand;
use super::cursor::FlowCursor;
use super::wrap::{wrap_text, wrapped_height};
use super::{horizontal_offset, place_lines, vertical_offset, LayoutSettings};
use crate::block::{ContentBlock, TableRowSpec};
use crate::colour::colours;
use crate::image::Image;
use crate::metrics::MetricsProvider;
use crate::rect::Rect;
use crate::style::{Style, StyleTrait};
use crate::units::Px;
use id_arena::Arena;

/// What happened to a table row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowOutcome {
    /// The row was drawn on `page` with its top edge at `top`
    Placed { page: u32, top: Px, height: Px },
    /// The row was malformed and ignored; the cursor did not move
    Skipped,
    /// The row was taller than an empty page and was not drawn
    Dropped { height: Px },
}

enum Measured {
    Text { height: Px },
    Image { image: Image, height: Px },
    Undecodable,
}

impl Measured {
    fn height(&self) -> Px {
        match self {
            Measured::Text { height } | Measured::Image { height, .. } => *height,
            Measured::Undecodable => Px::ZERO,
        }
    }
}

fn measure(
    metrics: &dyn MetricsProvider,
    settings: &LayoutSettings,
    cell: &ContentBlock,
    style: &Style,
    width: Px,
) -> Measured {
    match cell {
        ContentBlock::Text(text) => Measured::Text {
            height: wrapped_height(
                metrics,
                &settings.font_for(style),
                text,
                width,
                settings.line_spacing,
            ),
        },
        ContentBlock::Image(data) => match Image::from_bytes(data) {
            Ok(image) => {
                // scaled to the column width, never enlarged
                let scale = (width.0 / image.width).min(1.0);
                let height = Px(image.height * scale);
                Measured::Image { image, height }
            }
            Err(e) => {
                log::warn!("skipping image cell that can't be decoded: {e}");
                Measured::Undecodable
            }
        },
    }
}

/// Lay out one table row at the cursor.
///
/// Every cell is measured at its column width; the row is as tall as its
/// tallest cell, capped by the row's maximum height if it has one. A row
/// that does not fit below the cursor moves to a new page; a row that does
/// not fit on an empty page is dropped. Decoded images are moved into
/// `images` and referenced from the page's draw commands.
pub fn layout_table_row(
    metrics: &dyn MetricsProvider,
    settings: &LayoutSettings,
    cursor: &mut FlowCursor,
    images: &mut Arena<Image>,
    row: &TableRowSpec,
) -> RowOutcome {
    if !row.is_well_formed() {
        log::warn!(
            "ignoring malformed table row: {} boundaries, {} cells, {} styles",
            row.boundaries.len(),
            row.cells.len(),
            row.styles.len()
        );
        return RowOutcome::Skipped;
    }

    let columns: Vec<(Px, Px)> = row
        .boundaries
        .windows(2)
        .map(|w| (w[0], w[1] - w[0]))
        .collect();

    let measured: Vec<Measured> = row
        .cells
        .iter()
        .zip(&row.styles)
        .zip(&columns)
        .map(|((cell, style), (_, width))| measure(metrics, settings, cell, style, *width))
        .collect();

    let natural = measured
        .iter()
        .map(Measured::height)
        .fold(Px::ZERO, Px::max);
    let height = match row.max_height {
        Some(max) if max > Px::ZERO => max.min(natural),
        _ => natural,
    };

    if !cursor.fits(height) {
        cursor.new_page(metrics);
        if height > cursor.page_height() {
            log::warn!(
                "dropping table row {} high, the page is only {} high",
                height,
                cursor.page_height()
            );
            return RowOutcome::Dropped { height };
        }
    }

    let top = cursor.offset();
    for ((cell, measured), (style, (left, width))) in row
        .cells
        .iter()
        .zip(measured)
        .zip(row.styles.iter().zip(columns))
    {
        let cell_rect = Rect::from_ltwh(left, top, width, height);
        match (cell, measured) {
            (ContentBlock::Text(text), Measured::Text { .. }) => {
                draw_text_cell(metrics, settings, cursor, text, style, &cell_rect);
            }
            (_, Measured::Image { image, .. }) => {
                let scale = (width.0 / image.width)
                    .min(height.0 / image.height)
                    .min(1.0);
                let (w, h) = (Px(image.width * scale), Px(image.height * scale));
                let x = left + horizontal_offset(style.horizontal, width, w);
                let y = top + vertical_offset(style.vertical, height, h);
                let id = images.alloc(image);
                cursor.draw(DrawCommand::Image {
                    image: id,
                    rect: Rect::from_ltwh(x, y, w, h),
                });
            }
            _ => {}
        }

        if row.grid || settings.debug_overlay {
            cursor.draw(DrawCommand::Outline {
                rect: cell_rect,
                colour: colours::BLACK,
            });
        }
    }

    log::debug!(
        "placed {}-column row on page {} at {} ({} high)",
        row.column_count(),
        cursor.page(),
        top,
        height
    );
    cursor.skip(height);
    RowOutcome::Placed {
        page: cursor.page(),
        top,
        height,
    }
}

fn draw_text_cell(
    metrics: &dyn MetricsProvider,
    settings: &LayoutSettings,
    cursor: &mut FlowCursor,
    text: &str,
    style: &Style,
    cell: &Rect<Px>,
) {
    let font = settings.font_for(style);
    let spacing = if style.has(StyleTrait::FastDraw) {
        1.0
    } else {
        settings.line_spacing
    };
    let line_height = metrics.line_height(&font, spacing);
    let lines = wrap_text(metrics, &font, text, cell.width());

    let text_height = line_height * lines.len() as f32;
    let top = cell.y1 + vertical_offset(style.vertical, cell.height(), text_height);
    for command in place_lines(
        metrics,
        &font,
        &lines,
        cell.x1,
        top,
        cell.width(),
        line_height,
        cell.y2 - top,
        style.horizontal,
    ) {
        cursor.draw(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::cursor::PageStamp;
    use crate::layout::TextRun;
    use crate::metrics::{Face, FontSpec, MonospaceMetrics};
    use crate::style::{HorizontalAlign, VerticalAlign};

    // lines are 100 high single spaced, 150 at the default spacing
    fn setup() -> (MonospaceMetrics, LayoutSettings, FlowCursor) {
        let metrics = MonospaceMetrics::new(Px(10.0), Px(100.0));
        let settings = LayoutSettings {
            base_size: Px(58.0),
            small_size: Px(50.0),
            line_spacing: 1.5,
            debug_overlay: false,
        };
        let stamp = PageStamp {
            font: FontSpec::new(Face::Regular, Px(50.0)),
            right_inset: Px(20.0),
            baseline_drop: Px(40.0),
        };
        let mut cursor = FlowCursor::new(Px(1000.0), Px(1000.0), stamp);
        cursor.begin();
        (metrics, settings, cursor)
    }

    fn texts(cursor: FlowCursor, metrics: &MonospaceMetrics) -> Vec<Vec<TextRun>> {
        let mut cursor = cursor;
        cursor
            .close(metrics)
            .into_iter()
            .map(|p| p.texts().cloned().collect())
            .collect()
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageOutputFormat::Png)
            .expect("can encode png");
        bytes.into_inner()
    }

    #[test]
    fn row_is_as_tall_as_its_tallest_cell() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        let row = TableRowSpec::new(
            [Px(0.0), Px(80.0), Px(1000.0)],
            ["aaaa bbbb cccc", "short"],
            vec![Style::default(); 2],
        );
        let outcome = layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        assert_eq!(
            outcome,
            RowOutcome::Placed {
                page: 1,
                top: Px(0.0),
                height: Px(450.0)
            }
        );
        assert_eq!(cursor.offset(), Px(450.0));
    }

    #[test]
    fn explicit_maximum_caps_the_row_and_clips_text() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        let row = TableRowSpec::new(
            [Px(0.0), Px(100.0)],
            ["aaaa bbbb cccc"],
            vec![Style::default()],
        )
        .with_max_height(Px(200.0));
        let outcome = layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        assert!(matches!(outcome, RowOutcome::Placed { height, .. } if height == Px(200.0)));

        let pages = texts(cursor, &metrics);
        let drawn: Vec<&str> = pages[0].iter().map(|r| r.text.as_str()).collect();
        assert_eq!(drawn, vec!["aaaa bbbb"]);
    }

    #[test]
    fn malformed_row_leaves_the_cursor_alone() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        let row = TableRowSpec::new(
            [Px(0.0), Px(100.0), Px(200.0)],
            ["only one"],
            vec![Style::default()],
        );
        let outcome = layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        assert_eq!(outcome, RowOutcome::Skipped);
        assert_eq!(cursor.offset(), Px(0.0));
        assert_eq!(cursor.page(), 1);
    }

    #[test]
    fn overflowing_row_moves_to_the_next_page() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        cursor.skip(Px(900.0));
        let row = TableRowSpec::new([Px(0.0), Px(500.0)], ["text"], vec![Style::default()]);
        let outcome = layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        assert_eq!(
            outcome,
            RowOutcome::Placed {
                page: 2,
                top: Px(0.0),
                height: Px(150.0)
            }
        );
    }

    #[test]
    fn row_taller_than_a_page_is_dropped() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        let text = "a\n".repeat(7) + "a";
        let row = TableRowSpec::new([Px(0.0), Px(500.0)], [text], vec![Style::default()]);
        let outcome = layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        assert_eq!(outcome, RowOutcome::Dropped { height: Px(1200.0) });
        assert_eq!(cursor.page(), 2);
        assert_eq!(cursor.offset(), Px(0.0));
    }

    #[test]
    fn cells_honour_their_alignment() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        let row = TableRowSpec::new(
            [Px(0.0), Px(200.0), Px(1000.0)],
            ["a b c d e f g h i j k l m n o p", "end"],
            vec![
                Style::new(VerticalAlign::Top, HorizontalAlign::Left),
                Style::new(VerticalAlign::Bottom, HorizontalAlign::Right),
            ],
        );
        layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        let pages = texts(cursor, &metrics);
        let end = pages[0]
            .iter()
            .find(|r| r.text == "end")
            .expect("right cell is drawn");
        assert_eq!(end.x, Px(970.0));
        // row is two lines (300) high; one line sits in the bottom half
        assert_eq!(end.baseline, Px(150.0 + 80.0));
    }

    #[test]
    fn fast_draw_uses_single_spacing() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        let row = TableRowSpec::new(
            [Px(0.0), Px(40.0), Px(80.0)],
            ["aaaa bbbb", "cccc dddd"],
            vec![
                Style::new(VerticalAlign::Top, HorizontalAlign::Left).with(StyleTrait::FastDraw),
                Style::new(VerticalAlign::Top, HorizontalAlign::Left),
            ],
        );
        layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        let pages = texts(cursor, &metrics);
        let baselines = |needle: &str| {
            pages[0]
                .iter()
                .find(|r| r.text == needle)
                .map(|r| r.baseline)
        };
        assert_eq!(baselines("bbbb"), Some(Px(180.0)));
        assert_eq!(baselines("dddd"), Some(Px(230.0)));
    }

    #[test]
    fn images_scale_down_to_the_column() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        let row = TableRowSpec::new(
            [Px(0.0), Px(100.0), Px(300.0)],
            [ContentBlock::Image(png(200, 50)), ContentBlock::Image(png(20, 20))],
            vec![Style::default(); 2],
        );
        let outcome = layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        assert_eq!(
            outcome,
            RowOutcome::Placed {
                page: 1,
                top: Px(0.0),
                height: Px(25.0)
            }
        );
        assert_eq!(images.len(), 2);

        let pages = cursor.close(&metrics);
        let rects: Vec<Rect<Px>> = pages[0]
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects[0], Rect::from_ltwh(Px(0.0), Px(0.0), Px(100.0), Px(25.0)));
        // the small image fits the 25 high row
        assert_eq!(rects[1], Rect::from_ltwh(Px(100.0), Px(0.0), Px(20.0), Px(20.0)));
    }

    #[test]
    fn undecodable_images_are_skipped() {
        let (metrics, settings, mut cursor) = setup();
        let mut images = Arena::new();
        let row = TableRowSpec::new(
            [Px(0.0), Px(100.0), Px(200.0)],
            [ContentBlock::Image(b"not an image".to_vec()), ContentBlock::text("x")],
            vec![Style::default(); 2],
        )
        .with_grid(true);
        let outcome = layout_table_row(&metrics, &settings, &mut cursor, &mut images, &row);
        assert!(matches!(outcome, RowOutcome::Placed { height, .. } if height == Px(150.0)));
        assert_eq!(images.len(), 0);

        let pages = cursor.close(&metrics);
        let outlines = pages[0]
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Outline { .. }))
            .count();
        assert_eq!(outlines, 2);
    }
}
