use super::command::DrawCommand;
use super::cursor::FlowCursor;
use super::split::split_by_height;
use super::{place_lines, LayoutSettings};
use crate::block::Fragment;
use crate::colour::colours;
use crate::metrics::MetricsProvider;
use crate::rect::Rect;
use crate::units::Px;

/// Flow styled fragments down the band between `left` and `right`.
///
/// Each fragment starts where the previous one ended. Whatever does not fit
/// on the current page continues at the top of the next one, so a fragment
/// can span any number of pages; only a single line taller than an empty
/// page is dropped, together with the rest of its fragment.
///
/// With `borders` (or the debug overlay) every chunk drawn on a page is
/// outlined.
pub fn layout_paragraph(
    metrics: &dyn MetricsProvider,
    settings: &LayoutSettings,
    cursor: &mut FlowCursor,
    left: Px,
    right: Px,
    fragments: &[Fragment],
    borders: bool,
) {
    if left >= right || fragments.is_empty() {
        log::warn!(
            "ignoring paragraph of {} fragments between {} and {}",
            fragments.len(),
            left,
            right
        );
        return;
    }
    let width = right - left;

    for fragment in fragments.iter().filter(|f| !f.text.is_empty()) {
        let font = settings.font_for(&fragment.style);
        let line_height = metrics.line_height(&font, settings.line_spacing);
        let mut rest = fragment.text.as_str();

        loop {
            let split = split_by_height(
                metrics,
                &font,
                rest,
                width,
                cursor.remaining(),
                settings.line_spacing,
            );

            if split.lines.is_empty() {
                if cursor.at_page_top() {
                    log::warn!(
                        "dropping text that can't fit on an empty page: lines are {} high, the page {}",
                        line_height,
                        cursor.page_height()
                    );
                    break;
                }
                cursor.new_page(metrics);
                continue;
            }

            let top = cursor.offset();
            for command in place_lines(
                metrics,
                &font,
                &split.lines,
                left,
                top,
                width,
                line_height,
                split.height,
                fragment.style.horizontal,
            ) {
                cursor.draw(command);
            }
            if borders || settings.debug_overlay {
                cursor.draw(DrawCommand::Outline {
                    rect: Rect::from_ltwh(left, top, width, split.height),
                    colour: colours::BLUE,
                });
            }
            cursor.skip(split.height);

            if split.is_complete() {
                break;
            }
            cursor.new_page(metrics);
            rest = split.second;
        }
    }
}
