use super::wrap::{wrap_paragraph_at, LayoutLine};
use crate::metrics::{FontSpec, MetricsProvider};
use crate::units::Px;

/// The result of dividing text at a page boundary.
///
/// `first` and `second` are slices of the input: the input is `first`, then
/// the whitespace the cut fell on (spaces inside a paragraph or a single
/// `\n` between paragraphs), then `second`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitText<'a> {
    /// The part that fits in the available height
    pub first: &'a str,
    /// Everything that has to go on following pages
    pub second: &'a str,
    /// The wrapped lines of `first`, ready to draw
    pub lines: Vec<LayoutLine>,
    /// Height taken by `lines`
    pub height: Px,
}

impl SplitText<'_> {
    /// Whether all of the text fitted
    pub fn is_complete(&self) -> bool {
        self.second.is_empty()
    }
}

/// Wrap `text` to `width` and keep as many whole lines as fit in
/// `max_height`. A line that would overflow goes, with everything after it,
/// to [SplitText::second]; lines are never cut. When not even one line fits,
/// `first` is empty and `second` is the whole input.
pub fn split_by_height<'a>(
    metrics: &dyn MetricsProvider,
    font: &FontSpec,
    text: &'a str,
    width: Px,
    max_height: Px,
    spacing: f32,
) -> SplitText<'a> {
    let line_height = metrics.line_height(font, spacing);
    // heights are products, never running sums, so they agree exactly with
    // the clipping done when the lines are drawn
    let height_of = |count: usize| line_height * count as f32;
    let mut lines: Vec<LayoutLine> = Vec::new();

    let mut base = 0;
    for paragraph in text.split('\n') {
        for line in wrap_paragraph_at(metrics, font, paragraph, width, base) {
            if height_of(lines.len() + 1) > max_height {
                let first_end = lines.last().map(|l| l.span.end).unwrap_or(0);
                let height = height_of(lines.len());
                log::trace!(
                    "splitting at byte {} after {} lines ({} of {} high)",
                    line.span.start,
                    lines.len(),
                    height,
                    max_height
                );
                return SplitText {
                    first: &text[..first_end],
                    second: &text[line.span.start..],
                    lines,
                    height,
                };
            }
            lines.push(line);
        }
        base += paragraph.len() + 1;
    }

    let height = height_of(lines.len());
    SplitText {
        first: text,
        second: "",
        lines,
        height,
    }
}
