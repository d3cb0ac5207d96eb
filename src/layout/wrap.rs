use crate::metrics::{FontSpec, MetricsProvider};
use crate::units::Px;
use std::ops::Range;

/// One display line produced by word wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// The words of the line joined by single spaces
    pub text: String,
    /// Byte range of the line in the wrapped source text. The first line of a
    /// paragraph starts at the paragraph start and the last one ends at the
    /// paragraph end, so leading and trailing spaces belong to those lines.
    pub span: Range<usize>,
    /// Whether this line closes its paragraph
    pub ends_paragraph: bool,
}

/// Space-separated words of a paragraph with their byte offsets. Runs of
/// spaces collapse; any other character, including no-break space, is part of
/// a word.
fn words(paragraph: &str) -> impl Iterator<Item = (usize, &str)> {
    paragraph
        .split(' ')
        .scan(0usize, |offset, word| {
            let start = *offset;
            *offset += word.len() + 1;
            Some((start, word))
        })
        .filter(|(_, word)| !word.is_empty())
}

/// Greedily fill lines of at most `max_width` with the words of `paragraph`,
/// which must not contain newlines.
///
/// A blank paragraph still produces one empty line, and a word wider than
/// `max_width` is placed alone on its own (overflowing) line.
pub fn wrap_paragraph(
    metrics: &dyn MetricsProvider,
    font: &FontSpec,
    paragraph: &str,
    max_width: Px,
) -> Vec<LayoutLine> {
    wrap_paragraph_at(metrics, font, paragraph, max_width, 0)
}

/// [wrap_paragraph], with spans shifted by `base` bytes
pub(crate) fn wrap_paragraph_at(
    metrics: &dyn MetricsProvider,
    font: &FontSpec,
    paragraph: &str,
    max_width: Px,
    base: usize,
) -> Vec<LayoutLine> {
    let end = base + paragraph.len();
    let mut words = words(paragraph);

    let Some((first_start, first)) = words.next() else {
        return vec![LayoutLine {
            text: String::new(),
            span: base..end,
            ends_paragraph: true,
        }];
    };

    let mut lines: Vec<LayoutLine> = Vec::new();
    let mut current = first.to_string();
    let mut line_start = base;
    let mut line_end = base + first_start + first.len();

    for (start, word) in words {
        let candidate = format!("{current} {word}");
        if metrics.advance_width(font, &candidate) <= max_width {
            current = candidate;
            line_end = base + start + word.len();
        } else {
            lines.push(LayoutLine {
                text: std::mem::replace(&mut current, word.to_string()),
                span: line_start..line_end,
                ends_paragraph: false,
            });
            line_start = base + start;
            line_end = line_start + word.len();
        }
    }

    lines.push(LayoutLine {
        text: current,
        span: line_start..end,
        ends_paragraph: true,
    });
    lines
}

/// Wrap every `\n`-separated paragraph of `text`; spans index into `text`
pub fn wrap_text(
    metrics: &dyn MetricsProvider,
    font: &FontSpec,
    text: &str,
    max_width: Px,
) -> Vec<LayoutLine> {
    let mut lines = Vec::new();
    let mut base = 0;
    for paragraph in text.split('\n') {
        lines.extend(wrap_paragraph_at(metrics, font, paragraph, max_width, base));
        base += paragraph.len() + 1;
    }
    lines
}

/// Height of `text` once wrapped to `max_width` at `spacing`
pub fn wrapped_height(
    metrics: &dyn MetricsProvider,
    font: &FontSpec,
    text: &str,
    max_width: Px,
    spacing: f32,
) -> Px {
    let count = wrap_text(metrics, font, text, max_width).len();
    metrics.line_height(font, spacing) * count as f32
}
