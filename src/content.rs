//! Content stream generation for pages.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, SpanFont, SpanLayout};
use id_arena::Arena;
use pdf_writer::{Content, Name, Str};

/// Renders page contents to a PDF content stream
pub(crate) fn render_contents(contents: &[PageContents], fonts: &Arena<Font>) -> Vec<u8> {
    let mut content = Content::new();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts),
            PageContents::Image(image) => {
                let p = &image.position;
                content.save_state();
                content.transform([p.width().0, 0.0, 0.0, p.height().0, p.x1.0, p.y1.0]);
                content.x_object(Name(format!("I{}", image.image_id.index()).as_bytes()));
                content.restore_state();
            }
            PageContents::Stroke(stroke) => {
                let r = &stroke.rect;
                content.save_state();
                set_stroke_colour(&mut content, stroke.colour);
                content.set_line_width(stroke.width.0);
                content.rect(r.x1.0, r.y1.0, r.width().0, r.height().0);
                content.stroke();
                content.restore_state();
            }
        }
    }

    content.finish()
}

fn render_text_spans(content: &mut Content, spans: &[SpanLayout], fonts: &Arena<Font>) {
    let Some(first) = spans.first() else {
        return;
    };

    content.save_state();
    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    set_fill_colour(content, current_colour);

    content.begin_text();
    content.set_font(
        Name(format!("F{}", current_font.id.index()).as_bytes()),
        current_font.size.0,
    );
    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            content.set_font(
                Name(format!("F{}", current_font.id.index()).as_bytes()),
                current_font.size.0,
            );
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            set_fill_colour(content, current_colour);
        }

        let Some(font) = fonts.get(span.font.id) else {
            continue;
        };
        // absolute positioning for every span
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, span.coords.0 .0, span.coords.1 .0]);
        content.show(Str(&font.encode(&span.text)));
    }
    content.end_text();
    content.restore_state();
}

fn set_fill_colour(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_fill_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_fill_gray(g),
    };
}

fn set_stroke_colour(content: &mut Content, colour: Colour) {
    match colour {
        Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
        Colour::CMYK { c, m, y, k } => content.set_stroke_cmyk(c, m, y, k),
        Colour::Grey { g } => content.set_stroke_gray(g),
    };
}
