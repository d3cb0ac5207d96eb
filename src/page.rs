use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::geometry::PageGeometry;
use crate::image::Image;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::ComposeError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text starting at `coords`, the left end of its baseline
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// A stroked rectangle outline
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeLayout {
    pub rect: Rect,
    pub colour: Colour,
    pub width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Stroke(StrokeLayout),
}

/// One PDF page. Coordinates are in points from the bottom-left corner.
#[derive(Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create an empty page with the size and margins of `geometry`
    pub fn new(geometry: &PageGeometry) -> Page {
        let (width, height) = geometry.size();
        let (width, height): (Pt, Pt) = (width.into(), height.into());
        let margins = geometry.margins();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left.into(),
                y1: margins.bottom.into(),
                x2: width - margins.right.into(),
                y2: height - margins.top.into(),
            },
            contents: Vec::new(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        match self.contents.last_mut() {
            Some(PageContents::Text(spans)) => spans.push(span),
            _ => self.contents.push(PageContents::Text(vec![span])),
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_stroke(&mut self, stroke: StrokeLayout) {
        self.contents.push(PageContents::Stroke(stroke));
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), ComposeError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(ComposeError::PageMissing)?;
        let parent = refs
            .get(RefType::PageTree)
            .ok_or(ComposeError::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(r) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), r);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(r) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(Name(format!("I{}", image_id.index()).as_bytes()), r);
            }
        }
        resource_xobjects.finish();
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents, fonts);
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Margins;
    use crate::units::{Mm, Px};

    #[test]
    fn boxes_follow_the_geometry() {
        let geometry = PageGeometry::new(
            (Mm(25.4), Mm(50.8)),
            Margins::trbl(Mm(2.54), Mm(0.0), Mm(0.0), Mm(5.08)),
        )
        .expect("valid geometry");
        let page = Page::new(&geometry);
        assert!((page.media_box.x2.0 - 72.0).abs() < 1e-3);
        assert!((page.media_box.y2.0 - 144.0).abs() < 1e-3);
        assert!((page.content_box.x1.0 - 14.4).abs() < 1e-3);
        assert!((page.content_box.y2.0 - 136.8).abs() < 1e-3);
    }

    #[test]
    fn consecutive_spans_share_a_text_block() {
        let geometry = PageGeometry::from_pixels(Px(300.0), Px(300.0)).expect("valid");
        let mut fonts: Arena<Font> = Arena::new();
        let font = fonts.alloc(
            Font::load(include_bytes!("../assets/DejaVuSerif.ttf").to_vec()).expect("font"),
        );
        let mut page = Page::new(&geometry);
        let span = SpanLayout {
            text: "a".into(),
            font: SpanFont {
                id: font,
                size: Pt(12.0),
            },
            colour: crate::colours::BLACK,
            coords: (Pt(0.0), Pt(0.0)),
        };
        page.add_span(span.clone());
        page.add_span(span);
        assert_eq!(page.contents.len(), 1);
    }
}
