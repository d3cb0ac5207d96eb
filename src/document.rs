use crate::{
    colour::colours,
    composer::Composition,
    font::{Font, FontFamily},
    image::Image,
    info::Info,
    layout::DrawCommand,
    metrics::Face,
    page::{ImageLayout, Page, SpanFont, SpanLayout, StrokeLayout},
    rect::Rect,
    refs::{ObjectReferences, RefType},
    units::{Pt, Px},
    ComposeError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::{collections::HashMap, io::Write, path::Path};

/// Width of grid and overlay lines
const STROKE_WIDTH: Pt = Pt(0.5);

#[derive(Default, Debug)]
/// A document stores all the contents of the PDF, then renders them out with
/// a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
}

/// Maps the layout's device pixels (origin top-left of the paint area, y
/// down) to page points (origin bottom-left of the page, y up)
struct PagePlacement {
    dpi: f32,
    left: Pt,
    top: Pt,
}

impl PagePlacement {
    fn x(&self, x: Px) -> Pt {
        self.left + x.to_pt(self.dpi)
    }

    fn y(&self, y: Px) -> Pt {
        self.top - y.to_pt(self.dpi)
    }

    fn rect(&self, r: &Rect<Px>) -> Rect {
        Rect {
            x1: self.x(r.x1),
            y1: self.y(r.y2),
            x2: self.x(r.x2),
            y2: self.y(r.y1),
        }
    }
}

impl Document {
    /// Sets information about the document. If not provided, no information
    /// block will be written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Turn a finished composition into PDF pages, setting text in `family`.
    /// Pass the same family that measured the composition, or text may not
    /// fit where the layout put it.
    pub fn from_composition(composition: Composition, family: FontFamily) -> Document {
        let Composition {
            geometry,
            pages,
            images,
        } = composition;

        let mut doc = Document {
            images,
            ..Default::default()
        };

        let resolved: HashMap<Face, Face> = Face::ALL
            .iter()
            .map(|&face| (face, family.resolve(face)))
            .collect();
        let loaded: HashMap<Face, Id<Font>> = family
            .into_fonts()
            .into_iter()
            .map(|(face, font)| (face, doc.add_font(font)))
            .collect();
        let font_ids: HashMap<Face, Id<Font>> = resolved
            .into_iter()
            .filter_map(|(face, used)| loaded.get(&used).map(|id| (face, *id)))
            .collect();

        let dpi = geometry.resolution();
        for laid_out in pages {
            let mut page = Page::new(&geometry);
            let placement = PagePlacement {
                dpi,
                left: page.content_box.x1,
                top: page.content_box.y2,
            };

            for command in laid_out.commands {
                match command {
                    DrawCommand::Text(run) => {
                        let Some(&id) = font_ids.get(&run.font.face) else {
                            continue;
                        };
                        page.add_span(SpanLayout {
                            text: run.text,
                            font: SpanFont {
                                id,
                                size: run.font.size.to_pt(dpi),
                            },
                            colour: colours::BLACK,
                            coords: (placement.x(run.x), placement.y(run.baseline)),
                        });
                    }
                    DrawCommand::Image { image, rect } => page.add_image(ImageLayout {
                        image_id: image,
                        position: placement.rect(&rect),
                    }),
                    DrawCommand::Outline { rect, colour } => page.add_stroke(StrokeLayout {
                        rect: placement.rect(&rect),
                        colour,
                        width: STROKE_WIDTH,
                    }),
                }
            }
            doc.add_page(page);
        }

        log::debug!(
            "document has {} pages, {} fonts and {} images",
            doc.page_order.len(),
            doc.fonts.len(),
            doc.images.len()
        );
        doc
    }

    /// Write the entire document to `w`. The document is rendered in memory
    /// first, then written out in one go.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), ComposeError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
        } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }
        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(ComposeError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &images, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        w.write_all(writer.finish().as_slice())?;
        w.flush()?;
        Ok(())
    }

    /// Write the document to a new file at `path`, replacing any existing one
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), ComposeError> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| ComposeError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("writing {}", path.display());
        self.write(std::io::BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_flips_to_the_bottom_left_origin() {
        let placement = PagePlacement {
            dpi: 300.0,
            left: Pt(10.0),
            top: Pt(800.0),
        };
        assert_eq!(placement.x(Px(300.0)), Pt(82.0));
        assert_eq!(placement.y(Px(150.0)), Pt(764.0));

        let r = placement.rect(&Rect::from_ltwh(Px(0.0), Px(0.0), Px(300.0), Px(600.0)));
        assert_eq!(r.x1, Pt(10.0));
        assert_eq!(r.y1, Pt(656.0));
        assert_eq!(r.y2, Pt(800.0));
    }

    #[test]
    fn empty_document_is_still_a_pdf() {
        let mut bytes = Vec::new();
        Document::default().write(&mut bytes).expect("can write");
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
