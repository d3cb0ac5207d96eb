use crate::metrics::{Face, FontSpec, MetricsProvider};
use crate::refs::{ObjectReferences, RefType};
use crate::units::Px;
use crate::ComposeError;
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A parsed TrueType or OpenType font. Fonts are embedded whole, so large
/// fonts make for large documents.
pub struct Font {
    pub face: OwnedFace,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font").field("name", &self.name()).finish()
    }
}

impl Font {
    /// Parse a font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, ComposeError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn name_entry(&self, id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, or "Unnamed" if it has none
    pub fn name(&self) -> String {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
            .unwrap_or_else(|| "Unnamed".to_string())
    }

    pub fn family(&self) -> String {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
            .unwrap_or_else(|| self.name())
    }

    fn scaling(&self, size: Px) -> f32 {
        size.0 / self.face.as_face_ref().units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at `size`
    pub fn ascent(&self, size: Px) -> Px {
        Px(self.face.as_face_ref().ascender() as f32 * self.scaling(size))
    }

    /// Distance from the baseline to the bottom of the font; usually negative
    pub fn descent(&self, size: Px) -> Px {
        Px(self.face.as_face_ref().descender() as f32 * self.scaling(size))
    }

    /// Height of one line of text, ascent to descent, without leading
    pub fn height(&self, size: Px) -> Px {
        self.ascent(size) - self.descent(size)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph drawn for `ch`: its own, else U+FFFD, else '?', else .notdef
    fn glyph_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Advance width of `text` on a single line
    pub fn width_of_text(&self, text: &str, size: Px) -> Px {
        let face = self.face.as_face_ref();
        let units: u32 = text
            .chars()
            .map(|ch| {
                face.glyph_hor_advance(GlyphId(self.glyph_or_replacement(ch)))
                    .unwrap_or_default() as u32
            })
            .sum();
        Px(units as f32 * self.scaling(size))
    }

    /// Encode `text` as big-endian glyph ids for an Identity-H font
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| self.glyph_or_replacement(ch).to_be_bytes())
            .collect()
    }

    /// Glyph id to character, for every glyph reachable from a unicode cmap
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|g| g.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }
        map
    }

    /// Horizontal advance of each glyph, in 1/1000 em
    fn glyph_widths(&self, glyphs: &BTreeMap<u16, char>) -> BTreeMap<u16, f32> {
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;
        glyphs
            .keys()
            .filter_map(|&gid| {
                face.glyph_hor_advance(GlyphId(gid))
                    .map(|w| (gid, w as f32 * scaling))
            })
            .collect()
    }

    fn write_font_data(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::FontData(index));
        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), data.len() as i32);
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        widths: &BTreeMap<u16, f32>,
        writer: &mut Pdf,
    ) -> Ref {
        let font_file = self.write_font_data(refs, index, writer);
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let max_width = widths.values().copied().fold(0.0, f32::max);
        let avg_width = if widths.is_empty() {
            0.0
        } else {
            widths.values().sum::<f32>() / widths.len() as f32
        };

        let id = refs.gen(RefType::FontDescriptor(index));
        let name = self.name();
        let family = self.family();
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().map(|h| h as f32 * scaling);
        descriptor.cap_height(cap_height.unwrap_or(700.0));
        descriptor.x_height(
            face.x_height()
                .map(|h| h as f32 * scaling)
                .or(cap_height)
                .unwrap_or(500.0),
        );
        // not stored in TrueType fonts; a typical regular weight value
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);
        descriptor.font_file2(font_file);
        descriptor.finish();

        id
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let widths = self.glyph_widths(glyphs);
        let descriptor = self.write_descriptor(refs, index, &widths, writer);

        let id = refs.gen(RefType::CidFont(index));
        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor);
        cid_font.default_width(1000.0);

        // runs of consecutive glyph ids share one width array
        let mut w = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (&gid, &width) in &widths {
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => run.push(width),
                _ => {
                    if let Some(start) = run_start {
                        w.consecutive(start, run.drain(..));
                    }
                    run_start = Some(gid);
                    run.push(width);
                }
            }
        }
        if let Some(start) = run_start {
            w.consecutive(start, run.drain(..));
        }
        w.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
        for block in entries.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|u| format!("{u:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{units}>\n"));
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }

    /// Embed the font as a Type0 font with an Identity-H encoding
    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let index = id.index();
        let font_id = refs.gen(RefType::Font(index));
        let glyphs = self.glyph_chars();
        let cid_font = self.write_cid(refs, index, &glyphs, writer);
        let to_unicode = self.write_to_unicode(refs, index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font);
        font.to_unicode(to_unicode);
    }
}

/// The faces used to set text. Missing faces fall back to the closest
/// loaded one, ending at the regular face.
#[derive(Debug)]
pub struct FontFamily {
    pub regular: Font,
    pub italic: Option<Font>,
    pub bold: Option<Font>,
    pub bold_italic: Option<Font>,
}

impl FontFamily {
    pub fn new(regular: Font) -> FontFamily {
        FontFamily {
            regular,
            italic: None,
            bold: None,
            bold_italic: None,
        }
    }

    pub fn with_italic(mut self, font: Font) -> FontFamily {
        self.italic = Some(font);
        self
    }

    pub fn with_bold(mut self, font: Font) -> FontFamily {
        self.bold = Some(font);
        self
    }

    pub fn with_bold_italic(mut self, font: Font) -> FontFamily {
        self.bold_italic = Some(font);
        self
    }

    /// The face whose font actually sets text requested in `face`
    pub fn resolve(&self, face: Face) -> Face {
        match face {
            Face::BoldItalic if self.bold_italic.is_some() => Face::BoldItalic,
            Face::BoldItalic | Face::Bold if self.bold.is_some() => Face::Bold,
            Face::BoldItalic | Face::Italic if self.italic.is_some() => Face::Italic,
            _ => Face::Regular,
        }
    }

    pub fn face(&self, face: Face) -> &Font {
        let font = match self.resolve(face) {
            Face::Regular => None,
            Face::Italic => self.italic.as_ref(),
            Face::Bold => self.bold.as_ref(),
            Face::BoldItalic => self.bold_italic.as_ref(),
        };
        font.unwrap_or(&self.regular)
    }

    /// The loaded fonts, each tagged with the face it was loaded as
    pub fn into_fonts(self) -> Vec<(Face, Font)> {
        let mut fonts = vec![(Face::Regular, self.regular)];
        fonts.extend(self.italic.map(|f| (Face::Italic, f)));
        fonts.extend(self.bold.map(|f| (Face::Bold, f)));
        fonts.extend(self.bold_italic.map(|f| (Face::BoldItalic, f)));
        fonts
    }
}

impl MetricsProvider for FontFamily {
    fn advance_width(&self, font: &FontSpec, text: &str) -> Px {
        self.face(font.face).width_of_text(text, font.size)
    }

    fn ascent(&self, font: &FontSpec) -> Px {
        self.face(font.face).ascent(font.size)
    }

    fn base_line_height(&self, font: &FontSpec) -> Px {
        self.face(font.face).height(font.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dejavu() -> Font {
        Font::load(include_bytes!("../assets/DejaVuSerif.ttf").to_vec()).expect("can load font")
    }

    #[test]
    fn measures_text() {
        let font = dejavu();
        assert!(font.name().contains("DejaVu"));
        let one = font.width_of_text("a", Px(100.0));
        let three = font.width_of_text("aaa", Px(100.0));
        assert!(one > Px(0.0));
        assert!((three.0 - one.0 * 3.0).abs() < 1e-3);
        assert!(font.ascent(Px(100.0)) > Px(0.0));
        assert!(font.descent(Px(100.0)) < Px(0.0));
    }

    #[test]
    fn encodes_two_bytes_per_character() {
        let font = dejavu();
        let encoded = font.encode("Aж");
        assert_eq!(encoded.len(), 4);
        let gid = font.glyph_id('A').expect("has A");
        assert_eq!(&encoded[..2], &gid.to_be_bytes());
    }

    #[test]
    fn missing_faces_fall_back() {
        let family = FontFamily::new(dejavu()).with_bold(dejavu());
        assert_eq!(family.resolve(Face::Italic), Face::Regular);
        assert_eq!(family.resolve(Face::BoldItalic), Face::Bold);
        assert_eq!(family.resolve(Face::Bold), Face::Bold);
        assert_eq!(family.into_fonts().len(), 2);
    }

    #[test]
    fn family_measures_through_the_metrics_trait() {
        let family = FontFamily::new(dejavu());
        let spec = FontSpec::new(Face::Italic, Px(58.0));
        let metrics: &dyn MetricsProvider = &family;
        assert_eq!(
            metrics.line_height(&spec, 1.5),
            family.regular.height(Px(58.0)) * 1.5
        );
    }

    #[test]
    fn writes_an_embedded_type0_font() {
        let mut fonts: id_arena::Arena<Font> = id_arena::Arena::new();
        let id = fonts.alloc(dejavu());
        let mut refs = ObjectReferences::new();
        let mut pdf = Pdf::new();
        fonts[id].write(&mut refs, id, &mut pdf);

        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Subtype /Type0"));
        assert!(text.contains("/ItalicAngle 0"));
        assert!(refs.get(RefType::Font(id.index())).is_some());
        assert!(refs.get(RefType::ToUnicode(id.index())).is_some());
    }
}
