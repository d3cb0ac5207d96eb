use crate::refs::{ObjectReferences, RefType};
use crate::ComposeError;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

#[derive(Debug)]
pub enum ImageData {
    /// An RGB JPEG, embedded as is
    DirectlyEmbeddableJpeg(Vec<u8>),
    /// Anything else, re-encoded on write
    Raster(DynamicImage),
}

/// A decoded raster image. `width` and `height` are in pixels.
#[derive(Debug)]
pub struct Image {
    pub data: ImageData,
    pub width: f32,
    pub height: f32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode an encoded image (PNG or JPEG)
    pub fn from_bytes(data: &[u8]) -> Result<Image, ComposeError> {
        let format = image::guess_format(data)?;
        let image = image::load_from_memory_with_format(data, format)?;
        let (width, height) = (image.width() as f32, image.height() as f32);

        let data = match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => ImageData::DirectlyEmbeddableJpeg(data.to_vec()),
            _ => ImageData::Raster(image),
        };
        Ok(Image {
            data,
            width,
            height,
        })
    }

    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, ComposeError> {
        let data = std::fs::read(path)?;
        Image::from_bytes(&data)
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        let (width, height) = (image.width() as f32, image.height() as f32);
        Image {
            data: ImageData::Raster(image),
            width,
            height,
        }
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            ImageData::DirectlyEmbeddableJpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            ImageData::Raster(image) => {
                let level = CompressionLevel::DefaultLevel as u8;
                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|(_, _, p)| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(index));
        let encoded = self.encode();
        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(index)));

        let mut image = writer.image_xobject(id, &encoded.bytes);
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, &encoded.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask);
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(image: DynamicImage, format: image::ImageOutputFormat) -> Vec<u8> {
        let mut bytes = std::io::Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).expect("can encode");
        bytes.into_inner()
    }

    #[test]
    fn decodes_png_with_alpha_into_a_masked_raster() {
        let png = encode(
            DynamicImage::new_rgba8(4, 3),
            image::ImageOutputFormat::Png,
        );
        let image = Image::from_bytes(&png).expect("valid png");
        assert_eq!((image.width, image.height), (4.0, 3.0));
        assert!(matches!(image.data, ImageData::Raster(_)));
        assert!(image.encode().mask.is_some());
    }

    #[test]
    fn rgb_jpeg_is_kept_verbatim() {
        let jpeg = encode(
            DynamicImage::new_rgb8(8, 8),
            image::ImageOutputFormat::Jpeg(80),
        );
        let image = Image::from_bytes(&jpeg).expect("valid jpeg");
        match image.data {
            ImageData::DirectlyEmbeddableJpeg(ref bytes) => assert_eq!(bytes, &jpeg),
            _ => panic!("jpeg was re-encoded"),
        }
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(
            Image::from_bytes(b"definitely not an image"),
            Err(ComposeError::Image(_))
        ));
    }
}
