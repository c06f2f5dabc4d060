//! Image decoder - format detection and pixel decoding

use gallery_core::AppError;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;

/// Encodings accepted from uploaders.
pub const SUPPORTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// A successfully decoded upload.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    /// Encoding detected from the payload's magic bytes.
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode `data`, detecting the encoding from its content rather than any
    /// client-supplied name or content type. Animated GIFs decode to their
    /// first frame.
    pub fn decode(data: &[u8]) -> Result<DecodedImage, AppError> {
        if data.is_empty() {
            return Err(AppError::unreadable_image("empty payload"));
        }

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| AppError::unreadable_image(format!("format detection failed: {}", e)))?;

        let format = reader
            .format()
            .ok_or_else(|| AppError::unreadable_image("unrecognised image format"))?;

        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(AppError::unreadable_image(format!(
                "unsupported image format {:?}",
                format
            )));
        }

        let image = reader
            .decode()
            .map_err(|e| AppError::unreadable_image(format!("decode failed: {}", e)))?;

        Ok(DecodedImage { image, format })
    }
}
