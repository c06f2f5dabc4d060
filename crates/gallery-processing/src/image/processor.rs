//! Image processor - the CPU-bound half of ingestion

use super::decoder::ImageDecoder;
use super::encoder::encode_png;
use super::thumbnail::ThumbnailDeriver;
use crate::policy::SizePolicy;
use gallery_core::AppError;
use image::GenericImageView;

/// Both artifacts for one upload, already in canonical encoding.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub full_png: Vec<u8>,
    pub thumbnail_png: Vec<u8>,
}

/// Decode, bounds-check, thumbnail and re-encode an upload.
#[derive(Debug, Clone, Copy)]
pub struct ImageProcessor {
    policy: SizePolicy,
    thumbnails: ThumbnailDeriver,
}

impl ImageProcessor {
    pub fn new(policy: SizePolicy, thumbnails: ThumbnailDeriver) -> Self {
        Self { policy, thumbnails }
    }

    /// Synchronous processing. Nothing is written anywhere; a rejected image
    /// simply returns an error.
    pub fn prepare(&self, data: &[u8]) -> Result<PreparedImage, AppError> {
        let decoded = ImageDecoder::decode(data)?;
        let (width, height) = decoded.dimensions();

        self.policy.check(width, height)?;

        let thumbnail = self.thumbnails.derive(&decoded.image);
        let (thumb_width, thumb_height) = thumbnail.dimensions();

        tracing::debug!(
            format = ?decoded.format,
            width,
            height,
            thumb_width,
            thumb_height,
            "Image decoded and thumbnail derived"
        );

        Ok(PreparedImage {
            width,
            height,
            full_png: encode_png(&decoded.image)?,
            thumbnail_png: encode_png(&thumbnail)?,
        })
    }

    /// Run [`prepare`](Self::prepare) on the blocking thread pool.
    pub async fn prepare_blocking(&self, data: Vec<u8>) -> Result<PreparedImage, AppError> {
        let processor = *self;
        tokio::task::spawn_blocking(move || processor.prepare(&data))
            .await
            .map_err(|e| AppError::Internal(format!("Image processing task failed: {}", e)))?
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::new(SizePolicy::default(), ThumbnailDeriver::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::test_support::encoded_image;
    use image::ImageFormat;

    #[test]
    fn test_prepare_600_square_png() {
        let prepared = ImageProcessor::default()
            .prepare(&encoded_image(600, 600, ImageFormat::Png))
            .unwrap();
        assert_eq!((prepared.width, prepared.height), (600, 600));

        let thumb = image::load_from_memory_with_format(&prepared.thumbnail_png, ImageFormat::Png)
            .unwrap();
        assert_eq!(thumb.dimensions(), (150, 150));
        let full =
            image::load_from_memory_with_format(&prepared.full_png, ImageFormat::Png).unwrap();
        assert_eq!(full.dimensions(), (600, 600));
    }

    #[test]
    fn test_prepare_jpeg_reencoded_as_png() {
        let prepared = ImageProcessor::default()
            .prepare(&encoded_image(640, 480, ImageFormat::Jpeg))
            .unwrap();
        assert_eq!(&prepared.full_png[..4], b"\x89PNG");
        assert_eq!(&prepared.thumbnail_png[..4], b"\x89PNG");
    }

    #[test]
    fn test_prepare_rejects_small() {
        let result = ImageProcessor::default().prepare(&encoded_image(300, 600, ImageFormat::Png));
        assert!(matches!(result, Err(AppError::ImageTooSmall { width: 300, .. })));
    }

    #[test]
    fn test_prepare_rejects_unreadable() {
        let result = ImageProcessor::default().prepare(b"GIF89a but not really");
        assert!(matches!(result, Err(AppError::Artifact { .. })));
    }

    #[tokio::test]
    async fn test_prepare_blocking() {
        let processor = ImageProcessor::new(SizePolicy::new(10, 10), ThumbnailDeriver::new(4, 4));
        let prepared = processor
            .prepare_blocking(encoded_image(20, 10, ImageFormat::Gif))
            .await
            .unwrap();
        assert_eq!((prepared.width, prepared.height), (20, 10));
    }
}
