//! Bounded preview derivation

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

const FILTER: FilterType = FilterType::Lanczos3;

/// Produces a preview that fits inside a fixed bounding box.
///
/// Aspect ratio is preserved and images already inside the box are returned
/// unchanged (never upscaled). The output depends only on the input pixels,
/// and the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailDeriver {
    max_width: u32,
    max_height: u32,
}

impl ThumbnailDeriver {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width: max_width.max(1),
            max_height: max_height.max(1),
        }
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }

    pub fn derive(&self, image: &DynamicImage) -> DynamicImage {
        let (width, height) = image.dimensions();
        if width <= self.max_width && height <= self.max_height {
            return image.clone();
        }
        image.resize(self.max_width, self.max_height, FILTER)
    }
}

impl Default for ThumbnailDeriver {
    fn default() -> Self {
        Self::new(
            gallery_core::constants::DEFAULT_THUMBNAIL_WIDTH,
            gallery_core::constants::DEFAULT_THUMBNAIL_HEIGHT,
        )
    }
}
