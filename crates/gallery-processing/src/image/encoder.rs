//! Canonical artifact encoding

use gallery_core::AppError;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Encode `image` as PNG, the canonical format for every stored artifact.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| AppError::Internal(format!("PNG encoding failed: {}", e)))?;
    Ok(buffer)
}
