//! Bounds enforced on decoded uploads.

use gallery_core::{AppError, Config};

/// Minimum (and optional maximum) pixel bounds for accepted images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePolicy {
    pub min_width: u32,
    pub min_height: u32,
    /// `None` means unbounded.
    pub max_width: Option<u32>,
    /// `None` means unbounded.
    pub max_height: Option<u32>,
}

impl SizePolicy {
    pub fn new(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            min_height,
            max_width: None,
            max_height: None,
        }
    }

    pub fn with_max(mut self, max_width: Option<u32>, max_height: Option<u32>) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.min_width, config.min_height)
            .with_max(config.max_width, config.max_height)
    }

    /// Check decoded dimensions against the policy.
    pub fn check(&self, width: u32, height: u32) -> Result<(), AppError> {
        if width < self.min_width || height < self.min_height {
            return Err(AppError::ImageTooSmall {
                width,
                height,
                min_width: self.min_width,
                min_height: self.min_height,
            });
        }

        let too_wide = self.max_width.is_some_and(|max| width > max);
        let too_tall = self.max_height.is_some_and(|max| height > max);
        if too_wide || too_tall {
            // An unbounded axis is reported at the image's own size.
            return Err(AppError::ImageTooLarge {
                width,
                height,
                max_width: self.max_width.unwrap_or(width),
                max_height: self.max_height.unwrap_or(height),
            });
        }

        Ok(())
    }
}

impl Default for SizePolicy {
    fn default() -> Self {
        let min = gallery_core::constants::DEFAULT_MIN_DIMENSION;
        Self::new(min, min)
    }
}
