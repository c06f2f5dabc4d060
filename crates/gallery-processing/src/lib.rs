//! Gallery Processing Library
//!
//! Everything the ingestion pipeline does with pixels: decoding uploaded
//! bytes, enforcing the configured bounds, deriving the thumbnail and
//! re-encoding both artifacts in the canonical format (PNG).

pub mod image;
pub mod policy;

pub use crate::image::{
    encode_png, DecodedImage, ImageDecoder, ImageProcessor, PreparedImage, ThumbnailDeriver,
};
pub use policy::SizePolicy;
