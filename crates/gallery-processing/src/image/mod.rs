//! Image processing module
//!
//! - Decoding and format detection (decoder)
//! - Bounded preview derivation (thumbnail)
//! - Canonical re-encoding (encoder)
//! - The combined blocking step used by ingestion (processor)

pub mod decoder;
pub mod encoder;
pub mod processor;
pub mod thumbnail;

pub use decoder::{DecodedImage, ImageDecoder};
pub use encoder::encode_png;
pub use processor::{ImageProcessor, PreparedImage};
pub use thumbnail::ThumbnailDeriver;
