//! Constants shared across crates.

/// Extension of every stored artifact. Both the full-resolution image and the
/// thumbnail are re-encoded to PNG regardless of the uploaded format.
pub const ARTIFACT_EXTENSION: &str = "png";

/// Prefix prepended to a record filename to name its thumbnail artifact.
pub const THUMBNAIL_PREFIX: &str = "thumb_";

/// Default minimum accepted width and height, in pixels.
pub const DEFAULT_MIN_DIMENSION: u32 = 480;

/// Default thumbnail bounding box.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 200;
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 150;

/// Multipart field names accepted by the ingestion endpoint.
pub mod form_fields {
    pub const FIRST_NAME: &str = "fname";
    pub const LAST_NAME: &str = "lname";
    pub const EMAIL: &str = "email";
    pub const ADDRESS: &str = "address";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const ZIP: &str = "zip";
    pub const FILE: &str = "file";
}
