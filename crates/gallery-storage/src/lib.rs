//! Gallery Storage Library
//!
//! Durable storage for image artifacts. Every accepted upload produces two
//! artifacts under the public root:
//!
//! - **Full image**: `{id}.png`
//! - **Thumbnail**: `thumb_{id}.png`
//!
//! Artifact names are flat: they must not contain a path separator, `..`, or
//! start with `.`. Name checks live in the `keys` module so every backend
//! enforces the same rules.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_artifact_store;
pub use local::LocalArtifactStore;
pub use traits::{ArtifactStore, StorageError, StorageResult};
