//! Metadata persistence for image records.
//!
//! `MetadataStore` is the seam the services depend on. Two implementations
//! exist: `PgImageRecordRepository` over a pooled PostgreSQL connection, and
//! `InMemoryMetadataStore` for single-process deployments and tests.
//!
//! Every store call is bounded by a timeout; expiry surfaces as
//! `AppError::Timeout` rather than a hung request.

pub mod memory;
pub mod postgres;
pub mod store;
pub mod timeout;

pub use memory::InMemoryMetadataStore;
pub use postgres::PgImageRecordRepository;
pub use store::MetadataStore;
pub use timeout::with_timeout;
