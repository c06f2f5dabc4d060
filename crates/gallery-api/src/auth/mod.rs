//! Publisher authentication (HTTP basic).

pub mod basic;

pub use basic::{publisher_auth, PublisherCredentials};
