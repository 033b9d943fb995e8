//! Repository metadata model and lookups.
//!
//! # Sub-modules
//!
//! - [`document`] - Typed `maven-metadata.xml` model (`RepositoryMetadata`).
//! - [`client`] - Metadata lookup trait and HTTP implementation.

pub mod client;
pub mod document;

#[cfg(test)]
pub use client::MockMetadataClient;
pub use client::{HttpMetadataClient, METADATA_FILENAME, MetadataClient};
pub use document::{MetadataParseError, RepositoryMetadata, SnapshotVersion};
