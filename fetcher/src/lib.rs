//! Maven artefact resolver and downloader.
//!
//! This crate turns a Maven coordinate into a concrete artefact URL using
//! the repository's `maven-metadata.xml`, skips the download when a local
//! copy already matches the repository digest, and otherwise streams the
//! artefact to disk. It backs the `maven-fetch` CLI binary and can be used
//! programmatically with injected transports.
//!
//! # Modules
//!
//! - [`checksum`] - Digest algorithms and the up-to-date check
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Layered TOML configuration
//! - [`coordinate`] - Coordinate parsing and repository layout
//! - [`downloader`] - Resolve, check and transfer orchestration
//! - [`error`] - Semantic error types and failure stages
//! - [`metadata`] - `maven-metadata.xml` model and lookups
//! - [`output`] - User-facing status messages
//! - [`progress`] - Transfer progress observers
//! - [`repository_url`] - Validated repository base URL
//! - [`resolver`] - Version and snapshot resolution
//! - [`transport`] - Blocking HTTP transport

pub mod checksum;
pub mod cli;
pub mod config;
pub mod coordinate;
pub mod downloader;
pub mod error;
pub mod metadata;
pub mod output;
pub mod progress;
pub mod repository_url;
pub mod resolver;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
