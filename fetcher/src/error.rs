//! Error types for artefact resolution and download.
//!
//! This module defines semantic error variants for each stage of a fetch.
//! Every variant that wraps a lower-level failure keeps it as its
//! [`std::error::Error::source`] so callers can report the full chain.

use crate::coordinate::CoordinateError;
use crate::metadata::MetadataParseError;
use crate::transport::TransportError;
use camino::Utf8PathBuf;
use std::fmt;
use thiserror::Error;

/// The stage of a fetch at which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// Reading or validating configuration.
    Configuration,
    /// Parsing or validating the coordinate.
    Coordinate,
    /// Fetching or parsing repository metadata.
    Metadata,
    /// Choosing a concrete version or snapshot artefact.
    Resolution,
    /// Streaming the artefact to disk.
    Transfer,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Coordinate => "coordinate parsing",
            Self::Metadata => "metadata lookup",
            Self::Resolution => "version resolution",
            Self::Transfer => "transfer",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while resolving or downloading an artefact.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The coordinate string or its parts are malformed.
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),

    /// Repository metadata could not be fetched.
    #[error("metadata unavailable at {url}")]
    MetadataUnavailable {
        /// The metadata URL that was requested.
        url: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// Repository metadata could not be parsed.
    #[error("malformed metadata at {url}")]
    MalformedMetadata {
        /// The metadata URL whose body failed to parse.
        url: String,
        /// The underlying parse failure.
        #[source]
        source: MetadataParseError,
    },

    /// The release metadata lists no versions.
    #[error("no versions of {coordinate} are available")]
    NoVersionsAvailable {
        /// The unversioned coordinate that was looked up.
        coordinate: String,
    },

    /// No snapshot entry matches the requested extension and classifier.
    #[error(
        "no snapshot artefact matches {coordinate} (extension {extension}{})",
        classifier_suffix(.classifier)
    )]
    NoMatchingSnapshotArtifact {
        /// The snapshot coordinate that was looked up.
        coordinate: String,
        /// Requested packaging extension.
        extension: String,
        /// Requested classifier, if any.
        classifier: Option<String>,
    },

    /// Streaming the artefact body failed.
    #[error("transfer failed for {url}")]
    TransferFailure {
        /// The artefact URL.
        url: String,
        /// The underlying transport or write failure.
        #[source]
        source: TransportError,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration at {path}: {reason}")]
    Config {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A local file operation failed.
    #[error("I/O error at {path}")]
    Io {
        /// The path being accessed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// The stage at which this error arose.
    #[must_use]
    pub fn stage(&self) -> FailureStage {
        match self {
            Self::InvalidCoordinate(_) => FailureStage::Coordinate,
            Self::MetadataUnavailable { .. } | Self::MalformedMetadata { .. } => {
                FailureStage::Metadata
            }
            Self::NoVersionsAvailable { .. } | Self::NoMatchingSnapshotArtifact { .. } => {
                FailureStage::Resolution
            }
            Self::TransferFailure { .. } | Self::Io { .. } => FailureStage::Transfer,
            Self::Config { .. } => FailureStage::Configuration,
        }
    }

    /// Render this error and its source chain on one line.
    ///
    /// # Examples
    ///
    /// ```
    /// use maven_fetch::error::FetchError;
    ///
    /// let err = FetchError::NoVersionsAvailable { coordinate: "g:a:".to_owned() };
    /// assert_eq!(err.chain(), "no versions of g:a: are available");
    /// ```
    #[must_use]
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        message
    }
}

fn classifier_suffix(classifier: &Option<String>) -> String {
    classifier
        .as_deref()
        .map(|c| format!(", classifier {c}"))
        .unwrap_or_default()
}

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;
