//! Artefact URL resolution.
//!
//! Turns a [`Coordinate`] into a concrete download URL:
//!
//! 1. An unversioned coordinate is bound to the last release listed in the
//!    artifact-level metadata.
//! 2. A snapshot coordinate is bound to the timestamped file version of the
//!    matching `<snapshotVersion>` entry in the version-level metadata.
//! 3. Anything else maps directly onto the standard repository layout.

use crate::checksum::ChecksumAlgorithm;
use crate::coordinate::Coordinate;
use crate::error::{FetchError, Result};
use crate::metadata::{MetadataClient, SnapshotVersion};
use crate::repository_url::RepositoryUrl;
use log::{debug, warn};
use serde::Deserialize;
use std::fmt;

/// How a single entry is chosen when several snapshot entries match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotTieBreak {
    /// Take the earliest matching entry in document order.
    #[default]
    FirstInDocumentOrder,
    /// For a coordinate without a classifier, take the earliest entry that
    /// has no classifier either, falling back to document order. Keeps an
    /// unclassified request off `sources` and `javadoc` entries.
    PreferUnclassified,
}

impl SnapshotTieBreak {
    fn choose<'e>(
        self,
        candidates: &[&'e SnapshotVersion],
        coordinate: &Coordinate,
    ) -> Option<&'e SnapshotVersion> {
        let first = candidates.first().copied();
        match self {
            Self::FirstInDocumentOrder => first,
            Self::PreferUnclassified if coordinate.classifier().is_none() => candidates
                .iter()
                .copied()
                .find(|entry| entry.classifier().is_none())
                .or(first),
            Self::PreferUnclassified => first,
        }
    }
}

impl fmt::Display for SnapshotTieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstInDocumentOrder => write!(f, "first in document order"),
            Self::PreferUnclassified => write!(f, "unclassified entry preferred"),
        }
    }
}

/// Non-fatal notice that more than one snapshot entry matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotAmbiguity {
    /// Number of entries that matched.
    pub candidates: usize,
    /// The file version that was chosen.
    pub chosen: String,
    /// The policy that made the choice.
    pub policy: SnapshotTieBreak,
}

impl fmt::Display for SnapshotAmbiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} snapshot entries matched; chose {} ({})",
            self.candidates, self.chosen, self.policy
        )
    }
}

/// A coordinate bound to a concrete version and download URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    coordinate: Coordinate,
    file_version: String,
    url: String,
    ambiguity: Option<SnapshotAmbiguity>,
}

impl ResolvedArtifact {
    /// The coordinate with its version made concrete.
    #[must_use]
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Version embedded in the remote filename; timestamped for snapshots.
    #[must_use]
    pub fn file_version(&self) -> &str {
        &self.file_version
    }

    /// The artefact download URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Present when several snapshot entries matched.
    #[must_use]
    pub fn ambiguity(&self) -> Option<&SnapshotAmbiguity> {
        self.ambiguity.as_ref()
    }

    /// URL of the checksum sidecar for the given algorithm.
    #[must_use]
    pub fn checksum_url(&self, algorithm: ChecksumAlgorithm) -> String {
        algorithm.sidecar_url(&self.url)
    }
}

/// Computes download URLs using repository metadata.
pub struct ArtifactResolver<'a> {
    client: &'a dyn MetadataClient,
    repository: RepositoryUrl,
    tie_break: SnapshotTieBreak,
}

impl<'a> ArtifactResolver<'a> {
    /// Create a resolver for the given repository.
    #[must_use]
    pub fn new(client: &'a dyn MetadataClient, repository: RepositoryUrl) -> Self {
        Self {
            client,
            repository,
            tie_break: SnapshotTieBreak::default(),
        }
    }

    /// Use `tie_break` when several snapshot entries match.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: SnapshotTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Resolve the coordinate to a concrete artefact URL.
    ///
    /// # Errors
    ///
    /// Propagates metadata failures, and returns
    /// [`FetchError::NoVersionsAvailable`] or
    /// [`FetchError::NoMatchingSnapshotArtifact`] when the metadata offers
    /// nothing usable.
    pub fn resolve(&self, coordinate: &Coordinate) -> Result<ResolvedArtifact> {
        let versioned = self.bind_version(coordinate)?;
        let version = versioned.version().unwrap_or_default().to_owned();

        let (file_version, ambiguity) = if versioned.is_snapshot() {
            self.snapshot_file_version(&versioned)?
        } else {
            (version, None)
        };

        let url = self.repository.join(&format!(
            "{}/{}",
            versioned.repository_path(true),
            versioned.artifact_filename(&file_version)
        ));
        debug!("resolved {coordinate} to {url}");
        Ok(ResolvedArtifact {
            coordinate: versioned,
            file_version,
            url,
            ambiguity,
        })
    }

    /// Bind an unversioned coordinate to the latest listed release.
    fn bind_version(&self, coordinate: &Coordinate) -> Result<Coordinate> {
        if coordinate.version().is_some() {
            return Ok(coordinate.clone());
        }
        let versions = self.client.fetch_release_versions(coordinate)?;
        let latest = versions
            .last()
            .ok_or_else(|| FetchError::NoVersionsAvailable {
                coordinate: coordinate.to_string(),
            })?;
        debug!("latest version of {coordinate} is {latest}");
        Ok(coordinate.clone().with_version(latest.as_str())?)
    }

    /// Pick the timestamped file version for a snapshot coordinate.
    fn snapshot_file_version(
        &self,
        coordinate: &Coordinate,
    ) -> Result<(String, Option<SnapshotAmbiguity>)> {
        let entries = self.client.fetch_snapshot_versions(coordinate)?;
        let candidates = matching_snapshots(&entries, coordinate);
        let chosen = self
            .tie_break
            .choose(&candidates, coordinate)
            .ok_or_else(|| FetchError::NoMatchingSnapshotArtifact {
                coordinate: coordinate.to_string(),
                extension: coordinate.extension().to_owned(),
                classifier: coordinate.classifier().map(str::to_owned),
            })?;

        let value = chosen.value().to_owned();
        let ambiguity = (candidates.len() > 1).then(|| SnapshotAmbiguity {
            candidates: candidates.len(),
            chosen: value.clone(),
            policy: self.tie_break,
        });
        if let Some(notice) = &ambiguity {
            warn!("{coordinate}: {notice}");
        }
        Ok((value, ambiguity))
    }
}

/// Snapshot entries with the coordinate's extension and, when it has one,
/// its classifier. Document order is preserved.
fn matching_snapshots<'e>(
    entries: &'e [SnapshotVersion],
    coordinate: &Coordinate,
) -> Vec<&'e SnapshotVersion> {
    entries
        .iter()
        .filter(|entry| entry.extension() == coordinate.extension())
        .filter(|entry| {
            coordinate
                .classifier()
                .is_none_or(|classifier| entry.classifier() == Some(classifier))
        })
        .collect()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
