//! Download orchestration.
//!
//! Ties resolution, the up-to-date check and the transfer together:
//! resolve the URL, skip when the local file already matches the
//! repository digest, otherwise stream the body to disk. Every failure is
//! reported as [`DownloadOutcome::Failed`] carrying the typed error, so the
//! caller decides how to present it.

use crate::checksum::IntegrityChecker;
use crate::coordinate::Coordinate;
use crate::error::{FetchError, Result};
use crate::progress::ProgressObserver;
use crate::resolver::{ArtifactResolver, ResolvedArtifact};
use crate::transport::Transport;
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use std::fs;

/// The outcome of a single download request.
///
/// Failures are an outcome rather than an `Err` and still name the
/// coordinate they concern.
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The local file already matches the repository digest.
    Skipped {
        /// The resolved artefact.
        artifact: ResolvedArtifact,
        /// The local file that was checked.
        path: Utf8PathBuf,
    },
    /// The artefact body was written to disk.
    Downloaded {
        /// The resolved artefact.
        artifact: ResolvedArtifact,
        /// The file that was written.
        path: Utf8PathBuf,
        /// Number of bytes written.
        bytes: u64,
    },
    /// Resolution or transfer failed.
    Failed {
        /// The coordinate as requested.
        coordinate: Coordinate,
        /// The failure, with its cause chain.
        error: FetchError,
    },
}

impl DownloadOutcome {
    /// Whether this outcome should be reported as a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The resolved artefact, unless resolution failed.
    #[must_use]
    pub fn artifact(&self) -> Option<&ResolvedArtifact> {
        match self {
            Self::Skipped { artifact, .. } | Self::Downloaded { artifact, .. } => Some(artifact),
            Self::Failed { .. } => None,
        }
    }
}

/// Resolves, checks and downloads artefacts.
pub struct Downloader<'a> {
    resolver: ArtifactResolver<'a>,
    checker: IntegrityChecker<'a>,
    transport: &'a dyn Transport,
}

impl<'a> Downloader<'a> {
    /// Assemble a downloader from its collaborators.
    #[must_use]
    pub fn new(
        resolver: ArtifactResolver<'a>,
        checker: IntegrityChecker<'a>,
        transport: &'a dyn Transport,
    ) -> Self {
        Self {
            resolver,
            checker,
            transport,
        }
    }

    /// Resolve the artefact URL without touching the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns the resolution failure unchanged.
    pub fn resolve_only(&self, coordinate: &Coordinate) -> Result<ResolvedArtifact> {
        self.resolver.resolve(coordinate)
    }

    /// Download `coordinate` to `destination`, or to the coordinate's
    /// default filename in the working directory.
    ///
    /// A partially written file is left in place when the transfer fails.
    pub fn download(
        &self,
        coordinate: &Coordinate,
        destination: Option<&Utf8Path>,
        observer: &mut dyn ProgressObserver,
    ) -> DownloadOutcome {
        let path = destination_path(coordinate, destination);
        match self.try_download(coordinate, path, observer) {
            Ok(outcome) => outcome,
            Err(error) => DownloadOutcome::Failed {
                coordinate: coordinate.clone(),
                error,
            },
        }
    }

    fn try_download(
        &self,
        coordinate: &Coordinate,
        path: Utf8PathBuf,
        observer: &mut dyn ProgressObserver,
    ) -> Result<DownloadOutcome> {
        let artifact = self.resolver.resolve(coordinate)?;

        if self
            .checker
            .is_up_to_date(path.as_std_path(), artifact.url())
        {
            info!("{path} is up to date; skipping {}", artifact.url());
            return Ok(DownloadOutcome::Skipped { artifact, path });
        }

        ensure_parent(&path)?;
        let bytes = self.transfer(&artifact, &path, observer)?;
        info!("wrote {bytes} bytes from {} to {path}", artifact.url());
        Ok(DownloadOutcome::Downloaded {
            artifact,
            path,
            bytes,
        })
    }

    /// Stream the artefact body into a file scoped to this call.
    fn transfer(
        &self,
        artifact: &ResolvedArtifact,
        path: &Utf8Path,
        observer: &mut dyn ProgressObserver,
    ) -> Result<u64> {
        let mut file = fs::File::create(path).map_err(|source| FetchError::Io {
            path: path.to_owned(),
            source,
        })?;
        self.transport
            .fetch_to(artifact.url(), &mut file, observer)
            .map_err(|source| FetchError::TransferFailure {
                url: artifact.url().to_owned(),
                source,
            })
    }
}

fn destination_path(coordinate: &Coordinate, destination: Option<&Utf8Path>) -> Utf8PathBuf {
    destination.map_or_else(
        || Utf8PathBuf::from(coordinate.default_filename()),
        Utf8Path::to_path_buf,
    )
}

fn ensure_parent(path: &Utf8Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| FetchError::Io {
                path: parent.to_owned(),
                source,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "downloader_tests.rs"]
mod tests;
