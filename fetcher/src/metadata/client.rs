//! Metadata lookups against a remote repository.

use super::document::{RepositoryMetadata, SnapshotVersion};
use crate::coordinate::Coordinate;
use crate::error::{FetchError, Result};
use crate::repository_url::RepositoryUrl;
use crate::transport::Transport;
use log::debug;

/// Name of the metadata document at each repository directory.
pub const METADATA_FILENAME: &str = "maven-metadata.xml";

/// Trait for the two metadata queries the resolver needs.
///
/// Abstractions allow tests to supply metadata without a repository.
#[cfg_attr(test, mockall::automock)]
pub trait MetadataClient {
    /// Release versions for the coordinate's artifact, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MetadataUnavailable`] if the document cannot be
    /// fetched and [`FetchError::MalformedMetadata`] if it cannot be parsed.
    fn fetch_release_versions(&self, coordinate: &Coordinate) -> Result<Vec<String>>;

    /// Snapshot sub-artefact entries for the coordinate's version directory.
    ///
    /// # Errors
    ///
    /// As for [`MetadataClient::fetch_release_versions`].
    fn fetch_snapshot_versions(&self, coordinate: &Coordinate) -> Result<Vec<SnapshotVersion>>;
}

/// [`MetadataClient`] that reads `maven-metadata.xml` over a [`Transport`].
pub struct HttpMetadataClient<'a> {
    transport: &'a dyn Transport,
    repository: RepositoryUrl,
}

impl<'a> HttpMetadataClient<'a> {
    /// Create a client for the given repository.
    #[must_use]
    pub fn new(transport: &'a dyn Transport, repository: RepositoryUrl) -> Self {
        Self {
            transport,
            repository,
        }
    }

    /// URL of the metadata document for a coordinate directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use maven_fetch::coordinate::Coordinate;
    /// use maven_fetch::metadata::HttpMetadataClient;
    /// use maven_fetch::repository_url::RepositoryUrl;
    ///
    /// let repository = RepositoryUrl::try_from("https://repo.test/maven2").unwrap();
    /// let coordinate: Coordinate = "org.demo:demo:1.0-SNAPSHOT".parse().unwrap();
    /// assert_eq!(
    ///     HttpMetadataClient::metadata_url(&repository, &coordinate, true),
    ///     "https://repo.test/maven2/org/demo/demo/1.0-SNAPSHOT/maven-metadata.xml"
    /// );
    /// ```
    #[must_use]
    pub fn metadata_url(
        repository: &RepositoryUrl,
        coordinate: &Coordinate,
        include_version: bool,
    ) -> String {
        repository.join(&format!(
            "{}/{METADATA_FILENAME}",
            coordinate.repository_path(include_version)
        ))
    }

    fn fetch(&self, coordinate: &Coordinate, include_version: bool) -> Result<RepositoryMetadata> {
        let url = Self::metadata_url(&self.repository, coordinate, include_version);
        debug!("fetching metadata for {coordinate} from {url}");
        let body = self
            .transport
            .get_text(&url)
            .map_err(|source| FetchError::MetadataUnavailable {
                url: url.clone(),
                source,
            })?;
        RepositoryMetadata::parse(&body)
            .map_err(|source| FetchError::MalformedMetadata { url, source })
    }
}

impl MetadataClient for HttpMetadataClient<'_> {
    fn fetch_release_versions(&self, coordinate: &Coordinate) -> Result<Vec<String>> {
        Ok(self.fetch(coordinate, false)?.into_release_versions())
    }

    fn fetch_snapshot_versions(&self, coordinate: &Coordinate) -> Result<Vec<SnapshotVersion>> {
        Ok(self.fetch(coordinate, true)?.into_snapshot_versions())
    }
}
