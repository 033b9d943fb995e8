//! Typed model of a repository `maven-metadata.xml` document.
//!
//! The XML is deserialized with `quick-xml`'s serde support into private
//! structs mirroring the schema; callers only see the two query shapes
//! exposed by [`RepositoryMetadata`].

use serde::Deserialize;

/// Errors arising from metadata parsing.
#[derive(Debug, thiserror::Error)]
pub enum MetadataParseError {
    /// XML syntax or structure did not match the metadata schema.
    #[error("metadata parse error: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// The document has no `<versioning>` element.
    #[error("metadata has no <versioning> element")]
    MissingVersioning,
}

/// One `<snapshotVersion>` entry of a version-level metadata document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotVersion {
    extension: String,
    classifier: Option<String>,
    value: String,
}

impl SnapshotVersion {
    /// Create an entry; an empty classifier is stored as `None`.
    #[must_use]
    pub fn new(
        extension: impl Into<String>,
        classifier: Option<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            extension: extension.into(),
            classifier: classifier.filter(|c| !c.is_empty()),
            value: value.into(),
        }
    }

    /// Packaging extension of the sub-artefact.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Classifier of the sub-artefact, if any.
    #[must_use]
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Timestamped unique version, e.g. `1.0-20130101.120000-3`.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Parsed repository metadata for one coordinate path.
///
/// # Examples
///
/// ```
/// use maven_fetch::metadata::RepositoryMetadata;
///
/// let xml = "<metadata><versioning><versions>\
///            <version>1.0</version><version>1.1</version>\
///            </versions></versioning></metadata>";
/// let metadata = RepositoryMetadata::parse(xml).unwrap();
/// assert_eq!(metadata.release_versions(), ["1.0", "1.1"]);
/// assert_eq!(metadata.latest_release(), Some("1.1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    versions: Vec<String>,
    snapshot_versions: Vec<SnapshotVersion>,
}

impl RepositoryMetadata {
    /// Parse a `maven-metadata.xml` document.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataParseError::Xml`] for malformed XML or entries
    /// missing required children, and
    /// [`MetadataParseError::MissingVersioning`] when the `<versioning>`
    /// element is absent.
    pub fn parse(xml: &str) -> Result<Self, MetadataParseError> {
        let document: MetadataXml = quick_xml::de::from_str(xml)?;
        let versioning = document
            .versioning
            .ok_or(MetadataParseError::MissingVersioning)?;
        let versions = versioning
            .versions
            .map(|versions| {
                versions
                    .version
                    .into_iter()
                    .map(|version| version.trim().to_owned())
                    .filter(|version| !version.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let snapshot_versions = versioning
            .snapshot_versions
            .map(|list| {
                list.snapshot_version
                    .into_iter()
                    .map(|entry| {
                        SnapshotVersion::new(
                            entry.extension.trim(),
                            entry.classifier.map(|c| c.trim().to_owned()),
                            entry.value.trim(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            versions,
            snapshot_versions,
        })
    }

    /// Release versions in document order.
    #[must_use]
    pub fn release_versions(&self) -> &[String] {
        &self.versions
    }

    /// Snapshot sub-artefact entries in document order.
    #[must_use]
    pub fn snapshot_versions(&self) -> &[SnapshotVersion] {
        &self.snapshot_versions
    }

    /// The last listed version, which repositories append in release order.
    ///
    /// No numeric or semantic-version comparison is applied.
    #[must_use]
    pub fn latest_release(&self) -> Option<&str> {
        self.versions.last().map(String::as_str)
    }

    /// Consume the document and return the release versions.
    #[must_use]
    pub fn into_release_versions(self) -> Vec<String> {
        self.versions
    }

    /// Consume the document and return the snapshot entries.
    #[must_use]
    pub fn into_snapshot_versions(self) -> Vec<SnapshotVersion> {
        self.snapshot_versions
    }
}

#[derive(Debug, Deserialize)]
struct MetadataXml {
    versioning: Option<VersioningXml>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersioningXml {
    versions: Option<VersionsXml>,
    snapshot_versions: Option<SnapshotVersionsXml>,
}

#[derive(Debug, Deserialize)]
struct VersionsXml {
    #[serde(default)]
    version: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotVersionsXml {
    #[serde(default)]
    snapshot_version: Vec<SnapshotVersionXml>,
}

#[derive(Debug, Deserialize)]
struct SnapshotVersionXml {
    classifier: Option<String>,
    extension: String,
    value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{release_metadata_xml, snapshot_metadata_xml};

    #[test]
    fn parses_release_versions_in_document_order() {
        let xml = release_metadata_xml("org.demo", "demo", &["1.0", "1.1", "2.0"]);
        let metadata = RepositoryMetadata::parse(&xml).expect("valid metadata");
        assert_eq!(metadata.release_versions(), ["1.0", "1.1", "2.0"]);
        assert_eq!(metadata.latest_release(), Some("2.0"));
    }

    #[test]
    fn latest_is_last_not_highest() {
        let xml = release_metadata_xml("org.demo", "demo", &["2.0", "10.0", "1.5"]);
        let metadata = RepositoryMetadata::parse(&xml).expect("valid metadata");
        assert_eq!(metadata.latest_release(), Some("1.5"));
    }

    #[test]
    fn parses_snapshot_entries_with_optional_classifier() {
        let xml = snapshot_metadata_xml(
            "1.0-SNAPSHOT",
            &[
                ("jar", None, "1.0-20130101.1-1"),
                ("jar", Some("sources"), "1.0-20130101.1-1"),
                ("pom", None, "1.0-20130101.1-1"),
            ],
        );
        let metadata = RepositoryMetadata::parse(&xml).expect("valid metadata");
        let entries = metadata.snapshot_versions();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.first().map(SnapshotVersion::classifier), Some(None));
        assert_eq!(
            entries.get(1).and_then(SnapshotVersion::classifier),
            Some("sources")
        );
        assert_eq!(entries.get(2).map(SnapshotVersion::extension), Some("pom"));
        assert!(metadata.release_versions().is_empty());
    }

    #[test]
    fn empty_classifier_element_means_none() {
        let xml = concat!(
            "<metadata><versioning><snapshotVersions><snapshotVersion>",
            "<classifier/><extension>jar</extension><value>1.0-1</value>",
            "</snapshotVersion></snapshotVersions></versioning></metadata>"
        );
        let metadata = RepositoryMetadata::parse(xml).expect("valid metadata");
        let entry = metadata.snapshot_versions().first().expect("one entry");
        assert_eq!(entry.classifier(), None);
    }

    #[test]
    fn missing_versions_element_yields_empty_list() {
        let xml = "<metadata><versioning><lastUpdated>1</lastUpdated></versioning></metadata>";
        let metadata = RepositoryMetadata::parse(xml).expect("valid metadata");
        assert!(metadata.release_versions().is_empty());
        assert!(metadata.snapshot_versions().is_empty());
    }

    #[test]
    fn missing_versioning_is_rejected() {
        let err = RepositoryMetadata::parse("<metadata><groupId>g</groupId></metadata>")
            .expect_err("no versioning");
        assert!(matches!(err, MetadataParseError::MissingVersioning));
    }

    #[test]
    fn malformed_xml_is_rejected() {
        let err = RepositoryMetadata::parse("<metadata><versioning>").expect_err("truncated");
        assert!(matches!(err, MetadataParseError::Xml(_)));
    }

    #[test]
    fn snapshot_entry_without_value_is_rejected() {
        let xml = concat!(
            "<metadata><versioning><snapshotVersions><snapshotVersion>",
            "<extension>jar</extension>",
            "</snapshotVersion></snapshotVersions></versioning></metadata>"
        );
        assert!(RepositoryMetadata::parse(xml).is_err());
    }
}
