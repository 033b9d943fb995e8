//! Maven coordinate value type.
//!
//! A [`Coordinate`] is parsed from the positional
//! `group:artifact[:type[:classifier]]:version` grammar. The final segment is
//! always the version; the optional middle segments are identified by their
//! position, never by their content.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Packaging applied when a coordinate does not name one.
pub const DEFAULT_EXTENSION: &str = "jar";

/// Suffix that marks a version as a snapshot.
const SNAPSHOT_SUFFIX: &str = "SNAPSHOT";

/// Errors raised when a coordinate cannot be constructed or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// The input has fewer than the three mandatory segments.
    #[error("invalid coordinate \"{input}\": expected at least 3 colon-separated segments, found {found}")]
    TooFewSegments {
        /// The rejected input.
        input: String,
        /// Number of segments present.
        found: usize,
    },

    /// The input has more segments than the 5-segment form allows.
    #[error("invalid coordinate \"{input}\": expected at most 5 colon-separated segments, found {found}")]
    TooManySegments {
        /// The rejected input.
        input: String,
        /// Number of segments present.
        found: usize,
    },

    /// The group identifier is empty.
    #[error("invalid coordinate: group id must not be empty")]
    EmptyGroupId,

    /// The artifact identifier is empty.
    #[error("invalid coordinate: artifact id must not be empty")]
    EmptyArtifactId,

    /// A component contains a `:` separator or whitespace.
    #[error("invalid coordinate: {component} \"{value}\" must not contain ':' or whitespace")]
    InvalidComponent {
        /// Which component was rejected (`group id`, `classifier`, ...).
        component: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Reject values that would not survive a `Display`/`parse` round trip.
fn checked(component: &'static str, value: String) -> Result<String, CoordinateError> {
    if value.chars().any(|c| c == ':' || c.is_whitespace()) {
        return Err(CoordinateError::InvalidComponent { component, value });
    }
    Ok(value)
}

/// An immutable Maven artifact coordinate.
///
/// # Examples
///
/// ```
/// use maven_fetch::coordinate::Coordinate;
///
/// let coordinate: Coordinate = "org.apache.solr:solr:war:3.5.0".parse().unwrap();
/// assert_eq!(coordinate.extension(), "war");
/// assert_eq!(coordinate.version(), Some("3.5.0"));
/// assert_eq!(coordinate.repository_path(true), "org/apache/solr/solr/3.5.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    classifier: Option<String>,
    extension: String,
}

impl Coordinate {
    /// Create a coordinate with the default `jar` packaging and no classifier.
    ///
    /// A `None` version means the latest release should be resolved.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::EmptyGroupId`] or
    /// [`CoordinateError::EmptyArtifactId`] when either identifier is empty,
    /// and [`CoordinateError::InvalidComponent`] when any component contains
    /// `:` or whitespace.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<String>,
    ) -> Result<Self, CoordinateError> {
        let group = checked("group id", group_id.into())?;
        let artifact = checked("artifact id", artifact_id.into())?;
        if group.is_empty() {
            return Err(CoordinateError::EmptyGroupId);
        }
        if artifact.is_empty() {
            return Err(CoordinateError::EmptyArtifactId);
        }
        let version = version
            .filter(|v| !v.is_empty())
            .map(|v| checked("version", v))
            .transpose()?;
        Ok(Self {
            group_id: group,
            artifact_id: artifact,
            version,
            classifier: None,
            extension: DEFAULT_EXTENSION.to_owned(),
        })
    }

    /// Parse the positional colon-delimited coordinate grammar.
    ///
    /// | segments | layout                                  |
    /// |----------|-----------------------------------------|
    /// | 3        | `group:artifact:version`                |
    /// | 4        | `group:artifact:type:version`           |
    /// | 5        | `group:artifact:type:classifier:version`|
    ///
    /// An empty version segment leaves the version unresolved.
    ///
    /// # Errors
    ///
    /// Returns a [`CoordinateError`] for any other segment count or when the
    /// group or artifact is empty.
    pub fn parse(text: &str) -> Result<Self, CoordinateError> {
        let input = text.trim();
        let segments: Vec<&str> = input.split(':').collect();
        match segments.as_slice() {
            [group, artifact, version] => Self::new(*group, *artifact, owned(version)),
            [group, artifact, extension, version] => {
                Self::new(*group, *artifact, owned(version))?.with_extension(*extension)
            }
            [group, artifact, extension, classifier, version] => {
                Self::new(*group, *artifact, owned(version))?
                    .with_extension(*extension)?
                    .with_classifier(*classifier)
            }
            short if short.len() < 3 => Err(CoordinateError::TooFewSegments {
                input: input.to_owned(),
                found: short.len(),
            }),
            long => Err(CoordinateError::TooManySegments {
                input: input.to_owned(),
                found: long.len(),
            }),
        }
    }

    /// Return a copy with the given packaging; empty input keeps `jar`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::InvalidComponent`] when the value contains
    /// `:` or whitespace.
    pub fn with_extension(
        mut self,
        extension: impl Into<String>,
    ) -> Result<Self, CoordinateError> {
        let value = checked("type", extension.into())?;
        self.extension = if value.is_empty() {
            DEFAULT_EXTENSION.to_owned()
        } else {
            value
        };
        Ok(self)
    }

    /// Return a copy with the given classifier; empty input clears it.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::InvalidComponent`] when the value contains
    /// `:` or whitespace.
    pub fn with_classifier(
        mut self,
        classifier: impl Into<String>,
    ) -> Result<Self, CoordinateError> {
        let value = checked("classifier", classifier.into())?;
        self.classifier = (!value.is_empty()).then_some(value);
        Ok(self)
    }

    /// Return a copy bound to a concrete version; empty input clears it.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::InvalidComponent`] when the value contains
    /// `:` or whitespace.
    pub fn with_version(
        mut self,
        version: impl Into<String>,
    ) -> Result<Self, CoordinateError> {
        let value = checked("version", version.into())?;
        self.version = (!value.is_empty()).then_some(value);
        Ok(self)
    }

    /// The dot-separated group identifier.
    #[must_use]
    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// The artifact identifier.
    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// The requested version, or `None` when the latest should be resolved.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The classifier, if any.
    #[must_use]
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// The packaging extension; never empty.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether the version ends with the literal `SNAPSHOT` suffix.
    #[must_use]
    pub fn is_snapshot(&self) -> bool {
        self.version
            .as_deref()
            .is_some_and(|version| version.ends_with(SNAPSHOT_SUFFIX))
    }

    /// Repository-relative directory for this coordinate.
    ///
    /// The group's dots become `/`, followed by the artifact id and, when
    /// `include_version` is set and a version is known, the version.
    #[must_use]
    pub fn repository_path(&self, include_version: bool) -> String {
        let mut path = format!("{}/{}", self.group_id.replace('.', "/"), self.artifact_id);
        match &self.version {
            Some(version) if include_version => {
                path.push('/');
                path.push_str(version);
            }
            _ => {}
        }
        path
    }

    /// Local filename used when the caller does not name one.
    #[must_use]
    pub fn default_filename(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!("{}-{classifier}.{}", self.artifact_id, self.extension),
            None => format!("{}.{}", self.artifact_id, self.extension),
        }
    }

    /// Remote filename for the given file version, per the standard layout.
    ///
    /// For releases the file version equals the coordinate version; for
    /// snapshots it is the timestamped value from the repository metadata.
    #[must_use]
    pub fn artifact_filename(&self, file_version: &str) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{file_version}-{classifier}.{}",
                self.artifact_id, self.extension
            ),
            None => format!("{}-{file_version}.{}", self.artifact_id, self.extension),
        }
    }
}

fn owned(version: &str) -> Option<String> {
    (!version.is_empty()).then(|| version.to_owned())
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.version.as_deref().unwrap_or_default();
        write!(f, "{}:{}:", self.group_id, self.artifact_id)?;
        match &self.classifier {
            Some(classifier) => write!(f, "{}:{classifier}:", self.extension)?,
            None if self.extension != DEFAULT_EXTENSION => write!(f, "{}:", self.extension)?,
            None => {}
        }
        write!(f, "{version}")
    }
}

#[cfg(test)]
#[path = "coordinate_tests.rs"]
mod tests;
