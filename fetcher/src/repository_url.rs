//! Repository base URL newtype.
//!
//! Validates that the value uses an HTTP(S) scheme and names a host, and
//! strips trailing slashes so paths can be appended with a single `/`.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Maven Central, used when no repository is configured.
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";

/// Error raised for an unusable repository URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid repository URL \"{value}\": {reason}")]
pub struct InvalidRepositoryUrl {
    /// The rejected input.
    pub value: String,
    /// Description of the validation failure.
    pub reason: String,
}

/// A validated repository base URL without a trailing slash.
///
/// # Examples
///
/// ```
/// use maven_fetch::repository_url::RepositoryUrl;
///
/// let url = RepositoryUrl::try_from("https://repo.example.test/maven2/").unwrap();
/// assert_eq!(url.join("org/example/demo"), "https://repo.example.test/maven2/org/example/demo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct RepositoryUrl(String);

impl RepositoryUrl {
    /// Return the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a repository-relative path.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl Default for RepositoryUrl {
    fn default() -> Self {
        Self(MAVEN_CENTRAL.to_owned())
    }
}

impl TryFrom<&str> for RepositoryUrl {
    type Error = InvalidRepositoryUrl;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        validate(value)
    }
}

impl TryFrom<String> for RepositoryUrl {
    type Error = InvalidRepositoryUrl;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

impl std::str::FromStr for RepositoryUrl {
    type Err = InvalidRepositoryUrl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl AsRef<str> for RepositoryUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate(value: &str) -> Result<RepositoryUrl, InvalidRepositoryUrl> {
    let trimmed = value.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| InvalidRepositoryUrl {
            value: value.to_owned(),
            reason: "expected an http:// or https:// URL".to_owned(),
        })?;
    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(InvalidRepositoryUrl {
            value: value.to_owned(),
            reason: "missing host".to_owned(),
        });
    }
    if let Some(bad) = trimmed.chars().find(|c| c.is_whitespace()) {
        return Err(InvalidRepositoryUrl {
            value: value.to_owned(),
            reason: format!("unexpected character {bad:?}"),
        });
    }
    Ok(RepositoryUrl(trimmed.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_maven_central() {
        assert_eq!(RepositoryUrl::default().as_str(), MAVEN_CENTRAL);
    }

    #[rstest]
    #[case::one_slash("https://repo.test/maven2/")]
    #[case::many_slashes("https://repo.test/maven2///")]
    #[case::none("https://repo.test/maven2")]
    fn strips_trailing_slashes(#[case] input: &str) {
        let url = RepositoryUrl::try_from(input).expect("valid URL");
        assert_eq!(url.as_str(), "https://repo.test/maven2");
    }

    #[test]
    fn accepts_plain_http() {
        assert!(RepositoryUrl::try_from("http://localhost:8081/repository").is_ok());
    }

    #[rstest]
    #[case::no_scheme("repo.test/maven2")]
    #[case::ftp("ftp://repo.test/maven2")]
    #[case::no_host("https:///maven2")]
    #[case::inner_space("https://repo.test/maven 2")]
    fn rejects_unusable_urls(#[case] input: &str) {
        assert!(RepositoryUrl::try_from(input).is_err());
    }

    #[test]
    fn join_avoids_double_slash() {
        let url = RepositoryUrl::try_from("https://repo.test/maven2/").expect("valid URL");
        assert_eq!(url.join("/org/demo"), "https://repo.test/maven2/org/demo");
    }
}
