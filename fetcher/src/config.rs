//! Layered configuration.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! command-line overrides. The file is either the one named explicitly or
//! `maven-fetch/config.toml` under the platform configuration directory.
//!
//! ```toml
//! repository_url = "https://repo.example.test/maven2"
//! user_agent = "ci-fetcher/1.0"
//! timeout_secs = 30
//! checksum = "sha1"
//! snapshot_policy = "prefer-unclassified"
//! ```

use crate::checksum::ChecksumAlgorithm;
use crate::error::{FetchError, Result};
use crate::repository_url::RepositoryUrl;
use crate::resolver::SnapshotTieBreak;
use crate::transport::TransportConfig;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Directory name under the platform configuration directory.
pub const APP_DIR: &str = "maven-fetch";

/// Configuration file name.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Effective settings for a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Base URL of the Maven repository.
    pub repository_url: RepositoryUrl,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Per-request timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
    /// Digest algorithm used for the up-to-date check.
    pub checksum: ChecksumAlgorithm,
    /// How one entry is picked when several snapshot entries match.
    pub snapshot_policy: SnapshotTieBreak,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            repository_url: RepositoryUrl::default(),
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            checksum: ChecksumAlgorithm::default(),
            snapshot_policy: SnapshotTieBreak::default(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replacement repository URL.
    pub repository_url: Option<RepositoryUrl>,
    /// Replacement user agent.
    pub user_agent: Option<String>,
    /// Replacement timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Replacement checksum algorithm.
    pub checksum: Option<ChecksumAlgorithm>,
    /// Replacement snapshot tie-break policy.
    pub snapshot_policy: Option<SnapshotTieBreak>,
}

impl FetchConfig {
    /// Load the file layer.
    ///
    /// An explicit path must exist. Without one, the platform default is
    /// read when present and silently skipped otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Config`] when a file cannot be read or parsed.
    pub fn load(explicit: Option<&Utf8Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::read(&path),
            _ => {
                debug!("no configuration file; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Config`] when the file cannot be read or parsed.
    pub fn read(path: &Utf8Path) -> Result<Self> {
        debug!("reading configuration from {path}");
        let text = std::fs::read_to_string(path).map_err(|e| FetchError::Config {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&text, path)
    }

    /// Parse configuration from TOML text; `path` is used in errors only.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Config`] for invalid TOML, unknown keys or
    /// invalid values.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use maven_fetch::checksum::ChecksumAlgorithm;
    /// use maven_fetch::config::FetchConfig;
    ///
    /// let config = FetchConfig::from_toml("checksum = \"sha256\"", Utf8Path::new("c.toml")).unwrap();
    /// assert_eq!(config.checksum, ChecksumAlgorithm::Sha256);
    /// assert_eq!(config.timeout_secs, 60);
    /// ```
    pub fn from_toml(text: &str, path: &Utf8Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| FetchError::Config {
            path: path.to_owned(),
            reason: e.message().to_owned(),
        })
    }

    /// Apply command-line overrides on top of this configuration.
    #[must_use]
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            repository_url: overrides.repository_url.unwrap_or(self.repository_url),
            user_agent: overrides.user_agent.unwrap_or(self.user_agent),
            timeout_secs: overrides.timeout_secs.unwrap_or(self.timeout_secs),
            checksum: overrides.checksum.unwrap_or(self.checksum),
            snapshot_policy: overrides.snapshot_policy.unwrap_or(self.snapshot_policy),
        }
    }

    /// The request timeout, or `None` when disabled.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Settings for building an [`crate::transport::HttpTransport`].
    #[must_use]
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// The `User-Agent` sent when none is configured.
#[must_use]
pub fn default_user_agent() -> String {
    format!("{APP_DIR}/{}", env!("CARGO_PKG_VERSION"))
}

/// Location of the platform default configuration file, if one can be
/// determined.
#[must_use]
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let dirs = directories_next::BaseDirs::new()?;
    let config_dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()?;
    Some(config_dir.join(APP_DIR).join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(text: &str) -> Result<FetchConfig> {
        FetchConfig::from_toml(text, Utf8Path::new("test.toml"))
    }

    #[test]
    fn defaults_target_maven_central() {
        let config = FetchConfig::default();
        assert_eq!(config.repository_url.as_str(), "https://repo1.maven.org/maven2");
        assert_eq!(config.checksum, ChecksumAlgorithm::Md5);
        assert_eq!(config.snapshot_policy, SnapshotTieBreak::FirstInDocumentOrder);
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
        assert!(config.user_agent.starts_with("maven-fetch/"));
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse("").expect("valid"), FetchConfig::default());
    }

    #[test]
    fn file_values_replace_defaults() {
        let config = parse(concat!(
            "repository_url = \"https://repo.test/maven2/\"\n",
            "user_agent = \"ci/1\"\n",
            "timeout_secs = 5\n",
            "checksum = \"sha1\"\n",
            "snapshot_policy = \"prefer-unclassified\"\n",
        ))
        .expect("valid");
        assert_eq!(config.repository_url.as_str(), "https://repo.test/maven2");
        assert_eq!(config.user_agent, "ci/1");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.checksum, ChecksumAlgorithm::Sha1);
        assert_eq!(config.snapshot_policy, SnapshotTieBreak::PreferUnclassified);
    }

    #[rstest]
    #[case::unknown_key("mirror = \"x\"")]
    #[case::bad_url("repository_url = \"ftp://repo.test\"")]
    #[case::bad_algorithm("checksum = \"crc32\"")]
    #[case::bad_policy("snapshot_policy = \"newest\"")]
    #[case::bad_syntax("timeout_secs = ")]
    fn invalid_files_are_config_errors(#[case] text: &str) {
        let err = parse(text).expect_err("invalid config");
        assert!(matches!(err, FetchError::Config { .. }), "got {err:?}");
    }

    #[test]
    fn zero_timeout_disables_it() {
        let config = parse("timeout_secs = 0").expect("valid");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.transport_config().timeout, None);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let base = parse("timeout_secs = 5\nchecksum = \"sha1\"").expect("valid");
        let overrides = ConfigOverrides {
            timeout_secs: Some(9),
            repository_url: Some(RepositoryUrl::try_from("http://mirror.test").expect("valid")),
            ..ConfigOverrides::default()
        };

        let config = base.with_overrides(overrides);
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.repository_url.as_str(), "http://mirror.test");
        assert_eq!(config.checksum, ChecksumAlgorithm::Sha1);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::try_from(dir.path().join("absent.toml")).expect("UTF-8 path");
        let err = FetchConfig::load(Some(&path)).expect_err("missing file");
        assert!(matches!(err, FetchError::Config { .. }));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::try_from(dir.path().join("fetch.toml")).expect("UTF-8 path");
        std::fs::write(&path, "user_agent = \"from-file\"").expect("write config");

        let config = FetchConfig::load(Some(&path)).expect("loads");
        assert_eq!(config.user_agent, "from-file");
    }
}
