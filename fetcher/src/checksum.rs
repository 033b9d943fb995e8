//! Checksum algorithms and the local-copy freshness check.
//!
//! The digest algorithm is a configuration value rather than a hardcoded
//! choice; [`IntegrityChecker`] asks the repository for the sidecar matching
//! the configured algorithm and compares it with a digest of the local file.

use crate::transport::Transport;
use log::{debug, info, warn};
use serde::Deserialize;
use sha2::Digest;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Digest algorithms whose sidecar files Maven repositories publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    /// 128-bit MD5; fast, but unsuitable for adversarial inputs.
    #[default]
    Md5,
    /// 160-bit SHA-1.
    Sha1,
    /// 256-bit SHA-2.
    Sha256,
}

impl ChecksumAlgorithm {
    /// File extension of the repository sidecar holding this digest.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }

    /// URL of the digest sidecar for an artefact URL.
    #[must_use]
    pub fn sidecar_url(self, artifact_url: &str) -> String {
        format!("{artifact_url}.{}", self.extension())
    }

    /// Compute the lowercase hex digest of a file's full contents.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn digest_file(self, path: &Path) -> std::io::Result<String> {
        let file = fs::File::open(path)?;
        match self {
            Self::Md5 => stream_digest::<md5::Md5>(file),
            Self::Sha1 => stream_digest::<sha1::Sha1>(file),
            Self::Sha256 => stream_digest::<sha2::Sha256>(file),
        }
    }

    /// Compute the lowercase hex digest of an in-memory buffer.
    #[must_use]
    pub fn digest_bytes(self, bytes: &[u8]) -> String {
        match self {
            Self::Md5 => format!("{:x}", md5::Md5::digest(bytes)),
            Self::Sha1 => format!("{:x}", sha1::Sha1::digest(bytes)),
            Self::Sha256 => format!("{:x}", sha2::Sha256::digest(bytes)),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error for an unrecognised algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown checksum algorithm \"{0}\"; expected one of: md5, sha1, sha256")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for ChecksumAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Stream a reader through hasher `D` and return lowercase hex.
fn stream_digest<D: Digest>(mut reader: impl Read) -> std::io::Result<String>
where
    sha2::digest::Output<D>: fmt::LowerHex,
{
    let mut hasher = D::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        let Some(chunk) = buffer.get(..bytes_read) else {
            break;
        };
        if chunk.is_empty() {
            break;
        }
        hasher.update(chunk);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Extract the digest from a sidecar body.
///
/// Sidecars hold either the bare hex digest or `<digest>  <filename>`; the
/// first whitespace-delimited token is the digest. Case is preserved.
///
/// # Examples
///
/// ```
/// use maven_fetch::checksum::sidecar_digest;
///
/// assert_eq!(sidecar_digest("abc123  demo.jar\n"), Some("abc123"));
/// assert_eq!(sidecar_digest("  \n"), None);
/// ```
#[must_use]
pub fn sidecar_digest(body: &str) -> Option<&str> {
    body.split_whitespace().next()
}

/// Decides whether a local file already matches the repository copy.
pub struct IntegrityChecker<'a> {
    transport: &'a dyn Transport,
    algorithm: ChecksumAlgorithm,
}

impl<'a> IntegrityChecker<'a> {
    /// Create a checker that fetches sidecars through `transport`.
    #[must_use]
    pub fn new(transport: &'a dyn Transport, algorithm: ChecksumAlgorithm) -> Self {
        Self {
            transport,
            algorithm,
        }
    }

    /// Return `true` only when `local` exists and its digest equals the
    /// repository's published digest for `artifact_url`.
    ///
    /// Only the first whitespace-delimited token of the sidecar body is
    /// compared (see [`sidecar_digest`]), so a `<hex>  <filename>` body
    /// matches when `<hex>` equals the local digest. The comparison is
    /// case-sensitive against the lowercase local digest.
    ///
    /// A missing local file short-circuits to `false` without any request.
    /// Failures fetching the sidecar or reading the file are logged and
    /// reported as "not up to date" so the caller downloads afresh.
    #[must_use]
    pub fn is_up_to_date(&self, local: &Path, artifact_url: &str) -> bool {
        if !local.is_file() {
            debug!("{} does not exist; download required", local.display());
            return false;
        }

        let sidecar_url = self.algorithm.sidecar_url(artifact_url);
        let remote = match self.transport.get_text(&sidecar_url) {
            Ok(body) => body,
            Err(err) => {
                warn!("could not fetch {sidecar_url}; downloading afresh: {err}");
                return false;
            }
        };
        let Some(expected) = sidecar_digest(&remote) else {
            warn!("empty checksum at {sidecar_url}; downloading afresh");
            return false;
        };

        let actual = match self.algorithm.digest_file(local) {
            Ok(actual) => actual,
            Err(err) => {
                warn!("could not hash {}: {err}", local.display());
                return false;
            }
        };

        let current = actual == expected;
        info!(
            "{} {} checksum {} remote",
            local.display(),
            self.algorithm,
            if current { "matches" } else { "differs from" }
        );
        current
    }
}

#[cfg(test)]
#[path = "checksum_tests.rs"]
mod tests;
