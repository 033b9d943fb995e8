//! Blocking HTTP transport for repository requests.
//!
//! Provides a trait-based abstraction over the three request shapes the
//! fetcher issues (metadata XML, checksum text, and artefact bodies),
//! enabling dependency injection for testing.

use crate::progress::{Progress, ProgressObserver};
use log::debug;
use std::io::{Read, Write};
use std::time::Duration;

/// Size of the buffer used when streaming artefact bodies.
const CHUNK_SIZE: usize = 64 * 1024;

/// Trait for issuing blocking GET requests against a repository.
///
/// Abstractions allow tests to serve canned responses without network access.
pub trait Transport {
    /// Fetch a URL and return the body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not valid UTF-8.
    fn get_text(&self, url: &str) -> Result<String, TransportError>;

    /// Stream a URL's body into `sink`, reporting progress per chunk.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the size header is invalid,
    /// the body ends early, or writing to `sink` fails.
    fn fetch_to(
        &self,
        url: &str,
        sink: &mut dyn Write,
        observer: &mut dyn ProgressObserver,
    ) -> Result<u64, TransportError>;
}

/// Errors arising from repository requests.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[error("request failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The `Content-Length` header was present but not a byte count.
    #[error("invalid Content-Length \"{value}\" for {url}")]
    InvalidContentLength {
        /// The URL that was requested.
        url: String,
        /// The raw header value.
        value: String,
    },

    /// The body ended before the announced length was received.
    #[error("truncated body for {url}: expected {expected} bytes, received {received}")]
    Truncated {
        /// The URL that was requested.
        url: String,
        /// Announced body length.
        expected: u64,
        /// Bytes actually received.
        received: u64,
    },

    /// I/O error while reading the body or writing the destination.
    #[error("I/O error during transfer: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings applied to every request issued by [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Global per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Value sent in the `User-Agent` header.
    pub user_agent: String,
}

/// HTTP transport using a shared `ureq` agent.
pub struct HttpTransport {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpTransport {
    /// Build a transport whose agent applies the configured timeout.
    #[must_use]
    pub fn new(config: &TransportConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(config.timeout)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            user_agent: config.user_agent.clone(),
        }
    }

    fn get(&self, url: &str) -> Result<ureq::http::Response<ureq::Body>, TransportError> {
        debug!("GET {url}");
        self.agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| map_ureq_error(url, &e))
    }
}

impl Transport for HttpTransport {
    fn get_text(&self, url: &str) -> Result<String, TransportError> {
        self.get(url)?
            .into_body()
            .read_to_string()
            .map_err(|e| TransportError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }

    fn fetch_to(
        &self,
        url: &str,
        sink: &mut dyn Write,
        observer: &mut dyn ProgressObserver,
    ) -> Result<u64, TransportError> {
        let response = self.get(url)?;
        let header = response
            .headers()
            .get("content-length")
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let total = parse_content_length(url, header.as_deref())?;
        let mut reader = response.into_body().into_reader();
        copy_with_progress(url, &mut reader, sink, total, observer)
    }
}

/// Interpret a raw `Content-Length` header value.
///
/// An absent header means the size is unknown; a present but unparsable one
/// is an error.
fn parse_content_length(url: &str, header: Option<&str>) -> Result<Option<u64>, TransportError> {
    header
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| TransportError::InvalidContentLength {
                    url: url.to_owned(),
                    value: raw.to_owned(),
                })
        })
        .transpose()
}

/// Copy `reader` into `sink` in chunks, notifying `observer` after each one.
fn copy_with_progress(
    url: &str,
    reader: &mut dyn Read,
    sink: &mut dyn Write,
    total: Option<u64>,
    observer: &mut dyn ProgressObserver,
) -> Result<u64, TransportError> {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut received: u64 = 0;
    loop {
        let read = reader.read(&mut buffer)?;
        let Some(chunk) = buffer.get(..read) else {
            break;
        };
        if chunk.is_empty() {
            break;
        }
        sink.write_all(chunk)?;
        received = received.saturating_add(chunk.len() as u64);
        observer.on_progress(Progress::new(received, total));
    }
    sink.flush()?;
    if let Some(expected) = total.filter(|expected| received < *expected) {
        return Err(TransportError::Truncated {
            url: url.to_owned(),
            expected,
            received,
        });
    }
    observer.on_complete(Progress::new(received, total));
    Ok(received)
}

/// Map a ureq error to a [`TransportError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> TransportError {
    match err {
        ureq::Error::StatusCode(404) => TransportError::NotFound {
            url: url.to_owned(),
        },
        other => TransportError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
