//! Shared test utilities for the fetcher crate.

use crate::progress::{Progress, ProgressObserver};
use crate::transport::{Transport, TransportError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

/// Canned response served by [`StubTransport`].
#[derive(Debug, Clone)]
enum Route {
    Body(Vec<u8>),
    NotFound,
    Failure(String),
}

/// An in-memory [`Transport`] serving canned bodies keyed by URL.
///
/// Every request is recorded so tests can assert which URLs were fetched.
/// URLs without a route answer with [`TransportError::NotFound`].
#[derive(Debug, Default)]
pub struct StubTransport {
    routes: HashMap<String, Route>,
    requests: RefCell<Vec<String>>,
}

impl StubTransport {
    /// Creates a transport with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` as text at `url`.
    #[must_use]
    pub fn with_text(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_bytes(url, body.into().into_bytes())
    }

    /// Serves `bytes` at `url`.
    #[must_use]
    pub fn with_bytes(mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(url.into(), Route::Body(bytes.into()));
        self
    }

    /// Answers `url` with HTTP 404.
    #[must_use]
    pub fn with_not_found(mut self, url: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Route::NotFound);
        self
    }

    /// Answers `url` with a network failure.
    #[must_use]
    pub fn with_failure(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Route::Failure(reason.into()));
        self
    }

    /// Replaces the body served at `url`.
    pub fn set_bytes(&mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.routes.insert(url.into(), Route::Body(bytes.into()));
    }

    /// Returns every URL requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// Returns how many times `url` was requested.
    #[must_use]
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|requested| requested.as_str() == url)
            .count()
    }

    fn respond(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.borrow_mut().push(url.to_owned());
        match self.routes.get(url) {
            Some(Route::Body(bytes)) => Ok(bytes.clone()),
            Some(Route::Failure(reason)) => Err(TransportError::Http {
                url: url.to_owned(),
                reason: reason.clone(),
            }),
            Some(Route::NotFound) | None => Err(TransportError::NotFound {
                url: url.to_owned(),
            }),
        }
    }
}

impl Transport for StubTransport {
    fn get_text(&self, url: &str) -> Result<String, TransportError> {
        let bytes = self.respond(url)?;
        String::from_utf8(bytes).map_err(|e| TransportError::Http {
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
        let bytes = self.respond(url)?;
        let total = bytes.len() as u64;
        sink.write_all(&bytes)?;
        observer.on_progress(Progress::new(total, Some(total)));
        observer.on_complete(Progress::new(total, Some(total)));
        Ok(total)
    }
}

/// Builds a release-level `maven-metadata.xml` listing `versions` in order.
#[must_use]
pub fn release_metadata_xml(group_id: &str, artifact_id: &str, versions: &[&str]) -> String {
    let entries: String = versions
        .iter()
        .map(|version| format!("      <version>{version}</version>\n"))
        .collect();
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<metadata>\n",
            "  <groupId>{group}</groupId>\n",
            "  <artifactId>{artifact}</artifactId>\n",
            "  <versioning>\n",
            "    <versions>\n",
            "{entries}",
            "    </versions>\n",
            "    <lastUpdated>20130101120000</lastUpdated>\n",
            "  </versioning>\n",
            "</metadata>\n"
        ),
        group = group_id,
        artifact = artifact_id,
        entries = entries,
    )
}

/// One `<snapshotVersion>` entry: extension, optional classifier, value.
pub type SnapshotEntry<'a> = (&'a str, Option<&'a str>, &'a str);

/// Builds a version-level `maven-metadata.xml` with the given snapshot entries.
#[must_use]
pub fn snapshot_metadata_xml(version: &str, entries: &[SnapshotEntry<'_>]) -> String {
    let body: String = entries
        .iter()
        .map(|(extension, classifier, value)| {
            let classifier_tag = classifier
                .map(|c| format!("        <classifier>{c}</classifier>\n"))
                .unwrap_or_default();
            format!(
                concat!(
                    "      <snapshotVersion>\n",
                    "{classifier}",
                    "        <extension>{extension}</extension>\n",
                    "        <value>{value}</value>\n",
                    "        <updated>20130101120000</updated>\n",
                    "      </snapshotVersion>\n"
                ),
                classifier = classifier_tag,
                extension = extension,
                value = value,
            )
        })
        .collect();
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<metadata modelVersion=\"1.1.0\">\n",
            "  <version>{version}</version>\n",
            "  <versioning>\n",
            "    <snapshot>\n",
            "      <timestamp>20130101.120000</timestamp>\n",
            "      <buildNumber>3</buildNumber>\n",
            "    </snapshot>\n",
            "    <snapshotVersions>\n",
            "{body}",
            "    </snapshotVersions>\n",
            "  </versioning>\n",
            "</metadata>\n"
        ),
        version = version,
        body = body,
    )
}
