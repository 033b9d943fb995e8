//! User-facing status messages.
//!
//! The binary writes these to stderr; the library only formats them so the
//! wording can be tested without a terminal.

use crate::coordinate::Coordinate;
use crate::downloader::DownloadOutcome;
use crate::error::FetchError;
use crate::resolver::ResolvedArtifact;
use std::io::Write;

/// Write one line, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort output; ignore write failures.
    }
}

/// Describe a failed fetch: the coordinate, the stage and the cause chain.
///
/// # Example
///
/// ```
/// use maven_fetch::coordinate::Coordinate;
/// use maven_fetch::error::FetchError;
/// use maven_fetch::output::failure_message;
///
/// let coordinate: Coordinate = "org.demo:demo:".parse().unwrap();
/// let err = FetchError::NoVersionsAvailable { coordinate: coordinate.to_string() };
/// assert_eq!(
///     failure_message(&coordinate, &err),
///     "failed to fetch org.demo:demo: during version resolution: \
///      no versions of org.demo:demo: are available"
/// );
/// ```
#[must_use]
pub fn failure_message(coordinate: &Coordinate, error: &FetchError) -> String {
    format!(
        "failed to fetch {coordinate} during {}: {}",
        error.stage(),
        error.chain()
    )
}

/// One-line summary of a download outcome.
#[must_use]
pub fn outcome_message(outcome: &DownloadOutcome) -> String {
    match outcome {
        DownloadOutcome::Skipped { artifact, path } => {
            format!("{path} is up to date with {}", artifact.url())
        }
        DownloadOutcome::Downloaded {
            artifact,
            path,
            bytes,
        } => format!("Downloaded {} to {path} ({bytes} bytes)", artifact.url()),
        DownloadOutcome::Failed { coordinate, error } => failure_message(coordinate, error),
    }
}

/// Warning line for an ambiguous snapshot match, if there was one.
#[must_use]
pub fn ambiguity_message(artifact: &ResolvedArtifact) -> Option<String> {
    artifact
        .ambiguity()
        .map(|notice| format!("warning: {}: {notice}", artifact.coordinate()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    #[test]
    fn write_stderr_line_appends_newline() {
        let mut buffer = Vec::new();
        write_stderr_line(&mut buffer, "hello");
        assert_eq!(buffer, b"hello\n");
    }

    #[test]
    fn failure_message_names_transfer_stage_and_cause() {
        let coordinate = Coordinate::parse("org.demo:demo:1.0").expect("valid coordinate");
        let outcome = DownloadOutcome::Failed {
            coordinate,
            error: FetchError::TransferFailure {
                url: "https://repo.test/demo-1.0.jar".to_owned(),
                source: TransportError::Truncated {
                    url: "https://repo.test/demo-1.0.jar".to_owned(),
                    expected: 10,
                    received: 4,
                },
            },
        };

        let message = outcome_message(&outcome);
        assert!(message.starts_with("failed to fetch org.demo:demo:1.0 during transfer: "));
        assert!(message.contains("transfer failed for https://repo.test/demo-1.0.jar"));
    }
}
