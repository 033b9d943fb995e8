//! CLI argument definitions for `maven-fetch`.
//!
//! The coordinate and repository URL are parsed by clap through their
//! `FromStr` implementations, so malformed values are usage errors.

use crate::checksum::ChecksumAlgorithm;
use crate::config::ConfigOverrides;
use crate::coordinate::Coordinate;
use crate::repository_url::RepositoryUrl;
use crate::resolver::SnapshotTieBreak;
use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

/// Resolve and download a Maven artefact.
#[derive(Parser, Debug)]
#[command(name = "maven-fetch")]
#[command(version, about)]
#[command(long_about = concat!(
    "Resolve and download a Maven artefact.\n\n",
    "The coordinate is resolved against the repository's maven-metadata.xml ",
    "when needed: an empty version selects the latest release, and a SNAPSHOT ",
    "version selects the timestamped build. A local file whose digest already ",
    "matches the repository's checksum sidecar is left untouched.",
))]
#[command(after_help = concat!(
    "COORDINATES:\n",
    "  group:artifact:version\n",
    "  group:artifact:type:version\n",
    "  group:artifact:type:classifier:version\n\n",
    "EXAMPLES:\n",
    "  Download a release to ./solr.jar:\n",
    "    $ maven-fetch org.apache.solr:solr:3.5.0\n\n",
    "  Download the latest release of a war to a chosen file:\n",
    "    $ maven-fetch org.demo:webapp:war: build/webapp.war\n\n",
    "  Print the resolved URL of a snapshot without downloading:\n",
    "    $ maven-fetch --print-url org.demo:demo:1.0-SNAPSHOT\n\n",
    "CONFIGURATION:\n",
    "  Defaults are read from maven-fetch/config.toml in the platform\n",
    "  configuration directory, or from --config. Flags override the file.",
))]
pub struct Cli {
    /// Maven coordinate; leave the version empty to fetch the latest release.
    #[arg(value_name = "COORDINATE")]
    pub coordinate: Coordinate,

    /// Destination file [default: <artifactId>[-<classifier>].<type>].
    #[arg(value_name = "OUTPUT")]
    pub output: Option<Utf8PathBuf>,

    /// Repository base URL [default: Maven Central].
    #[arg(short = 'r', long = "repository", value_name = "URL")]
    pub repository: Option<RepositoryUrl>,

    /// Digest used to decide whether the local file is current [default: md5].
    #[arg(long, value_enum, value_name = "ALGO")]
    pub checksum: Option<ChecksumAlgorithm>,

    /// How to pick between several matching snapshot entries
    /// [default: first-in-document-order].
    #[arg(long, value_enum, value_name = "POLICY")]
    pub snapshot_policy: Option<SnapshotTieBreak>,

    /// Per-request timeout in seconds; 0 waits indefinitely [default: 60].
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Value of the User-Agent header.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Read configuration from this file instead of the default location.
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Print the resolved artefact URL and exit without downloading.
    #[arg(long)]
    pub print_url: bool,

    /// Suppress progress and status output (errors still shown).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,
}

impl Cli {
    /// Configuration values supplied by flags.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            repository_url: self.repository.clone(),
            user_agent: self.user_agent.clone(),
            timeout_secs: self.timeout,
            checksum: self.checksum,
            snapshot_policy: self.snapshot_policy,
        }
    }

    /// Log level implied by `-q` and `-v`; `RUST_LOG` may still override it.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
