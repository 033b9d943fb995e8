//! `maven-fetch` CLI entrypoint.
//!
//! Resolves one Maven coordinate and downloads it, skipping the transfer
//! when the local file already matches the repository checksum.

use clap::Parser;
use maven_fetch::checksum::IntegrityChecker;
use maven_fetch::cli::Cli;
use maven_fetch::config::FetchConfig;
use maven_fetch::downloader::{DownloadOutcome, Downloader};
use maven_fetch::metadata::HttpMetadataClient;
use maven_fetch::output::{ambiguity_message, failure_message, outcome_message, write_stderr_line};
use maven_fetch::progress::{NoProgress, WriterProgress};
use maven_fetch::resolver::ArtifactResolver;
use maven_fetch::transport::{HttpTransport, Transport};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = run(&cli, &mut stdout, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Load configuration, build the HTTP transport and fetch.
fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> i32 {
    let config = match FetchConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_overrides(cli.overrides()),
        Err(err) => {
            write_stderr_line(stderr, failure_message(&cli.coordinate, &err));
            return 1;
        }
    };
    let transport = HttpTransport::new(&config.transport_config());
    run_with(cli, &config, &transport, stdout, stderr)
}

/// Fetch using an injected transport and return the process exit code.
fn run_with(
    cli: &Cli,
    config: &FetchConfig,
    transport: &dyn Transport,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    let client = HttpMetadataClient::new(transport, config.repository_url.clone());
    let downloader = Downloader::new(
        ArtifactResolver::new(&client, config.repository_url.clone())
            .with_tie_break(config.snapshot_policy),
        IntegrityChecker::new(transport, config.checksum),
        transport,
    );

    if cli.print_url {
        return print_url(cli, &downloader, stdout, stderr);
    }

    let outcome = if cli.quiet {
        downloader.download(&cli.coordinate, cli.output.as_deref(), &mut NoProgress)
    } else {
        write_stderr_line(stderr, format!("Fetching {}...", cli.coordinate));
        let mut progress = WriterProgress::new(&mut *stderr);
        let outcome = downloader.download(&cli.coordinate, cli.output.as_deref(), &mut progress);
        progress.finish_line();
        outcome
    };
    report_outcome(&outcome, cli.quiet, stderr)
}

fn print_url(
    cli: &Cli,
    downloader: &Downloader<'_>,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> i32 {
    match downloader.resolve_only(&cli.coordinate) {
        Ok(artifact) => {
            if let Some(warning) = ambiguity_message(&artifact).filter(|_| !cli.quiet) {
                write_stderr_line(stderr, warning);
            }
            if writeln!(stdout, "{}", artifact.url()).is_err() {
                return 1;
            }
            0
        }
        Err(err) => {
            write_stderr_line(stderr, failure_message(&cli.coordinate, &err));
            1
        }
    }
}

fn report_outcome(outcome: &DownloadOutcome, quiet: bool, stderr: &mut dyn Write) -> i32 {
    if outcome.is_failure() {
        write_stderr_line(stderr, outcome_message(outcome));
        return 1;
    }
    if !quiet {
        if let Some(warning) = outcome.artifact().and_then(ambiguity_message) {
            write_stderr_line(stderr, warning);
        }
        write_stderr_line(stderr, outcome_message(outcome));
    }
    0
}
