//! Tests for CLI parsing and flag mapping.

use super::*;
use clap::error::ErrorKind;
use rstest::rstest;

#[test]
fn cli_parses_minimal_invocation() {
    let cli = Cli::parse_from(["maven-fetch", "org.apache.solr:solr:3.5.0"]);
    assert_eq!(cli.coordinate.group_id(), "org.apache.solr");
    assert_eq!(cli.coordinate.version(), Some("3.5.0"));
    assert!(cli.output.is_none());
    assert!(cli.repository.is_none());
    assert!(cli.checksum.is_none());
    assert!(!cli.print_url);
    assert!(!cli.quiet);
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.overrides(), ConfigOverrides::default());
}

#[test]
fn cli_parses_output_and_repository() {
    let cli = Cli::parse_from([
        "maven-fetch",
        "-r",
        "https://repo.test/maven2/",
        "org.demo:demo:war:1.0",
        "out/demo.war",
    ]);
    assert_eq!(cli.output, Some(Utf8PathBuf::from("out/demo.war")));
    assert_eq!(
        cli.repository.as_ref().map(RepositoryUrl::as_str),
        Some("https://repo.test/maven2")
    );
    assert_eq!(cli.coordinate.extension(), "war");
}

#[test]
fn cli_maps_flags_to_overrides() {
    let cli = Cli::parse_from([
        "maven-fetch",
        "--checksum",
        "sha256",
        "--timeout",
        "0",
        "--user-agent",
        "ci/2",
        "--snapshot-policy",
        "prefer-unclassified",
        "org.demo:demo:",
    ]);
    let overrides = cli.overrides();
    assert_eq!(overrides.checksum, Some(ChecksumAlgorithm::Sha256));
    assert_eq!(overrides.timeout_secs, Some(0));
    assert_eq!(overrides.user_agent.as_deref(), Some("ci/2"));
    assert_eq!(
        overrides.snapshot_policy,
        Some(SnapshotTieBreak::PreferUnclassified)
    );
    assert!(overrides.repository_url.is_none());
}

#[rstest]
#[case::too_few(&["maven-fetch", "org.demo:demo"])]
#[case::too_many(&["maven-fetch", "a:b:c:d:e:f"])]
#[case::empty_group(&["maven-fetch", ":demo:1.0"])]
#[case::bad_repository(&["maven-fetch", "-r", "ftp://repo.test", "g:a:1.0"])]
#[case::bad_checksum(&["maven-fetch", "--checksum", "crc32", "g:a:1.0"])]
#[case::bad_snapshot_policy(&["maven-fetch", "--snapshot-policy", "newest", "g:a:1.0"])]
fn cli_rejects_invalid_values(#[case] args: &[&str]) {
    let err = Cli::try_parse_from(args).expect_err("expected clap to reject the value");
    assert!(
        matches!(err.kind(), ErrorKind::ValueValidation | ErrorKind::InvalidValue),
        "unexpected error kind: {:?}",
        err.kind()
    );
}

#[test]
fn cli_requires_a_coordinate() {
    let err = Cli::try_parse_from(["maven-fetch"]).expect_err("coordinate is required");
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn cli_rejects_quiet_with_verbose() {
    let err = Cli::try_parse_from(["maven-fetch", "-q", "-v", "g:a:1.0"])
        .expect_err("expected clap to reject conflicting flags");
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[rstest]
#[case::default(&["maven-fetch", "g:a:1.0"], LevelFilter::Warn)]
#[case::quiet(&["maven-fetch", "-q", "g:a:1.0"], LevelFilter::Error)]
#[case::verbose(&["maven-fetch", "-v", "g:a:1.0"], LevelFilter::Debug)]
#[case::very_verbose(&["maven-fetch", "-vv", "g:a:1.0"], LevelFilter::Trace)]
fn cli_maps_verbosity_to_log_level(#[case] args: &[&str], #[case] expected: LevelFilter) {
    assert_eq!(Cli::parse_from(args).log_level(), expected);
}
