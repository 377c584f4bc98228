//! Tests for loading settings files

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use status_fs::{ConfigStore, Error, Format, NormalizedPath};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    package: String,
    timeout_ms: u64,
}

#[rstest]
#[case("agent.toml", "package = \"wireless\"\ntimeout_ms = 5000\n")]
#[case("agent.json", r#"{"package": "wireless", "timeout_ms": 5000}"#)]
#[case("agent.yaml", "package: wireless\ntimeout_ms: 5000\n")]
fn test_load_detects_format_from_extension(#[case] name: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join(name);
    fs::write(&file, content).unwrap();

    let loaded: Sample = ConfigStore::new().load(&NormalizedPath::new(&file)).unwrap();

    assert_eq!(
        loaded,
        Sample {
            package: "wireless".into(),
            timeout_ms: 5000
        }
    );
}

#[test]
fn test_load_rejects_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("agent.ini");
    fs::write(&file, "package=wireless").unwrap();

    let result: Result<Sample, _> =
        ConfigStore::for_kind("agent config").load(&NormalizedPath::new(&file));

    assert!(matches!(
        result,
        Err(Error::UnsupportedFormat { kind: "agent config", ref extension, .. }) if extension == "ini"
    ));
}

#[test]
fn test_parse_error_names_the_file_kind() {
    let path = NormalizedPath::new("/etc/status/edits.json");

    let result: Result<Sample, Error> =
        ConfigStore::for_kind("edits file").parse(&path, r#"{"package": "wireless"}"#);

    let error = result.unwrap_err();
    assert!(matches!(
        error,
        Error::ConfigParse { kind: "edits file", ref format, .. } if format == "JSON"
    ));
    let message = error.to_string();
    assert!(message.starts_with("Failed to parse edits file /etc/status/edits.json as JSON"));
    assert!(message.contains("timeout_ms"));
}

#[rstest]
#[case("agent.toml", Some(Format::Toml))]
#[case("edits.JSON", Some(Format::Json))]
#[case("agent.yml", Some(Format::Yaml))]
#[case("agent.ini", None)]
#[case("agent", None)]
fn test_format_follows_extension(#[case] name: &str, #[case] expected: Option<Format>) {
    assert_eq!(Format::from_path(&NormalizedPath::new(name)), expected);
}

#[test]
fn test_missing_file_is_reported_as_not_found() {
    let path = NormalizedPath::new("/nonexistent/status/agent.toml");
    let result: Result<Sample, Error> = ConfigStore::new().load(&path);

    assert!(result.unwrap_err().is_not_found());
}
