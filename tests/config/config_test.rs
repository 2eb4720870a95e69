//! Coverage for config parsing and path resolution.

use std::path::Path;

use turnbridge::config::{config_dir, load_config, load_config_or_default, Config};
use turnbridge::Platform;

#[test]
fn default_values() {
    let config = Config::default();
    assert_eq!(config.logging.level, "info");
    assert!(config.output.pretty);
    assert!(config.platform.default.is_none());
}

#[test]
fn config_dir_resolves() {
    let dir = config_dir();
    assert!(dir.is_ok());
    let path = match dir {
        Ok(path) => path,
        Err(err) => panic!("config dir should resolve: {err}"),
    };
    assert!(path.ends_with(".turnbridge"));
}

#[test]
fn parse_full_config() {
    let toml_str = r#"
[logging]
level = "debug"

[output]
pretty = false

[platform]
default = "google-action"
"#;
    let config = match toml::from_str::<Config>(toml_str) {
        Ok(config) => config,
        Err(err) => panic!("full config should parse: {err}"),
    };
    assert_eq!(config.logging.level, "debug");
    assert!(!config.output.pretty);
    assert_eq!(config.platform.default, Some(Platform::GoogleAction));
}

#[test]
fn empty_config_uses_defaults() {
    let config = toml::from_str::<Config>("").expect("empty config should parse");
    assert_eq!(config.logging.level, "info");
    assert!(config.output.pretty);
}

#[test]
fn unknown_platform_is_rejected() {
    let toml_str = r#"
[platform]
default = "alexa"
"#;
    assert!(toml::from_str::<Config>(toml_str).is_err());
}

#[test]
fn load_config_reads_file() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[output]\npretty = false\n").expect("should write config");

    let config = load_config(&path).expect("config should load");
    assert!(!config.output.pretty);
}

#[test]
fn load_config_missing_file_is_error() {
    let result = load_config(Path::new("/nonexistent/turnbridge/config.toml"));
    assert!(result.is_err());
}

#[test]
fn load_config_or_default_tolerates_missing_file() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let config = load_config_or_default(&tmp.path().join("absent.toml"))
        .expect("missing file means defaults");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn load_config_or_default_reports_bad_toml() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[logging\nlevel = ").expect("should write config");
    assert!(load_config_or_default(&path).is_err());
}
