use scour_config::ScourConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn loads_file_with_env_token() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "0.1"
search:
  auth_token: "${QIITA_TOKEN}"
  per_page: 30
  timeout_secs: 5
"#;
    let p = write_yaml(&tmp, "scour.yaml", file_yaml);

    temp_env::with_var("QIITA_TOKEN", Some("env-supplied"), || {
        let config = ScourConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load search config");

        assert_eq!(config.search.auth_token, "env-supplied");
        assert_eq!(config.search.per_page, 30);
        assert_eq!(config.search.timeout_secs, 5);
        assert_eq!(config.search.base_url, "https://qiita.com");
    });
}

#[test]
#[serial]
fn defaults_fill_omitted_fields() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "scour.yaml", "search:\n  auth_token: \"abc\"\n");

    let config = ScourConfigLoader::new().with_file(&p).load().unwrap();
    assert_eq!(config.search.per_page, 100);
    assert_eq!(config.search.timeout_secs, 15);
    assert!(config.version.is_none());
}

#[test]
#[serial]
fn missing_token_is_an_error() {
    let err = ScourConfigLoader::new()
        .with_yaml_str("search:\n  per_page: 10\n")
        .load();
    assert!(err.is_err());
}
