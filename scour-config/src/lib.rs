//! Loader for scour configuration with YAML + environment overlays.
//!
//! Credentials never live in source: the auth token is expected to arrive via
//! `${VAR}` expansion (typically `${QIITA_TOKEN}`) or a `SCOUR_`-prefixed
//! environment override.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct ScourConfig {
    pub version: Option<String>,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Static bearer credential for the search API.
    pub auth_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://qiita.com".into()
}
fn default_per_page() -> u32 {
    100
}
fn default_timeout_secs() -> u64 {
    15
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct ScourConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ScourConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScourConfigLoader {
    /// Start with sensible defaults: YAML file + `SCOUR_` env overrides.
    ///
    /// ```
    /// use scour_config::ScourConfigLoader;
    ///
    /// let config = ScourConfigLoader::new()
    ///     .with_yaml_str("search:\n  auth_token: \"abc\"")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.search.auth_token, "abc");
    /// assert_eq!(config.search.per_page, 100);
    /// assert_eq!(config.search.base_url, "https://qiita.com");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("SCOUR").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// `${VAR}` placeholders are expanded recursively (depth-capped) before
    /// the strongly typed config materialises.
    ///
    /// ```
    /// use scour_config::ScourConfigLoader;
    ///
    /// unsafe { std::env::set_var("DOC_QIITA_TOKEN", "from-env"); }
    ///
    /// let config = ScourConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// version: "1"
    /// search:
    ///   auth_token: "${DOC_QIITA_TOKEN}"
    ///   per_page: 50
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.search.auth_token, "from-env");
    /// assert_eq!(config.search.per_page, 50);
    ///
    /// unsafe { std::env::remove_var("DOC_QIITA_TOKEN"); }
    /// ```
    pub fn load(self) -> Result<ScourConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: ScourConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(typed)
    }
}
