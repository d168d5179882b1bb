use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::env::{load_env_vars, Environment};
use super::file::{load_config_file, load_env_file};
use super::merge::{deep_merge, merge_at_path};
use super::ConfigError;
use crate::settings::Node;

/// A configuration source in the loading pipeline.
#[derive(Debug)]
enum ConfigSource {
    File { path: PathBuf, required: bool },
    EnvFile { path: PathBuf, required: bool },
    Env { prefix: String, separator: String },
    EnvVar { name: String, path: String },
}

/// Builder for loading settings from TOML files and the environment.
///
/// TOML files and env sources are merged in registration order, with later
/// sources overriding earlier ones. Nested tables are merged recursively;
/// other values (including arrays) are replaced entirely.
///
/// `.env` files registered with [`with_env_file`](Self::with_env_file) are
/// not layers of their own: their variables are visible to every env source
/// and lose to the real process environment.
///
/// ## Example
///
/// ```no_run
/// use flatcfg::Config;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct ProjectConfig {
///     debug: bool,
///     databases: Databases,
/// }
///
/// #[derive(Deserialize)]
/// struct Databases {
///     default: Option<String>,
/// }
///
/// let config: ProjectConfig = Config::builder()
///     .with_file("config/default.toml", true)
///     .with_env_file(".env", false)
///     .with_env("APP", "__")
///     .with_env_var("DATABASE_URL", "databases.default")
///     .build()?;
/// # Ok::<(), flatcfg::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    sources: Vec<ConfigSource>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(ConfigSource::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Adds a `.env` file whose `KEY=VALUE` pairs act as environment variables.
    ///
    /// The process environment is never modified. When several env files
    /// define the same key, the one registered last wins.
    pub fn with_env_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(ConfigSource::EnvFile {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Loads configuration from environment variables with the given prefix.
    ///
    /// Environment variables are mapped to config paths by:
    /// 1. Removing the prefix and separator
    /// 2. Splitting remaining segments on the separator
    /// 3. Converting path segments to lowercase
    ///
    /// Values are coerced from strings to the most specific type:
    /// integer, float, boolean, or string (fallback). An empty prefix reads
    /// every variable.
    pub fn with_env(mut self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.sources.push(ConfigSource::Env {
            prefix: prefix.into(),
            separator: separator.into(),
        });
        self
    }

    /// Maps a single environment variable to a dotted config path.
    ///
    /// The value is kept verbatim as a string, which suits URLs and secret
    /// keys. Unset variables are skipped.
    pub fn with_env_var(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.sources.push(ConfigSource::EnvVar {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    /// Loads and merges every source, then deserializes into `T`.
    pub fn build<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let value = toml::Value::Table(self.load()?);
        value.try_into().map_err(ConfigError::DeserializeError)
    }

    /// Loads and merges every source into an untyped [`Node`].
    pub fn build_node(self) -> Result<Node, ConfigError> {
        Ok(Node::from(self.load()?))
    }

    fn load(self) -> Result<toml::Table, ConfigError> {
        let mut environment = Environment::new();
        for source in &self.sources {
            if let ConfigSource::EnvFile { path, required } = source {
                if let Some(vars) = load_env_file(path, *required)? {
                    environment.overlay(vars);
                }
            }
        }
        let reads_env = self
            .sources
            .iter()
            .any(|s| matches!(s, ConfigSource::Env { .. } | ConfigSource::EnvVar { .. }));
        if reads_env {
            environment = environment.with_process_env();
        }

        let mut merged = toml::Table::new();

        for source in self.sources {
            match source {
                ConfigSource::File { path, required } => {
                    if let Some(table) = load_config_file(&path, required)? {
                        deep_merge(&mut merged, table);
                    }
                }
                ConfigSource::EnvFile { .. } => {}
                ConfigSource::Env { prefix, separator } => {
                    if separator.is_empty() {
                        return Err(ConfigError::EmptySeparator);
                    }
                    load_env_vars(&mut merged, &environment, &prefix, &separator);
                }
                ConfigSource::EnvVar { name, path } => {
                    let segments: Vec<String> = path.split('.').map(str::to_string).collect();
                    if segments.iter().any(String::is_empty) {
                        return Err(ConfigError::InvalidAliasPath { var: name, path });
                    }
                    if let Some(value) = environment.get(&name) {
                        log::debug!("Mapped env var {name} to '{path}'");
                        merge_at_path(&mut merged, &segments, toml::Value::String(value.to_string()));
                    }
                }
            }
        }

        Ok(merged)
    }
}
