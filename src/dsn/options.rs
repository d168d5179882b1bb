use std::collections::BTreeMap;

use super::DsnError;
use crate::settings::Value;

/// How long a database connection may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxAge {
    Seconds(i64),
    /// Connections are never closed for age.
    Unlimited,
}

impl Default for MaxAge {
    fn default() -> Self {
        MaxAge::Seconds(0)
    }
}

impl From<MaxAge> for Value {
    fn from(value: MaxAge) -> Self {
        match value {
            MaxAge::Seconds(s) => Value::Integer(s),
            MaxAge::Unlimited => Value::Null,
        }
    }
}

/// Per-field keyword options forwarded to the URL parser.
///
/// Only these six options exist; anything else attached to a field is
/// ignored by [`from_metadata`](Self::from_metadata).
///
/// ```
/// use flatcfg::dsn::DsnOptions;
///
/// let options = DsnOptions::new().conn_max_age(60).ssl_require(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DsnOptions {
    pub engine: Option<String>,
    pub conn_max_age: Option<MaxAge>,
    pub conn_health_checks: Option<bool>,
    pub disable_server_side_cursors: Option<bool>,
    pub ssl_require: Option<bool>,
    pub test_options: Option<BTreeMap<String, Value>>,
}

impl DsnOptions {
    /// Keys read by [`from_metadata`](Self::from_metadata).
    pub const ALLOWED_KEYS: [&'static str; 6] = [
        "engine",
        "conn_max_age",
        "conn_health_checks",
        "disable_server_side_cursors",
        "ssl_require",
        "test_options",
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the engine derived from the URL scheme.
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn conn_max_age(mut self, seconds: i64) -> Self {
        self.conn_max_age = Some(MaxAge::Seconds(seconds));
        self
    }

    pub fn persistent_connections(mut self) -> Self {
        self.conn_max_age = Some(MaxAge::Unlimited);
        self
    }

    pub fn conn_health_checks(mut self, enabled: bool) -> Self {
        self.conn_health_checks = Some(enabled);
        self
    }

    pub fn disable_server_side_cursors(mut self, disabled: bool) -> Self {
        self.disable_server_side_cursors = Some(disabled);
        self
    }

    pub fn ssl_require(mut self, required: bool) -> Self {
        self.ssl_require = Some(required);
        self
    }

    pub fn test_options(mut self, options: BTreeMap<String, Value>) -> Self {
        self.test_options = Some(options);
        self
    }

    /// Reads the allow-listed options out of a field's metadata table.
    ///
    /// Unknown keys are skipped. An allow-listed key holding the wrong type
    /// is an error.
    pub fn from_metadata(metadata: &toml::Table) -> Result<Self, DsnError> {
        let mut options = Self::new();

        if let Some(value) = metadata.get("engine") {
            options.engine = Some(expect_str("engine", value)?.to_string());
        }
        if let Some(value) = metadata.get("conn_max_age") {
            let seconds = value
                .as_integer()
                .ok_or_else(|| invalid("conn_max_age", "an integer"))?;
            options.conn_max_age = Some(MaxAge::Seconds(seconds));
        }
        if let Some(value) = metadata.get("conn_health_checks") {
            options.conn_health_checks = Some(expect_bool("conn_health_checks", value)?);
        }
        if let Some(value) = metadata.get("disable_server_side_cursors") {
            options.disable_server_side_cursors =
                Some(expect_bool("disable_server_side_cursors", value)?);
        }
        if let Some(value) = metadata.get("ssl_require") {
            options.ssl_require = Some(expect_bool("ssl_require", value)?);
        }
        if let Some(value) = metadata.get("test_options") {
            let table = value
                .as_table()
                .ok_or_else(|| invalid("test_options", "a table"))?;
            options.test_options = Some(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                    .collect(),
            );
        }

        Ok(options)
    }
}

fn invalid(key: &str, expected: &'static str) -> DsnError {
    DsnError::InvalidMetadata {
        key: key.to_string(),
        expected,
    }
}

fn expect_str<'a>(key: &str, value: &'a toml::Value) -> Result<&'a str, DsnError> {
    value.as_str().ok_or_else(|| invalid(key, "a string"))
}

fn expect_bool(key: &str, value: &toml::Value) -> Result<bool, DsnError> {
    value.as_bool().ok_or_else(|| invalid(key, "a boolean"))
}
