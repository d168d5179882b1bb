//! Environment-variable configuration sources.

use std::collections::BTreeMap;

use toml::{Table, Value};

use super::merge::merge_at_path;

/// A snapshot of environment variables: `.env` overlay values first, the
/// process environment on top.
#[derive(Debug, Clone, Default)]
pub(crate) struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds variables that the process environment can still override.
    pub(crate) fn overlay(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        self.vars.extend(vars);
    }

    /// Applies the process environment over everything added so far.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub(crate) fn with_process_env(mut self) -> Self {
        for (key, value) in std::env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    self.vars.insert(key, value);
                }
                (Ok(key), Err(_)) => {
                    log::warn!("Skipping env var {key}: value is not valid UTF-8");
                }
                (Err(key), _) => {
                    log::warn!("Skipping env var {}: name is not valid UTF-8", key.to_string_lossy());
                }
            }
        }
        self
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Merges every variable starting with `prefix` + `separator` into `table`.
///
/// The remainder of the name is split on `separator` and lower-cased to form
/// the config path. An empty prefix takes every variable.
pub(crate) fn load_env_vars(table: &mut Table, env: &Environment, prefix: &str, separator: &str) {
    let prefix_with_sep = format!("{prefix}{separator}");
    let mut count = 0;

    for (key, value) in env.iter() {
        let path_str = if prefix.is_empty() {
            Some(key)
        } else {
            key.strip_prefix(&prefix_with_sep)
        };
        let Some(path_str) = path_str else {
            continue;
        };
        if path_str.is_empty() {
            continue;
        }

        let path: Vec<String> = path_str
            .split(separator)
            .map(|s| s.to_lowercase())
            .collect();
        if path.iter().any(String::is_empty) {
            continue;
        }

        merge_at_path(table, &path, coerce_value(value));
        count += 1;
    }

    log::debug!("Loaded {count} env vars with prefix '{prefix}'");
}

/// Converts an env value to the most specific TOML type.
fn coerce_value(s: &str) -> Value {
    // Try boolean first (case-insensitive)
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    // Try integer (only if it looks like an integer: optional minus, then digits)
    if looks_like_integer(s) {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    // Try float (if contains decimal point)
    if s.contains('.') {
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
    }

    // Fallback to string
    Value::String(s.to_string())
}

fn looks_like_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let mut env = Environment::new();
        env.overlay(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        env
    }

    #[test]
    fn test_prefixed_nested_paths() {
        let env = env(&[
            ("APP__DEBUG", "true"),
            ("APP__DATABASE__PORT", "5432"),
            ("APP__DATABASE__HOST", "db.internal"),
            ("OTHER__DEBUG", "false"),
        ]);
        let mut table = Table::new();
        load_env_vars(&mut table, &env, "APP", "__");

        assert_eq!(table["debug"].as_bool(), Some(true));
        assert_eq!(table["database"]["port"].as_integer(), Some(5432));
        assert_eq!(table["database"]["host"].as_str(), Some("db.internal"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_segments_skipped() {
        let env = env(&[("APP__", "x"), ("APP____X", "y")]);
        let mut table = Table::new();
        load_env_vars(&mut table, &env, "APP", "__");
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_prefix_takes_everything() {
        let env = env(&[("LANGUAGE_CODE", "en-us")]);
        let mut table = Table::new();
        load_env_vars(&mut table, &env, "", "__");
        assert_eq!(table["language_code"].as_str(), Some("en-us"));
    }

    #[test]
    fn test_overlay_later_wins() {
        let mut env = env(&[("KEY", "from-file")]);
        env.overlay([("KEY".to_string(), "from-process".to_string())]);
        assert_eq!(env.get("KEY"), Some("from-process"));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_env_skips_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var("FLATCFG_TEST_ENV_BAD_BYTES", OsStr::from_bytes(b"\xff\xfe"));
        std::env::set_var("FLATCFG_TEST_ENV_GOOD", "ok");
        let env = Environment::new().with_process_env();
        std::env::remove_var("FLATCFG_TEST_ENV_BAD_BYTES");
        std::env::remove_var("FLATCFG_TEST_ENV_GOOD");

        assert_eq!(env.get("FLATCFG_TEST_ENV_BAD_BYTES"), None);
        assert_eq!(env.get("FLATCFG_TEST_ENV_GOOD"), Some("ok"));
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value("TRUE"), Value::Boolean(true));
        assert_eq!(coerce_value("-42"), Value::Integer(-42));
        assert_eq!(coerce_value("0.25"), Value::Float(0.25));
        assert_eq!(coerce_value("1.2.3"), Value::String("1.2.3".into()));
        assert_eq!(coerce_value("postgres://h/db"), Value::String("postgres://h/db".into()));
    }
}
