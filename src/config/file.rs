//! File-based configuration sources: TOML files and `.env` overlays.

use std::path::Path;

use super::ConfigError;

/// Loads and parses a TOML config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
pub(crate) fn load_config_file(
    path: &Path,
    required: bool,
) -> Result<Option<toml::Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::debug!("Loaded config file {}", path.display());
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                log::warn!("Optional config file {} not found, skipping", path.display());
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Reads `KEY=VALUE` pairs from a `.env` file without touching the process
/// environment.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
pub(crate) fn load_env_file(
    path: &Path,
    required: bool,
) -> Result<Option<Vec<(String, String)>>, ConfigError> {
    let env_file_error = |source| ConfigError::EnvFileError {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            if required {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            log::warn!("Optional env file {} not found, skipping", path.display());
            return Ok(None);
        }
        Err(e) => return Err(env_file_error(e)),
    };

    let vars = iter
        .collect::<Result<Vec<_>, _>>()
        .map_err(env_file_error)?;
    log::debug!("Loaded {} vars from env file {}", vars.len(), path.display());
    Ok(Some(vars))
}
