use crate::config::ConfigError;
use crate::dsn::DsnError;
use thiserror::Error;

/// Top-level error type for the flatcfg library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database setting error: {0}")]
    Dsn(#[from] DsnError),

    #[error("duplicate settings field: {0}")]
    DuplicateField(String),
}
