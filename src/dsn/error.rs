use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DsnError {
    #[error("field '{field}' is not a valid database url: {reason}")]
    InvalidUrl { field: String, reason: String },

    #[error("field '{field}' uses unsupported scheme '{scheme}', supported: {supported}")]
    UnsupportedScheme {
        field: String,
        scheme: String,
        supported: String,
    },

    #[error("database option '{key}' must be {expected}")]
    InvalidMetadata { key: String, expected: &'static str },
}
