//! Configuration loading from TOML files, `.env` files and the environment.

mod builder;
mod env;
mod error;
mod file;
mod merge;

pub use builder::Config;
pub use error::ConfigError;
