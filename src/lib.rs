//! Typed, environment-driven settings flattened into the plain top-level
//! values a web framework's settings module exports.
//!
//! Settings records describe themselves as a [`Node`] through the
//! [`Settings`] trait. [`flatten`] resolves nested nodes, maps, lists and
//! secrets into a [`FlatSettings`] map, and the caller exports each entry.
//! Database URLs are turned into connection maps by the [`dsn`] module.

pub mod config;
pub mod dsn;
mod error;
pub mod flatten;
pub mod settings;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use flatten::{flatten, flatten_node, FlatSettings, FlatValue};
pub use settings::{Node, NodeBuilder, Secret, Settings, Value};
