//! Flattening of settings into plain top-level values.
//!
//! The resulting [`FlatSettings`] is what a framework settings module exports:
//! one entry per top-level field, every nested node turned into a plain map
//! and every secret unwrapped.

use serde_json::{Map, Number};

use crate::settings::{Node, Settings, Value};
use crate::Error;

pub use serde_json::Value as FlatValue;

/// Fully resolved settings, keyed by top-level field name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatSettings {
    values: Map<String, FlatValue>,
}

impl FlatSettings {
    pub fn get(&self, name: &str) -> Option<&FlatValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FlatValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_map(self) -> Map<String, FlatValue> {
        self.values
    }

    /// Serializes the settings as a pretty-printed JSON object.
    ///
    /// The output contains unwrapped secrets.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.values)
    }
}

impl IntoIterator for FlatSettings {
    type Item = (String, FlatValue);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Flattens a settings record.
///
/// ```
/// use flatcfg::{flatten, Node, Secret};
///
/// let settings = Node::builder()
///     .field("DEBUG", false)
///     .field("SECRET_KEY", Secret::new("changeme"))
///     .build()?;
/// let flat = flatten(&settings)?;
/// assert_eq!(flat.get("SECRET_KEY").and_then(|v| v.as_str()), Some("changeme"));
/// # Ok::<(), flatcfg::Error>(())
/// ```
///
/// Fails only when `settings` cannot describe itself as a [`Node`].
pub fn flatten<S: Settings + ?Sized>(settings: &S) -> Result<FlatSettings, Error> {
    Ok(flatten_node(&settings.to_node()?))
}

/// Flattens an already built [`Node`].
pub fn flatten_node(node: &Node) -> FlatSettings {
    let values: Map<String, FlatValue> = node
        .iter()
        .map(|(name, value)| (name.to_string(), resolve(value)))
        .collect();
    log::debug!("Flattened {} top-level settings", values.len());
    FlatSettings { values }
}

fn resolve(value: &Value) -> FlatValue {
    match value {
        Value::Node(node) => FlatValue::Object(
            node.iter()
                .map(|(k, v)| (k.to_string(), resolve(v)))
                .collect(),
        ),
        Value::Map(map) => FlatValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve(v)))
                .collect(),
        ),
        Value::List(items) => FlatValue::Array(items.iter().map(resolve).collect()),
        Value::Secret(secret) => FlatValue::String(secret.expose().to_string()),
        Value::Null => FlatValue::Null,
        Value::Bool(b) => FlatValue::Bool(*b),
        Value::Integer(i) => FlatValue::Number((*i).into()),
        // NaN and infinities have no JSON form
        Value::Float(f) => Number::from_f64(*f).map_or(FlatValue::Null, FlatValue::Number),
        Value::String(s) => FlatValue::String(s.clone()),
    }
}
