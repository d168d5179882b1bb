use std::collections::BTreeMap;
use std::fmt;

use super::Value;
use crate::Error;

/// A typed settings record described as uniquely-named fields.
///
/// Fields may hold scalars, secrets, lists, maps or further nodes, so a
/// database group can carry its own replica group and so on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    fields: BTreeMap<String, Value>,
}

impl Node {
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl From<toml::Table> for Node {
    fn from(table: toml::Table) -> Self {
        Self {
            fields: table.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl From<BTreeMap<String, Value>> for Node {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Builder for a [`Node`].
///
/// Field names must be unique; [`build`](Self::build) reports the first
/// repeated name.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct NodeBuilder {
    fields: Vec<(String, Value)>,
}

impl NodeBuilder {
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<Node, Error> {
        let mut fields = BTreeMap::new();
        for (name, value) in self.fields {
            if fields.contains_key(&name) {
                return Err(Error::DuplicateField(name));
            }
            fields.insert(name, value);
        }
        Ok(Node { fields })
    }
}

/// Implemented by settings records that can describe themselves as a [`Node`].
///
/// ```
/// use flatcfg::{Node, Settings};
///
/// struct StaticSettings {
///     url: String,
///     root: String,
/// }
///
/// impl Settings for StaticSettings {
///     fn to_node(&self) -> Result<Node, flatcfg::Error> {
///         Node::builder()
///             .field("STATIC_URL", self.url.as_str())
///             .field("STATIC_ROOT", self.root.as_str())
///             .build()
///     }
/// }
/// ```
pub trait Settings {
    fn to_node(&self) -> Result<Node, Error>;
}

impl Settings for Node {
    fn to_node(&self) -> Result<Node, Error> {
        Ok(self.clone())
    }
}
