//! Configuration nodes and the values they hold.

mod node;
mod value;

pub use node::{Node, NodeBuilder, Settings};
pub use value::{Secret, Value};
