//! Format engines: text to [`Node`] and back, one arm per [`ConfigFormat`].
//!
//! Parsing goes through each format's own value type first (`toml::Value`,
//! `serde_yaml::Value`) and is then converted, so every format yields the same
//! tree shape: string map keys, i64/u64/f64 numbers, and no format-specific
//! scalars (TOML datetimes and YAML tags are flattened to plain values).
//!
//! Blank files, and files whose whole content is `null`, parse to an empty map.

use serde_json::{Map, Number};

use crate::error::FormatError;
use crate::node::Node;
use crate::persist;
use crate::types::ConfigFormat;

impl ConfigFormat {
    /// Parse a document into a node tree.
    pub fn parse(&self, text: &str) -> Result<Node, FormatError> {
        if text.trim().is_empty() {
            return Ok(Node::Object(Map::new()));
        }
        let node = match self {
            ConfigFormat::Toml => {
                let table: toml::Table = toml::from_str(text)?;
                toml_to_node(toml::Value::Table(table))
            }
            ConfigFormat::Json | ConfigFormat::JsonCompact => serde_json::from_str(text)?,
            ConfigFormat::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(text)?;
                yaml_to_node(value)
            }
        };
        Ok(match node {
            Node::Null => Node::Object(Map::new()),
            other => other,
        })
    }

    /// Render a node tree as a document.
    ///
    /// `previous` is the text the tree was last loaded from or saved as; the
    /// TOML engine patches it so untouched comments and formatting survive.
    pub fn render(&self, root: &Node, previous: &str) -> Result<String, FormatError> {
        match self {
            ConfigFormat::Toml => persist::render_toml(root, previous),
            ConfigFormat::Json => {
                let mut out = serde_json::to_string_pretty(root)?;
                out.push('\n');
                Ok(out)
            }
            ConfigFormat::JsonCompact => Ok(serde_json::to_string(root)?),
            ConfigFormat::Yaml => Ok(serde_yaml::to_string(root)?),
        }
    }
}

fn toml_to_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::String(s),
        toml::Value::Integer(i) => Node::from(i),
        toml::Value::Float(f) => float_node(f),
        toml::Value::Boolean(b) => Node::Bool(b),
        toml::Value::Datetime(dt) => Node::String(dt.to_string()),
        toml::Value::Array(items) => Node::Array(items.into_iter().map(toml_to_node).collect()),
        toml::Value::Table(table) => Node::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_node(value)))
                .collect(),
        ),
    }
}

fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::from(i)
            } else if let Some(u) = n.as_u64() {
                Node::from(u)
            } else {
                n.as_f64().map_or(Node::Null, float_node)
            }
        }
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(items) => {
            Node::Array(items.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Node::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (yaml_key(key), yaml_to_node(value)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}

/// Map keys are strings in the node tree; YAML allows any scalar.
fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Non-finite floats have no JSON representation and become null.
pub(crate) fn float_node(f: f64) -> Node {
    Number::from_f64(f).map_or(Node::Null, Node::Number)
}
