//! TOML persistence: write a node tree back into a TOML document while
//! preserving formatting.
//!
//! Uses `toml_edit` for comment-preserving edits. The previously loaded text is
//! parsed into a `DocumentMut` and brought in line with the tree key by key:
//! stale keys are dropped, changed values are replaced in place (keeping the
//! comments around them), unchanged values are not touched at all, and new keys
//! are appended. TOML has no null: null map entries are omitted, and a null list
//! element is a render error since dropping it would shift its neighbours.

use serde_json::Map;
use toml_edit::{Array, ArrayOfTables, DocumentMut, InlineTable, Item, Table, Value};

use crate::error::FormatError;
use crate::format::float_node;
use crate::node::{Node, kind};

/// Render `root` as TOML, patching `previous` so its comments survive.
///
/// Starts from an empty document when `previous` is blank or no longer parses.
pub fn render_toml(root: &Node, previous: &str) -> Result<String, FormatError> {
    let empty = Map::new();
    let map = match root {
        Node::Object(map) => map,
        Node::Null => &empty,
        other => {
            return Err(format!(
                "a TOML document needs a map at the root, found {}",
                kind(other)
            )
            .into());
        }
    };

    let mut doc: DocumentMut = previous.parse().unwrap_or_else(|_| DocumentMut::new());
    sync_table(doc.as_table_mut(), map)?;
    Ok(doc.to_string())
}

fn sync_table(table: &mut Table, map: &Map<String, Node>) -> Result<(), FormatError> {
    let stale: Vec<String> = table
        .iter()
        .filter(|(key, _)| map.get(*key).is_none_or(Node::is_null))
        .map(|(key, _)| key.to_string())
        .collect();
    for key in stale {
        table.remove(&key);
    }

    for (key, node) in map {
        match node {
            Node::Null => {}
            Node::Object(child) => match table.get_mut(key) {
                Some(Item::Table(existing)) => sync_table(existing, child)?,
                Some(Item::Value(existing)) if existing.is_inline_table() => {
                    replace_value(existing, node)?;
                }
                _ => {
                    let mut fresh = Table::new();
                    sync_table(&mut fresh, child)?;
                    table.insert(key, Item::Table(fresh));
                }
            },
            Node::Array(items) if is_table_array(table.get(key), items) => {
                let mut tables = ArrayOfTables::new();
                for item in items {
                    let mut fresh = Table::new();
                    if let Node::Object(child) = item {
                        sync_table(&mut fresh, child)?;
                    }
                    tables.push(fresh);
                }
                table.insert(key, Item::ArrayOfTables(tables));
            }
            _ => match table.get_mut(key).and_then(Item::as_value_mut) {
                Some(existing) => replace_value(existing, node)?,
                None => {
                    table.insert(key, Item::Value(to_toml_value(node)?));
                }
            },
        }
    }
    Ok(())
}

/// Arrays of maps keep the `[[name]]` style only if the file already used it.
fn is_table_array(existing: Option<&Item>, items: &[Node]) -> bool {
    matches!(existing, Some(Item::ArrayOfTables(_))) && items.iter().all(Node::is_object)
}

/// Replace `existing` with `node` unless they already agree, keeping the
/// surrounding comments and whitespace.
fn replace_value(existing: &mut Value, node: &Node) -> Result<(), FormatError> {
    if edit_value_to_node(existing) == *node {
        return Ok(());
    }
    let decor = existing.decor().clone();
    *existing = to_toml_value(node)?;
    *existing.decor_mut() = decor;
    Ok(())
}

fn to_toml_value(node: &Node) -> Result<Value, FormatError> {
    Ok(match node {
        Node::Null => return Err("TOML cannot represent a null value".into()),
        Node::Bool(b) => Value::from(*b),
        Node::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                Value::from(f)
            } else {
                return Err(format!("integer {n} is out of range for TOML").into());
            }
        }
        Node::String(s) => Value::from(s.as_str()),
        Node::Array(items) => {
            let mut array = Array::new();
            for item in items {
                if item.is_null() {
                    return Err("TOML cannot represent null list elements".into());
                }
                array.push(to_toml_value(item)?);
            }
            Value::Array(array)
        }
        Node::Object(map) => {
            let mut inline = InlineTable::new();
            for (key, child) in map.iter().filter(|(_, child)| !child.is_null()) {
                inline.insert(key.as_str(), to_toml_value(child)?);
            }
            Value::InlineTable(inline)
        }
    })
}

fn edit_value_to_node(value: &Value) -> Node {
    match value {
        Value::String(s) => Node::String(s.value().clone()),
        Value::Integer(i) => Node::from(*i.value()),
        Value::Float(f) => float_node(*f.value()),
        Value::Boolean(b) => Node::Bool(*b.value()),
        Value::Datetime(dt) => Node::String(dt.value().to_string()),
        Value::Array(array) => Node::Array(array.iter().map(edit_value_to_node).collect()),
        Value::InlineTable(inline) => Node::Object(
            inline
                .iter()
                .map(|(key, value)| (key.to_string(), edit_value_to_node(value)))
                .collect(),
        ),
    }
}
