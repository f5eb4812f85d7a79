//! The in-memory config tree and path-addressed access into it.
//!
//! A [`Node`] is a `serde_json::Value`: scalars, ordered lists, and maps whose
//! keys keep document order. Every format engine parses into this tree and
//! renders from it, so keys and transformers never see format-specific types.
//!
//! Lookups never fail: a path that leads nowhere resolves to a shared `Null`
//! node, which readers treat as "missing". Mutable lookups create whatever
//! structure is needed to reach the path, as long as it doesn't leave holes
//! in a list.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::types::Segment;

/// A value in the config tree.
pub type Node = Value;

static NULL: Node = Node::Null;

/// Resolve `path` below `root`. Any miss yields a `Null` node.
///
/// An index segment that meets a map looks up the key spelled by the index,
/// so `years.2024` finds the entry `2024` of a map.
pub fn node_at<'a>(root: &'a Node, path: &[Segment]) -> &'a Node {
    path.iter()
        .try_fold(root, child)
        .unwrap_or(&NULL)
}

fn child<'a>(node: &'a Node, segment: &Segment) -> Option<&'a Node> {
    match (node, segment) {
        (Node::Object(map), Segment::Key(key)) => map.get(key),
        (Node::Object(map), Segment::Index(index)) => map.get(&index.to_string()),
        (Node::Array(items), Segment::Index(index)) => items.get(*index),
        _ => None,
    }
}

/// Resolve `path` below `root`, creating intermediate maps and lists as needed.
///
/// A scalar standing where a map or list is required is replaced. Lists only
/// grow by one element at a time: an index may address an existing element or
/// the position just past the end. Anything further fails with
/// [`ConfigError::InvalidValue`] and leaves the tree untouched.
pub fn node_at_mut<'a>(root: &'a mut Node, path: &[Segment]) -> Result<&'a mut Node, ConfigError> {
    check_reachable(root, path).map_err(|reason| ConfigError::InvalidValue {
        key: dotted(path),
        reason,
    })?;
    let mut current = root;
    for segment in path {
        current = child_mut(current, segment);
    }
    Ok(current)
}

fn check_reachable(root: &Node, path: &[Segment]) -> Result<(), String> {
    let mut current = Some(root);
    for segment in path {
        current = match (current, segment) {
            (Some(Node::Array(items)), Segment::Index(index)) if *index > items.len() => {
                return Err(format!(
                    "index {index} is past the end of a list of {} items",
                    items.len()
                ));
            }
            (Some(node @ (Node::Object(_) | Node::Array(_))), _) => child(node, segment),
            (_, Segment::Index(index)) if *index > 0 => {
                return Err(format!("index {index} is past the end of an empty list"));
            }
            _ => None,
        };
    }
    Ok(())
}

/// One step of [`node_at_mut`]; `check_reachable` has vetted the index.
fn child_mut<'a>(node: &'a mut Node, segment: &Segment) -> &'a mut Node {
    match segment {
        // Indexing an object by a missing key inserts a `Null` child.
        Segment::Index(index) if node.is_object() => &mut node[index.to_string().as_str()],
        Segment::Key(key) => {
            if !node.is_object() {
                *node = Node::Object(Map::new());
            }
            &mut node[key.as_str()]
        }
        Segment::Index(index) => {
            if !node.is_array() {
                *node = Node::Array(Vec::new());
            }
            if let Node::Array(items) = node
                && items.len() == *index
            {
                items.push(Node::Null);
            }
            &mut node[*index]
        }
    }
}

/// Detach the node at `path`, keeping the order of its siblings.
pub fn remove_at(root: &mut Node, path: &[Segment]) -> Option<Node> {
    let (last, parents) = path.split_last()?;
    let mut current = root;
    for segment in parents {
        current = match (current, segment) {
            (Node::Object(map), Segment::Key(key)) => map.get_mut(key)?,
            (Node::Object(map), Segment::Index(index)) => map.get_mut(&index.to_string())?,
            (Node::Array(items), Segment::Index(index)) => items.get_mut(*index)?,
            _ => return None,
        };
    }
    match (current, last) {
        (Node::Object(map), Segment::Key(key)) => map.shift_remove(key),
        (Node::Object(map), Segment::Index(index)) => map.shift_remove(&index.to_string()),
        (Node::Array(items), Segment::Index(index)) => {
            (*index < items.len()).then(|| items.remove(*index))
        }
        _ => None,
    }
}

fn dotted(path: &[Segment]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Short name of a node's shape, for error messages.
pub fn kind(node: &Node) -> &'static str {
    match node {
        Node::Null => "null",
        Node::Bool(_) => "boolean",
        Node::Number(_) => "number",
        Node::String(_) => "string",
        Node::Array(_) => "list",
        Node::Object(_) => "map",
    }
}

/// Convert a node into `T` through serde.
pub fn coerce<T: DeserializeOwned>(node: &Node) -> Result<T, serde_json::Error> {
    T::deserialize(node)
}

/// Flatten the tree into dotted-path/leaf pairs, in document order.
///
/// Lists are leaves; maps are recursed into. Empty maps produce no entries.
pub fn flatten(root: &Node) -> Vec<(String, Node)> {
    let mut out = Vec::new();
    if let Node::Object(map) = root {
        flatten_into(map, "", &mut out);
    } else if !root.is_null() {
        out.push((String::new(), root.clone()));
    }
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, Node)>) {
    for (key, value) in map {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Node::Object(child) => flatten_into(child, &dotted, out),
            leaf => out.push((dotted, leaf.clone())),
        }
    }
}
