//! Transformers turn a raw [`Node`] into a typed collection.
//!
//! A [`ConfigKey`](crate::ConfigKey) with a transformer hands the resolved node
//! to it instead of coercing the node directly. Transformers are stateless and
//! never mutate their input, so one instance can serve any number of keys and
//! threads. The [`transformers`] module has ready-made constants for the common
//! element types.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::error::TransformError;
use crate::node::{Node, coerce, kind};

/// Converts a node into `Self::Output`, or explains why it can't.
pub trait Transformer: Send + Sync {
    type Output;

    fn transform(&self, node: &Node) -> Result<Self::Output, TransformError>;
}

/// List-shaped node → `Vec<T>`, in document order.
pub struct ListTransformer<T>(PhantomData<fn() -> T>);

/// List-shaped node → `HashSet<T>`. Duplicates collapse.
pub struct SetTransformer<T>(PhantomData<fn() -> T>);

/// Map-shaped node → `HashMap<K, V>`. Keys are parsed with [`FromStr`];
/// if two keys parse to the same value the later one wins.
pub struct MapTransformer<K, V>(PhantomData<fn() -> (K, V)>);

/// Hands back the node itself, for keys that want the raw tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeTransformer;

// Manual impls: deriving would put bounds on the element types.
macro_rules! marker_impls {
    ($name:ident < $($param:ident),+ >) => {
        impl<$($param),+> $name<$($param),+> {
            pub const fn new() -> Self {
                Self(PhantomData)
            }
        }

        impl<$($param),+> Default for $name<$($param),+> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<$($param),+> Clone for $name<$($param),+> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<$($param),+> Copy for $name<$($param),+> {}

        impl<$($param),+> fmt::Debug for $name<$($param),+> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }
    };
}

marker_impls!(ListTransformer<T>);
marker_impls!(SetTransformer<T>);
marker_impls!(MapTransformer<K, V>);

fn list_children(node: &Node) -> Result<&[Node], TransformError> {
    node.as_array()
        .map(Vec::as_slice)
        .ok_or(TransformError::NotAList { found: kind(node) })
}

fn coerce_elements<T, C>(node: &Node) -> Result<C, TransformError>
where
    T: DeserializeOwned,
    C: FromIterator<T>,
{
    list_children(node)?
        .iter()
        .enumerate()
        .map(|(index, child)| {
            coerce::<T>(child).map_err(|source| TransformError::Element { index, source })
        })
        .collect()
}

impl<T: DeserializeOwned> Transformer for ListTransformer<T> {
    type Output = Vec<T>;

    fn transform(&self, node: &Node) -> Result<Vec<T>, TransformError> {
        coerce_elements::<T, _>(node)
    }
}

impl<T: DeserializeOwned + Eq + Hash> Transformer for SetTransformer<T> {
    type Output = HashSet<T>;

    fn transform(&self, node: &Node) -> Result<HashSet<T>, TransformError> {
        coerce_elements::<T, _>(node)
    }
}

impl<K, V> Transformer for MapTransformer<K, V>
where
    K: FromStr + Eq + Hash,
    K::Err: fmt::Display,
    V: DeserializeOwned,
{
    type Output = HashMap<K, V>;

    fn transform(&self, node: &Node) -> Result<HashMap<K, V>, TransformError> {
        let entries = node
            .as_object()
            .ok_or(TransformError::NotAMap { found: kind(node) })?;

        let mut out = HashMap::with_capacity(entries.len());
        for (key, value) in entries {
            let parsed_key = key.parse::<K>().map_err(|e| TransformError::EntryKey {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            let parsed_value = coerce::<V>(value).map_err(|source| TransformError::EntryValue {
                key: key.clone(),
                source,
            })?;
            out.insert(parsed_key, parsed_value);
        }
        Ok(out)
    }
}

impl Transformer for NodeTransformer {
    type Output = Node;

    fn transform(&self, node: &Node) -> Result<Node, TransformError> {
        Ok(node.clone())
    }
}

/// Ready-made transformers for the basic element types.
///
/// Floats have no set variant: `f32`/`f64` are neither `Eq` nor `Hash`.
pub mod transformers {
    use super::{ListTransformer, MapTransformer, NodeTransformer, SetTransformer};

    pub const STRING_LIST: ListTransformer<String> = ListTransformer::new();
    pub const BOOL_LIST: ListTransformer<bool> = ListTransformer::new();
    pub const I32_LIST: ListTransformer<i32> = ListTransformer::new();
    pub const I64_LIST: ListTransformer<i64> = ListTransformer::new();
    pub const F32_LIST: ListTransformer<f32> = ListTransformer::new();
    pub const F64_LIST: ListTransformer<f64> = ListTransformer::new();

    pub const STRING_SET: SetTransformer<String> = SetTransformer::new();
    pub const BOOL_SET: SetTransformer<bool> = SetTransformer::new();
    pub const I32_SET: SetTransformer<i32> = SetTransformer::new();
    pub const I64_SET: SetTransformer<i64> = SetTransformer::new();

    pub const STRING_MAP: MapTransformer<String, String> = MapTransformer::new();
    pub const BOOL_MAP: MapTransformer<String, bool> = MapTransformer::new();
    pub const I32_MAP: MapTransformer<String, i32> = MapTransformer::new();
    pub const I64_MAP: MapTransformer<String, i64> = MapTransformer::new();
    pub const F32_MAP: MapTransformer<String, f32> = MapTransformer::new();
    pub const F64_MAP: MapTransformer<String, f64> = MapTransformer::new();

    pub const NODE: NodeTransformer = NodeTransformer;
}
