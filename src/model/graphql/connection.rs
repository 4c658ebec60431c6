//! GraphQL connections: `{ "nodes": [...], <paging metadata> }`.
//!
//! A connection keeps the raw node objects until its children are first
//! requested, then builds them exactly once and caches the result.

use serde_json::{Map, Value};
use std::sync::OnceLock;

const NODES: &str = "nodes";
pub(crate) const NODE_CODE: &str = "code";
pub(crate) const NODE_NAME: &str = "name";

/// A node built from one JSON object of a connection.
pub trait GraphNode: Sized + PartialEq {
    fn from_json(object: &Map<String, Value>) -> Self;
}

/// A node identified by a stable `code` and display `name`.
pub trait KeyedNode: GraphNode {
    fn code(&self) -> &str;
    fn name(&self) -> &str;
}

pub(crate) fn str_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn opt_str_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct Connection<T> {
    raw_nodes: Vec<Map<String, Value>>,
    metadata: Map<String, Value>,
    nodes: OnceLock<Vec<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            raw_nodes: Vec::new(),
            metadata: Map::new(),
            nodes: OnceLock::new(),
        }
    }
}

impl<T: GraphNode> Connection<T> {
    /// Wraps the connection object stored under `key` in `parent`.
    ///
    /// A missing key, a non-object value or a missing `nodes` array all yield
    /// an empty connection.
    pub fn from_parent(parent: &Map<String, Value>, key: &str) -> Self {
        parent
            .get(key)
            .and_then(Value::as_object)
            .map(Self::from_object)
            .unwrap_or_default()
    }

    pub fn from_object(object: &Map<String, Value>) -> Self {
        let mut metadata = object.clone();
        let raw_nodes = match metadata.remove(NODES) {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        Self {
            raw_nodes,
            metadata,
            nodes: OnceLock::new(),
        }
    }

    /// Child nodes in server order, duplicates removed.
    pub fn nodes(&self) -> &[T] {
        self.nodes.get_or_init(|| {
            let mut nodes: Vec<T> = Vec::with_capacity(self.raw_nodes.len());
            for raw in &self.raw_nodes {
                let node = T::from_json(raw);
                if !nodes.contains(&node) {
                    nodes.push(node);
                }
            }
            nodes
        })
    }

    /// Everything in the connection object besides `nodes` (page info,
    /// counts, ...).
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_nodes.is_empty()
    }

    pub fn is_materialized(&self) -> bool {
        self.nodes.get().is_some()
    }
}

impl<T: KeyedNode> Connection<T> {
    pub fn node(&self, code: &str) -> Option<&T> {
        self.nodes().iter().find(|n| n.code() == code)
    }
}
