//! Shared identifiers and registry metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a registered node type, unique within the host registry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeTypeId(String);

impl NodeTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeTypeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeTypeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One registry entry as seen by the category index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTypeInfo {
    pub id: NodeTypeId,
    /// Category label from the type's metadata. Types without one can't be selected.
    #[serde(default)]
    pub category: Option<String>,
}

impl NodeTypeInfo {
    pub fn new(id: impl Into<NodeTypeId>, category: Option<&str>) -> Self {
        Self {
            id: id.into(),
            category: category.map(str::to_string),
        }
    }
}

/// Opaque handle to a node instance owned by the host graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(pub u64);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
