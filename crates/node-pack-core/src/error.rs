//! Load faults
//!
//! Faults never surface to the user as failures. An aborting fault leaves
//! the UI untouched; a skipping fault drops a single node and the batch
//! carries on. Either way the fault is logged.

use thiserror::Error;

use crate::types::NodeTypeId;

/// Recoverable condition hit while loading a category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFault {
    #[error("No category selected")]
    NoCategorySelected,

    #[error("Category '{0}' not found in the registry")]
    UnknownCategory(String),

    #[error("No nodes found in category '{0}'")]
    EmptyCategory(String),

    /// The factory returned nothing for this type.
    #[error("Could not create node of type '{0}'")]
    NodeCreationFailed(NodeTypeId),
}

impl LoadFault {
    /// Whether the fault stops the whole load (as opposed to one node).
    pub fn is_abort(&self) -> bool {
        !matches!(self, LoadFault::NodeCreationFailed(_))
    }
}
