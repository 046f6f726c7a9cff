//! Category index - category name → node types
//!
//! Built from the host registry on every query; nothing is cached, so the
//! index always matches the registry as it is right now.

use std::collections::HashMap;

use crate::host::NodeTypeRegistry;
use crate::types::NodeTypeId;

/// Mapping from category to the node types in that category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    /// Node types per category, in registry enumeration order
    entries: HashMap<String, Vec<NodeTypeId>>,
}

impl CategoryIndex {
    /// Build the index from the current registry contents.
    ///
    /// Types without a category label (or with an empty one) are left out.
    pub fn build(registry: &dyn NodeTypeRegistry) -> Self {
        let mut entries: HashMap<String, Vec<NodeTypeId>> = HashMap::new();
        for info in registry.node_types() {
            let Some(category) = info.category.filter(|c| !c.is_empty()) else {
                continue;
            };
            entries.entry(category).or_default().push(info.id);
        }

        tracing::debug!(categories = entries.len(), "built category index");
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    /// All category names, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Node types of a category in registry order.
    pub fn node_types(&self, category: &str) -> Option<&[NodeTypeId]> {
        self.entries.get(category).map(Vec::as_slice)
    }

    /// Node types of a category, sorted. This is the order nodes are
    /// instantiated and listed in. Empty for an unknown category.
    pub fn sorted_node_types(&self, category: &str) -> Vec<NodeTypeId> {
        let mut types = self
            .node_types(category)
            .map(<[NodeTypeId]>::to_vec)
            .unwrap_or_default();
        types.sort();
        types
    }
}

/// Case-insensitive substring filter over category names.
///
/// Keeps the input order; an empty query keeps everything.
pub fn filter_categories(categories: &[String], query: &str) -> Vec<String> {
    let query_lower = query.to_lowercase();
    categories
        .iter()
        .filter(|category| category.to_lowercase().contains(&query_lower))
        .cloned()
        .collect()
}
