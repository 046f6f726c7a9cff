//! Summary of a category: node count and sorted listing

use serde::{Deserialize, Serialize};

use crate::category_index::CategoryIndex;
use crate::types::NodeTypeId;

/// What the sidebar shows for the selected category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub category: Option<String>,
    pub count: usize,
    /// Always sorted, whatever order the index holds them in
    pub node_types: Vec<NodeTypeId>,
}

impl Summary {
    /// Text of the count display
    pub fn count_label(&self) -> String {
        format!("Node Count: {}", self.count)
    }

    /// Text of the multi-line list display
    pub fn list_text(&self) -> String {
        let mut text = String::from("Nodes:\n");
        let names: Vec<&str> = self.node_types.iter().map(NodeTypeId::as_str).collect();
        text.push_str(&names.join("\n"));
        text
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Summarize a category. Unknown categories and no selection both give an
/// empty summary; this never fails.
pub fn summarize(category: Option<&str>, index: &CategoryIndex) -> Summary {
    let node_types = category
        .map(|c| index.sorted_node_types(c))
        .unwrap_or_default();

    Summary {
        category: category.map(str::to_string),
        count: node_types.len(),
        node_types,
    }
}
