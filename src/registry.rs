//! YAML-backed node type registry
//!
//! Stands in for an editor's registry in the demo app and the CLI:
//!
//! ```yaml
//! node_types:
//!   - id: LoadImage
//!     category: Image Loaders
//!     title: Load Image
//!     size: [220, 120]
//!   - id: PreviewImage
//!     category: Image Loaders
//!     hook: true
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use node_pack_core::{NodeInstance, NodeTypeId, NodeTypeInfo, NodeTypeRegistry};

/// Node title bar height
pub const TITLE_HEIGHT: f32 = 30.0;
/// Height added by one widget row
pub const WIDGET_HEIGHT: f32 = 20.0;
const MIN_WIDTH: f32 = 140.0;
const CHAR_WIDTH: f32 = 7.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("node type with empty id")]
    EmptyId,
    #[error("duplicate node type: {0}")]
    DuplicateId(String),
    #[error("node type {id}: size must be finite and positive, got [{width}, {height}]")]
    InvalidSize { id: String, width: f32, height: f32 },
}

/// Checks that depend on the entry alone; duplicates are checked by the caller.
fn validate_entry(entry: &RegistryEntry) -> Result<(), RegistryError> {
    if entry.id.is_empty() {
        return Err(RegistryError::EmptyId);
    }
    if let Some([width, height]) = entry.size {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(width) && valid(height)) {
            return Err(RegistryError::InvalidSize {
                id: entry.id.clone(),
                width,
                height,
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub id: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Display title; defaults to the id
    #[serde(default)]
    pub title: Option<String>,
    /// Rendered size; derived from the title when absent
    #[serde(default)]
    pub size: Option<[f32; 2]>,
    /// Node adds a widget row from its creation hook
    #[serde(default)]
    pub hook: bool,
}

impl RegistryEntry {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    pub fn size(&self) -> Vec2 {
        match self.size {
            Some([w, h]) => Vec2::new(w, h),
            None => {
                let chars = self.title().chars().count() as f32;
                let width = (chars * CHAR_WIDTH + 40.0).max(MIN_WIDTH);
                Vec2::new(width, TITLE_HEIGHT + WIDGET_HEIGHT)
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    node_types: Vec<RegistryEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct YamlRegistry {
    entries: Vec<RegistryEntry>,
}

impl YamlRegistry {
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            validate_entry(entry)?;
            if !seen.insert(entry.id.as_str()) {
                return Err(RegistryError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: RegistryFile = serde_yaml::from_str(content)?;
        Ok(Self::new(file.node_types)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading node registry from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let registry = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded {} node types", registry.len());
        Ok(registry)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &NodeTypeId) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.id == id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register another node type at runtime.
    pub fn register(&mut self, entry: RegistryEntry) -> Result<(), RegistryError> {
        validate_entry(&entry)?;
        if self.entries.iter().any(|e| e.id == entry.id) {
            return Err(RegistryError::DuplicateId(entry.id));
        }
        self.entries.push(entry);
        Ok(())
    }
}

impl NodeTypeRegistry for YamlRegistry {
    fn node_types(&self) -> Vec<NodeTypeInfo> {
        self.entries
            .iter()
            .map(|e| NodeTypeInfo::new(e.id.as_str(), e.category.as_deref()))
            .collect()
    }

    fn create_node(&self, type_id: &NodeTypeId) -> Option<Box<dyn NodeInstance>> {
        let entry = self.entry(type_id)?;
        Some(Box::new(DemoNode {
            type_id: type_id.clone(),
            title: entry.title().to_string(),
            position: Pos2::ZERO,
            size: entry.size(),
            hook: entry.hook,
        }))
    }
}

/// Node built by [`YamlRegistry`]
#[derive(Debug, Clone)]
pub struct DemoNode {
    type_id: NodeTypeId,
    title: String,
    position: Pos2,
    size: Vec2,
    hook: bool,
}

impl DemoNode {
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl NodeInstance for DemoNode {
    fn type_id(&self) -> &NodeTypeId {
        &self.type_id
    }

    fn position(&self) -> Pos2 {
        self.position
    }

    fn set_position(&mut self, pos: Pos2) {
        self.position = pos;
    }

    fn size(&self) -> Option<Vec2> {
        Some(self.size)
    }

    fn has_created_hook(&self) -> bool {
        self.hook
    }

    fn on_node_created(&mut self) {
        self.size.y += WIDGET_HEIGHT;
        debug!(node = %self.type_id, "creation hook added a widget row");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const YAML: &str = r#"
node_types:
  - id: LoadImage
    category: Image Loaders
    title: Load Image
    size: [220, 120]
  - id: PreviewImage
    category: Image Loaders
    hook: true
  - id: Reroute
"#;

    #[test]
    fn test_parses_entries_in_order() {
        let registry = YamlRegistry::from_yaml_str(YAML).unwrap();
        let ids: Vec<_> = registry.node_types().into_iter().map(|t| t.id).collect();

        assert_eq!(
            ids,
            vec![
                NodeTypeId::from("LoadImage"),
                NodeTypeId::from("PreviewImage"),
                NodeTypeId::from("Reroute"),
            ]
        );
        assert_eq!(registry.node_types()[2].category, None);
    }

    #[test]
    fn test_size_derived_from_title() {
        let registry = YamlRegistry::from_yaml_str(YAML).unwrap();
        let entries = registry.entries();

        assert_eq!(entries[0].size(), Vec2::new(220.0, 120.0));
        // "PreviewImage" is 12 chars
        assert_eq!(entries[1].size(), Vec2::new(140.0, 50.0));
    }

    #[test]
    fn test_hook_adds_widget_row() {
        let registry = YamlRegistry::from_yaml_str(YAML).unwrap();
        let mut node = registry.create_node(&"PreviewImage".into()).unwrap();

        assert!(node.has_created_hook());
        node.on_node_created();
        assert_eq!(node.size(), Some(Vec2::new(140.0, 70.0)));
    }

    #[test]
    fn test_unknown_type_is_not_created() {
        let registry = YamlRegistry::from_yaml_str(YAML).unwrap();
        assert!(registry.create_node(&"Missing".into()).is_none());
    }

    #[test]
    fn test_rejects_bad_entries() {
        let dup = "node_types:\n  - id: A\n  - id: A\n";
        let err = YamlRegistry::from_yaml_str(dup).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RegistryError>(),
            Some(&RegistryError::DuplicateId("A".into()))
        );

        let bad_size = "node_types:\n  - id: A\n    size: [0, 10]\n";
        assert!(YamlRegistry::from_yaml_str(bad_size).is_err());

        let mut registry = YamlRegistry::from_yaml_str(YAML).unwrap();
        let err = registry
            .register(RegistryEntry {
                id: "Reroute".into(),
                category: None,
                title: None,
                size: None,
                hook: false,
            })
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("Reroute".into()));
    }

    #[test]
    fn test_register_validates_size() {
        let mut registry = YamlRegistry::from_yaml_str(YAML).unwrap();
        let err = registry
            .register(RegistryEntry {
                id: "Broken".into(),
                category: Some("Tools".into()),
                title: None,
                size: Some([-10.0, 0.0]),
                hook: false,
            })
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::InvalidSize {
                id: "Broken".into(),
                width: -10.0,
                height: 0.0,
            }
        );
        assert!(registry.entry(&"Broken".into()).is_none());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_rejects_empty_id() {
        let mut registry = YamlRegistry::default();
        let err = registry
            .register(RegistryEntry {
                id: String::new(),
                category: None,
                title: None,
                size: None,
                hook: false,
            })
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyId);
    }

    #[test]
    fn test_rejects_non_finite_sizes() {
        for size in ["[.nan, 10]", "[10, .nan]", "[.inf, 10]", "[10, -.inf]"] {
            let yaml = format!("node_types:\n  - id: A\n    size: {size}\n");
            let err = YamlRegistry::from_yaml_str(&yaml).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<RegistryError>(),
                    Some(RegistryError::InvalidSize { .. })
                ),
                "size {size} was accepted"
            );
        }
    }
}
