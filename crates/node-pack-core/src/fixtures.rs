//! Fabricated host objects for unit tests

use egui::{Pos2, Vec2};

use crate::host::{Canvas, NodeInstance, NodeTypeRegistry};
use crate::types::{NodeTypeId, NodeTypeInfo};

/// Registry backed by a plain list; every type builds a 100x50 node
pub struct StaticRegistry {
    entries: Vec<NodeTypeInfo>,
}

impl StaticRegistry {
    pub fn new(entries: &[(&str, Option<&str>)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(id, category)| NodeTypeInfo::new(*id, *category))
                .collect(),
        }
    }

    pub fn push(&mut self, id: &str, category: Option<&str>) {
        self.entries.push(NodeTypeInfo::new(id, category));
    }
}

impl NodeTypeRegistry for StaticRegistry {
    fn node_types(&self) -> Vec<NodeTypeInfo> {
        self.entries.clone()
    }

    fn create_node(&self, type_id: &NodeTypeId) -> Option<Box<dyn NodeInstance>> {
        self.entries
            .iter()
            .any(|info| &info.id == type_id)
            .then(|| {
                Box::new(FixedNode {
                    type_id: type_id.clone(),
                    position: Pos2::ZERO,
                    size: Vec2::new(100.0, 50.0),
                }) as Box<dyn NodeInstance>
            })
    }
}

struct FixedNode {
    type_id: NodeTypeId,
    position: Pos2,
    size: Vec2,
}

impl NodeInstance for FixedNode {
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
}

/// Canvas that records what was applied to it
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub size: Vec2,
    pub offset: Option<Vec2>,
    pub zoom: Option<f32>,
    pub dirty: Vec<(bool, bool)>,
}

impl Canvas for RecordingCanvas {
    fn viewport_size(&self) -> Vec2 {
        self.size
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offset = Some(offset);
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = Some(zoom);
    }

    fn set_dirty(&mut self, foreground: bool, background: bool) {
        self.dirty.push((foreground, background));
    }
}
