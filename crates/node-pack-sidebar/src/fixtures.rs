//! Fabricated host for sidebar tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use egui::{Pos2, Vec2};
use node_pack_core::{
    Canvas, Graph, NodeHandle, NodeInstance, NodeTypeId, NodeTypeInfo, NodeTypeRegistry,
};

type HookLog = Rc<RefCell<HashMap<NodeTypeId, u32>>>;

/// Registry over a fixed list. Nodes are 100 wide and 40 + 10 per letter
/// of the type name tall, so sizes differ between types.
pub struct FakeRegistry {
    entries: Vec<NodeTypeInfo>,
    measured: bool,
    failing: HashSet<NodeTypeId>,
    hooked: HashSet<NodeTypeId>,
    hook_log: HookLog,
}

impl FakeRegistry {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(id, category)| NodeTypeInfo::new(*id, Some(*category)))
                .collect(),
            measured: true,
            failing: HashSet::new(),
            hooked: HashSet::new(),
            hook_log: HookLog::default(),
        }
    }

    /// Created nodes never report a size.
    pub fn unmeasured(mut self) -> Self {
        self.measured = false;
        self
    }

    pub fn push(&mut self, id: &str, category: &str) {
        self.entries.push(NodeTypeInfo::new(id, Some(category)));
    }

    pub fn fail_on(&mut self, id: &str) {
        self.failing.insert(NodeTypeId::from(id));
    }

    pub fn with_hook(&mut self, id: &str) {
        self.hooked.insert(NodeTypeId::from(id));
    }

    pub fn hook_calls(&self, id: &str) -> u32 {
        self.hook_log
            .borrow()
            .get(&NodeTypeId::from(id))
            .copied()
            .unwrap_or(0)
    }
}

impl NodeTypeRegistry for FakeRegistry {
    fn node_types(&self) -> Vec<NodeTypeInfo> {
        self.entries.clone()
    }

    fn create_node(&self, type_id: &NodeTypeId) -> Option<Box<dyn NodeInstance>> {
        if self.failing.contains(type_id) || !self.entries.iter().any(|e| &e.id == type_id) {
            return None;
        }
        let size = self
            .measured
            .then(|| Vec2::new(100.0, 40.0 + 10.0 * type_id.as_str().len() as f32));
        Some(Box::new(FakeNode {
            type_id: type_id.clone(),
            position: Pos2::ZERO,
            size,
            hook: self.hooked.contains(type_id).then(|| self.hook_log.clone()),
        }))
    }
}

struct FakeNode {
    type_id: NodeTypeId,
    position: Pos2,
    size: Option<Vec2>,
    hook: Option<HookLog>,
}

impl NodeInstance for FakeNode {
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
        self.size
    }

    fn has_created_hook(&self) -> bool {
        self.hook.is_some()
    }

    fn on_node_created(&mut self) {
        if let Some(log) = &self.hook {
            *log.borrow_mut().entry(self.type_id.clone()).or_default() += 1;
        }
    }
}

#[derive(Default)]
pub struct FakeGraph {
    next_handle: u64,
    nodes: Vec<(NodeHandle, Box<dyn NodeInstance>)>,
}

impl FakeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete one node, as a user would from the canvas.
    pub fn remove(&mut self, handle: NodeHandle) {
        self.nodes.retain(|(h, _)| *h != handle);
    }
}

impl Graph for FakeGraph {
    fn add(&mut self, node: Box<dyn NodeInstance>) -> NodeHandle {
        self.next_handle += 1;
        let handle = NodeHandle(self.next_handle);
        self.nodes.push((handle, node));
        handle
    }

    fn node(&self, handle: NodeHandle) -> Option<&dyn NodeInstance> {
        let (_, node) = self.nodes.iter().find(|(h, _)| *h == handle)?;
        Some(node.as_ref())
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut dyn NodeInstance> {
        let (_, node) = self.nodes.iter_mut().find(|(h, _)| *h == handle)?;
        Some(node.as_mut())
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Default)]
pub struct FakeCanvas {
    pub size: Vec2,
    pub offset: Option<Vec2>,
    pub zoom: Option<f32>,
    pub dirty: Vec<(bool, bool)>,
}

impl FakeCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Default::default()
        }
    }
}

impl Canvas for FakeCanvas {
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
