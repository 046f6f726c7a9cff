//! Host capabilities consumed by the loader
//!
//! The editor that embeds the sidebar owns the registry, the graph, the
//! canvas and every node instance. These traits are the whole surface the
//! loader is allowed to touch; everything is passed in explicitly so tests
//! can run against fabricated hosts.

use egui::{Pos2, Vec2};

use crate::types::{NodeHandle, NodeTypeId, NodeTypeInfo};

/// Registered node types plus the factory that instantiates them
pub trait NodeTypeRegistry {
    /// All registered types, in registry enumeration order.
    ///
    /// Called on every category query, so the result always reflects the
    /// current registry state.
    fn node_types(&self) -> Vec<NodeTypeInfo>;

    /// Instantiate a node of the given type. `None` when the factory can't
    /// build it.
    fn create_node(&self, type_id: &NodeTypeId) -> Option<Box<dyn NodeInstance>>;
}

/// A node created by the host factory
pub trait NodeInstance {
    fn type_id(&self) -> &NodeTypeId;

    fn position(&self) -> Pos2;

    fn set_position(&mut self, pos: Pos2);

    /// Rendered size, or `None` while the host has not measured the node yet.
    fn size(&self) -> Option<Vec2>;

    /// Whether this node carries a post-creation hook.
    fn has_created_hook(&self) -> bool {
        false
    }

    /// Post-creation hook. Invoked at most once, right after insertion.
    fn on_node_created(&mut self) {}
}

/// Mutable node container owned by the host
pub trait Graph {
    fn add(&mut self, node: Box<dyn NodeInstance>) -> NodeHandle;

    fn node(&self, handle: NodeHandle) -> Option<&dyn NodeInstance>;

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut dyn NodeInstance>;

    /// Remove every node.
    fn clear(&mut self);

    fn node_count(&self) -> usize;
}

/// The host's view onto the graph
pub trait Canvas {
    /// Viewport width and height in screen units.
    fn viewport_size(&self) -> Vec2;

    fn set_offset(&mut self, offset: Vec2);

    fn set_zoom(&mut self, zoom: f32);

    /// Request a redraw of the foreground and/or background layers.
    fn set_dirty(&mut self, foreground: bool, background: bool);
}
