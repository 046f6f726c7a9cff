//! In-memory demo host: graph and canvas
//!
//! `DemoGraph` mimics an editor that only knows a node's size after it has
//! drawn it once. Nodes report `None` from `size()` until the next
//! [`DemoGraph::settle_pending`], which the app calls after each render.
//!
//! `DemoCanvas` uses the LiteGraph transform
//! `screen = (world + offset) * zoom`, relative to the canvas rect.

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};
use tracing::debug;

use node_pack_core::{Canvas, Graph, NodeHandle, NodeInstance, NodeTypeId};

use crate::registry::TITLE_HEIGHT;

// =============================================================================
// GRAPH
// =============================================================================

/// Wrapper hiding the inner size until the node has been drawn
struct HostedNode {
    inner: Box<dyn NodeInstance>,
    drawn: bool,
}

impl NodeInstance for HostedNode {
    fn type_id(&self) -> &NodeTypeId {
        self.inner.type_id()
    }

    fn position(&self) -> Pos2 {
        self.inner.position()
    }

    fn set_position(&mut self, pos: Pos2) {
        self.inner.set_position(pos);
    }

    fn size(&self) -> Option<Vec2> {
        if self.drawn {
            self.inner.size()
        } else {
            None
        }
    }

    fn has_created_hook(&self) -> bool {
        self.inner.has_created_hook()
    }

    fn on_node_created(&mut self) {
        self.inner.on_node_created();
    }
}

#[derive(Default)]
pub struct DemoGraph {
    next_handle: u64,
    nodes: Vec<(NodeHandle, HostedNode)>,
}

impl DemoGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every node added since the last call as drawn.
    /// Returns how many nodes became measurable.
    pub fn settle_pending(&mut self) -> usize {
        let mut settled = 0;
        for (_, node) in self.nodes.iter_mut().filter(|(_, n)| !n.drawn) {
            node.drawn = true;
            settled += 1;
        }
        settled
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeHandle, &dyn NodeInstance)> + '_ {
        self.nodes
            .iter()
            .map(|(handle, node)| (*handle, node as &dyn NodeInstance))
    }
}

impl Graph for DemoGraph {
    fn add(&mut self, node: Box<dyn NodeInstance>) -> NodeHandle {
        self.next_handle += 1;
        let handle = NodeHandle(self.next_handle);
        self.nodes.push((
            handle,
            HostedNode {
                inner: node,
                drawn: false,
            },
        ));
        handle
    }

    fn node(&self, handle: NodeHandle) -> Option<&dyn NodeInstance> {
        let (_, node) = self.nodes.iter().find(|(h, _)| *h == handle)?;
        Some(node as &dyn NodeInstance)
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut dyn NodeInstance> {
        let (_, node) = self.nodes.iter_mut().find(|(h, _)| *h == handle)?;
        Some(node as &mut dyn NodeInstance)
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

// =============================================================================
// CANVAS
// =============================================================================

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 5.0;

mod colors {
    use egui::Color32;

    pub fn background() -> Color32 {
        Color32::from_rgb(0x20, 0x20, 0x24)
    }
    pub fn node_fill() -> Color32 {
        Color32::from_rgb(0x35, 0x35, 0x35)
    }
    pub fn node_title() -> Color32 {
        Color32::from_rgb(0x22, 0x22, 0x22)
    }
    pub fn node_border() -> Color32 {
        Color32::from_rgb(0x66, 0x66, 0x66)
    }
}

#[derive(Debug, Clone)]
pub struct DemoCanvas {
    viewport: Vec2,
    offset: Vec2,
    zoom: f32,
    dirty_fg: bool,
    dirty_bg: bool,
}

impl Default for DemoCanvas {
    fn default() -> Self {
        Self::new(Vec2::new(800.0, 600.0))
    }
}

impl DemoCanvas {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            offset: Vec2::ZERO,
            zoom: 1.0,
            dirty_fg: true,
            dirty_bg: true,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_fg || self.dirty_bg
    }

    /// World position to canvas-local screen position
    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        ((world.to_vec2() + self.offset) * self.zoom).to_pos2()
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        (screen.to_vec2() / self.zoom - self.offset).to_pos2()
    }

    /// Pan by a screen-space delta
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.offset += screen_delta / self.zoom;
        self.dirty_fg = true;
        self.dirty_bg = true;
    }

    /// Zoom by `factor`, keeping the world point under `anchor` fixed
    pub fn zoom_at(&mut self, factor: f32, anchor: Pos2) {
        let world = self.screen_to_world(anchor);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = anchor.to_vec2() / self.zoom - world.to_vec2();
        self.dirty_fg = true;
        self.dirty_bg = true;
    }

    /// Allocate the rest of `ui`, handle pan and zoom, and draw the graph.
    pub fn show(&mut self, ui: &mut Ui, graph: &DemoGraph) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        self.viewport = rect.size();

        if response.dragged() {
            self.pan(response.drag_delta());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                let anchor = ui
                    .input(|i| i.pointer.hover_pos())
                    .unwrap_or(rect.center())
                    - rect.min.to_vec2();
                self.zoom_at((scroll * 0.002).exp(), anchor);
            }
        }

        painter.rect_filled(rect, 0.0, colors::background());

        let origin = rect.min.to_vec2();
        for (_, node) in graph.nodes() {
            // Unmeasured nodes are drawn at a placeholder size
            let size = node.size().unwrap_or(Vec2::new(140.0, 50.0));
            let min = self.world_to_screen(node.position()) + origin;
            let node_rect = Rect::from_min_size(min, size * self.zoom);
            if !rect.intersects(node_rect) {
                continue;
            }

            let title_size = Vec2::new(node_rect.width(), TITLE_HEIGHT * self.zoom);
            let title_rect = Rect::from_min_size(node_rect.min, title_size);
            painter.rect_filled(node_rect, 4.0, colors::node_fill());
            painter.rect_filled(title_rect, 4.0, colors::node_title());
            painter.rect_stroke(node_rect, 4.0, Stroke::new(1.0, colors::node_border()));
            painter.text(
                title_rect.left_center() + Vec2::new(8.0 * self.zoom, 0.0),
                Align2::LEFT_CENTER,
                node.type_id().as_str(),
                FontId::proportional((14.0 * self.zoom).clamp(6.0, 28.0)),
                Color32::WHITE,
            );
        }

        self.dirty_fg = false;
        self.dirty_bg = false;
    }
}

impl Canvas for DemoCanvas {
    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    fn set_dirty(&mut self, foreground: bool, background: bool) {
        debug!(foreground, background, "canvas marked dirty");
        self.dirty_fg |= foreground;
        self.dirty_bg |= background;
    }
}
