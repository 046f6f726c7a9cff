//! Load session - create, settle, arrange
//!
//! Loading a category is spread over several frames. Each node is created,
//! added to the graph, given its creation hook, and then left to settle
//! until the host reports a size for it. Only then is the next node
//! created. Once every node is measured the grid layout runs and the camera
//! is centered on the result.
//!
//! # Frame loop
//! - `start(...)` validates the selection (aborting faults come back as `Err`)
//! - `poll(now, ...)` once per frame until it returns `Finished`
//!
//! A host that measures synchronously, combined with a zero settle delay,
//! finishes the whole batch in a single `poll`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use node_pack_core::{
    fit_camera, CameraFrame, Canvas, CategoryIndex, Graph, GridLayout, LayoutSettings, LoadFault,
    NodeHandle, NodeTypeId, NodeTypeRegistry,
};

// =============================================================================
// SETTLE POLICY
// =============================================================================

/// How long a new node is given before its size is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    /// Minimum wait between creating a node and reading its size
    pub delay: Duration,
    /// Give up waiting for a size after this long and use zero
    pub max_wait: Duration,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(10),
            max_wait: Duration::from_millis(500),
        }
    }
}

impl SettlePolicy {
    /// No delay at all; for hosts that report sizes synchronously.
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            max_wait: Duration::ZERO,
        }
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// A node placed by a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub handle: NodeHandle,
    pub type_id: NodeTypeId,
    pub position: Pos2,
    pub size: Vec2,
}

/// Outcome of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub category: String,
    /// Effective column count used by the layout
    pub columns: usize,
    pub placed: Vec<PlacedNode>,
    /// Types the factory could not build, or that left the graph while settling
    pub skipped: Vec<NodeTypeId>,
    /// `None` when there was nothing to frame or no canvas
    pub frame: Option<CameraFrame>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadProgress {
    Pending,
    Finished(LoadReport),
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Clone)]
struct Settling {
    handle: NodeHandle,
    type_id: NodeTypeId,
    created_at: Instant,
}

enum SettleState {
    Waiting,
    Ready(Vec2),
    /// The node left the graph before it was measured
    Gone,
}

#[derive(Debug, Clone)]
struct Measured {
    handle: NodeHandle,
    type_id: NodeTypeId,
    size: Vec2,
}

/// One in-flight "load category" operation
#[derive(Debug, Clone)]
pub struct LoadSession {
    category: String,
    requested_columns: u32,
    settings: LayoutSettings,
    policy: SettlePolicy,
    total: usize,
    queue: VecDeque<NodeTypeId>,
    settling: Option<Settling>,
    measured: Vec<Measured>,
    skipped: Vec<NodeTypeId>,
}

impl LoadSession {
    /// Resolve the selected category against the registry.
    ///
    /// Fails with an aborting [`LoadFault`] when nothing is selected, the
    /// category is unknown, or it holds no node types.
    pub fn start(
        selected: Option<&str>,
        registry: &dyn NodeTypeRegistry,
        requested_columns: u32,
        settings: LayoutSettings,
        policy: SettlePolicy,
    ) -> Result<Self, LoadFault> {
        let category = selected
            .filter(|c| !c.is_empty())
            .ok_or(LoadFault::NoCategorySelected)?;

        let index = CategoryIndex::build(registry);
        if !index.contains(category) {
            return Err(LoadFault::UnknownCategory(category.to_string()));
        }

        let node_types = index.sorted_node_types(category);
        if node_types.is_empty() {
            return Err(LoadFault::EmptyCategory(category.to_string()));
        }

        info!(
            category,
            nodes = node_types.len(),
            columns = requested_columns,
            "loading node pack"
        );

        Ok(Self {
            category: category.to_string(),
            requested_columns,
            settings,
            policy,
            total: node_types.len(),
            queue: node_types.into(),
            settling: None,
            measured: Vec::new(),
            skipped: Vec::new(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// (nodes handled so far, nodes in the category)
    pub fn progress(&self) -> (usize, usize) {
        (self.measured.len() + self.skipped.len(), self.total)
    }

    /// Advance the session as far as the host allows right now.
    pub fn poll(
        &mut self,
        now: Instant,
        registry: &dyn NodeTypeRegistry,
        graph: &mut dyn Graph,
        canvas: Option<&mut dyn Canvas>,
    ) -> LoadProgress {
        loop {
            if let Some(settling) = self.settling.take() {
                match self.settle_state(&settling, now, graph) {
                    SettleState::Waiting => {
                        self.settling = Some(settling);
                        return LoadProgress::Pending;
                    }
                    SettleState::Ready(size) => {
                        debug!(node = %settling.type_id, w = size.x, h = size.y, "node measured");
                        self.measured.push(Measured {
                            handle: settling.handle,
                            type_id: settling.type_id,
                            size,
                        });
                    }
                    SettleState::Gone => {
                        warn!(node = %settling.type_id, "node removed before it settled");
                        self.skipped.push(settling.type_id);
                    }
                }
            }

            let Some(type_id) = self.queue.pop_front() else {
                break;
            };

            let Some(node) = registry.create_node(&type_id) else {
                warn!("{}", LoadFault::NodeCreationFailed(type_id.clone()));
                self.skipped.push(type_id);
                continue;
            };

            let handle = graph.add(node);
            if let Some(node) = graph.node_mut(handle) {
                if node.has_created_hook() {
                    node.on_node_created();
                }
            }

            self.settling = Some(Settling {
                handle,
                type_id,
                created_at: now,
            });
        }

        LoadProgress::Finished(self.finish(graph, canvas))
    }

    fn settle_state(&self, settling: &Settling, now: Instant, graph: &dyn Graph) -> SettleState {
        let Some(node) = graph.node(settling.handle) else {
            return SettleState::Gone;
        };

        let elapsed = now.saturating_duration_since(settling.created_at);
        if elapsed < self.policy.delay {
            return SettleState::Waiting;
        }

        match node.size() {
            Some(size) => SettleState::Ready(size),
            None if elapsed >= self.policy.max_wait => {
                warn!(
                    node = %settling.type_id,
                    waited_ms = elapsed.as_millis() as u64,
                    "node never reported a size, laying it out as zero-sized"
                );
                SettleState::Ready(Vec2::ZERO)
            }
            None => SettleState::Waiting,
        }
    }

    fn finish(&mut self, graph: &mut dyn Graph, canvas: Option<&mut dyn Canvas>) -> LoadReport {
        let sizes: Vec<Vec2> = self.measured.iter().map(|m| m.size).collect();
        let layout = GridLayout::compute(
            &sizes,
            Some(i64::from(self.requested_columns)),
            self.settings.padding,
        );

        let mut placed = Vec::with_capacity(self.measured.len());
        for (measured, position) in self.measured.drain(..).zip(&layout.positions) {
            match graph.node_mut(measured.handle) {
                Some(node) => node.set_position(*position),
                None => {
                    self.skipped.push(measured.type_id);
                    continue;
                }
            }
            placed.push(PlacedNode {
                handle: measured.handle,
                type_id: measured.type_id,
                position: *position,
                size: measured.size,
            });
        }

        let frame = canvas.and_then(|canvas| {
            let rects: Vec<Rect> = placed
                .iter()
                .map(|p| Rect::from_min_size(p.position, p.size))
                .collect();
            let frame = fit_camera(&rects, canvas.viewport_size(), self.settings.zoom)?;
            frame.apply(canvas);
            Some(frame)
        });

        info!(
            category = %self.category,
            placed = placed.len(),
            skipped = self.skipped.len(),
            columns = layout.columns,
            "node pack loaded"
        );

        LoadReport {
            category: self.category.clone(),
            columns: layout.columns,
            placed,
            skipped: std::mem::take(&mut self.skipped),
            frame,
        }
    }
}
