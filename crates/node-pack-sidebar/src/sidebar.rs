//! Sidebar controller
//!
//! Owns the view-model and at most one [`LoadSession`]. The host calls
//! [`NodePackSidebar::ui`] inside its side panel and
//! [`NodePackSidebar::update`] once per frame.

use std::time::Instant;

use egui::Ui;
use tracing::{debug, info, warn};

use node_pack_core::{Canvas, Graph, LayoutSettings, LoadFault, NodeTypeRegistry};

use crate::panel::{sidebar_panel, SidebarAction};
use crate::session::{LoadProgress, LoadReport, LoadSession, SettlePolicy};
use crate::state::SidebarState;
use crate::style::SidebarStyle;

pub struct NodePackSidebar {
    state: SidebarState,
    session: Option<LoadSession>,
    settings: LayoutSettings,
    policy: SettlePolicy,
    style: SidebarStyle,
    last_report: Option<LoadReport>,
    last_fault: Option<LoadFault>,
}

impl Default for NodePackSidebar {
    fn default() -> Self {
        Self::new(LayoutSettings::default(), SettlePolicy::default())
    }
}

impl NodePackSidebar {
    pub fn new(settings: LayoutSettings, policy: SettlePolicy) -> Self {
        Self {
            state: SidebarState::new().with_column_count(settings.default_columns),
            session: None,
            settings,
            policy,
            style: SidebarStyle::default(),
            last_report: None,
            last_fault: None,
        }
    }

    pub fn with_style(mut self, style: SidebarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn state(&self) -> &SidebarState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SidebarState {
        &mut self.state
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_some()
    }

    pub fn last_report(&self) -> Option<&LoadReport> {
        self.last_report.as_ref()
    }

    /// Fault from the most recent load attempt, if it was rejected
    pub fn last_fault(&self) -> Option<&LoadFault> {
        self.last_fault.as_ref()
    }

    /// Re-read categories and summary from the registry.
    pub fn refresh(&mut self, registry: &dyn NodeTypeRegistry) {
        self.state.refresh(registry);
    }

    /// Draw the panel and apply whatever the user did.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        registry: &dyn NodeTypeRegistry,
        graph: &mut dyn Graph,
        canvas: Option<&mut dyn Canvas>,
    ) {
        if let Some(action) = sidebar_panel(ui, &mut self.state, &self.style) {
            self.handle_action(action, registry, graph, canvas);
        }
    }

    pub fn handle_action(
        &mut self,
        action: SidebarAction,
        registry: &dyn NodeTypeRegistry,
        graph: &mut dyn Graph,
        canvas: Option<&mut dyn Canvas>,
    ) {
        debug!(?action, "sidebar action");
        match action {
            SidebarAction::SearchChanged => self.state.apply_search(registry),
            SidebarAction::CategorySelected(category) => {
                self.state.select_category(&category, registry)
            }
            SidebarAction::LoadNodes => self.start_load(registry),
            SidebarAction::ClearCanvas => self.clear_canvas(graph, canvas),
        }
    }

    /// Begin loading the selected category. Ignored while a load is running.
    pub fn start_load(&mut self, registry: &dyn NodeTypeRegistry) {
        if self.session.is_some() {
            debug!("load already in progress, ignoring trigger");
            return;
        }

        match LoadSession::start(
            self.state.selected_category(),
            registry,
            self.state.column_count,
            self.settings,
            self.policy,
        ) {
            Ok(session) => {
                self.last_fault = None;
                self.state.loading = true;
                self.session = Some(session);
            }
            Err(fault) => {
                warn!(%fault, "load aborted");
                self.last_fault = Some(fault);
            }
        }
    }

    /// Drive the running session, if any. Returns the report on the frame
    /// the session finishes.
    pub fn update(
        &mut self,
        now: Instant,
        registry: &dyn NodeTypeRegistry,
        graph: &mut dyn Graph,
        canvas: Option<&mut dyn Canvas>,
    ) -> Option<&LoadReport> {
        let session = self.session.as_mut()?;
        match session.poll(now, registry, graph, canvas) {
            LoadProgress::Pending => None,
            LoadProgress::Finished(report) => {
                self.session = None;
                self.state.loading = false;
                self.state.refresh_summary(registry);
                self.last_report = Some(report);
                self.last_report.as_ref()
            }
        }
    }

    /// Remove every node from the graph and redraw. The summary is left as is.
    pub fn clear_canvas(&mut self, graph: &mut dyn Graph, canvas: Option<&mut dyn Canvas>) {
        let removed = graph.node_count();
        graph.clear();
        if let Some(canvas) = canvas {
            canvas.set_dirty(true, true);
        }
        info!(removed, "canvas cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FakeCanvas, FakeGraph, FakeRegistry};
    use pretty_assertions::assert_eq;

    fn registry() -> FakeRegistry {
        FakeRegistry::new(&[
            ("VAELoader", "Loaders"),
            ("CheckpointLoader", "Loaders"),
            ("LoraLoader", "Loaders"),
            ("UpscaleModelLoader", "Loaders"),
            ("CLIPLoader", "Loaders"),
            ("KSampler", "Sampling"),
        ])
    }

    fn sidebar(registry: &FakeRegistry) -> NodePackSidebar {
        let mut sidebar =
            NodePackSidebar::new(LayoutSettings::default(), SettlePolicy::immediate());
        sidebar.refresh(registry);
        sidebar
    }

    #[test]
    fn test_load_then_clear_keeps_summary() {
        let registry = registry();
        let mut graph = FakeGraph::new();
        let mut canvas = FakeCanvas::new(800.0, 600.0);
        let mut sidebar = sidebar(&registry);
        assert_eq!(sidebar.state().selected_category(), Some("Loaders"));

        sidebar.handle_action(SidebarAction::LoadNodes, &registry, &mut graph, Some(&mut canvas));
        assert!(sidebar.is_loading());
        assert!(sidebar.state().loading);

        let report = sidebar
            .update(Instant::now(), &registry, &mut graph, Some(&mut canvas))
            .cloned()
            .expect("immediate policy finishes in one frame");
        assert_eq!(report.placed.len(), 5);
        assert_eq!(graph.node_count(), 5);
        assert!(!sidebar.is_loading());

        canvas.dirty.clear();
        sidebar.handle_action(SidebarAction::ClearCanvas, &registry, &mut graph, Some(&mut canvas));

        assert_eq!(graph.node_count(), 0);
        assert_eq!(canvas.dirty, vec![(true, true)]);
        assert_eq!(sidebar.state().summary.count_label(), "Node Count: 5");
    }

    #[test]
    fn test_second_trigger_ignored_while_loading() {
        let registry = registry();
        let mut graph = FakeGraph::new();
        let mut sidebar = NodePackSidebar::new(LayoutSettings::default(), SettlePolicy::default());
        sidebar.refresh(&registry);

        let start = Instant::now();
        sidebar.start_load(&registry);
        assert!(sidebar.update(start, &registry, &mut graph, None).is_none());
        assert_eq!(graph.node_count(), 1);

        sidebar.start_load(&registry);
        assert!(sidebar.update(start, &registry, &mut graph, None).is_none());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_rejected_load_records_fault() {
        let registry = registry();
        let mut sidebar = sidebar(&registry);
        sidebar.state_mut().set_search_query("no such category", &registry);

        sidebar.start_load(&registry);

        assert!(!sidebar.is_loading());
        assert_eq!(sidebar.last_fault(), Some(&LoadFault::NoCategorySelected));
    }

    #[test]
    fn test_category_selection_updates_summary() {
        let registry = registry();
        let mut graph = FakeGraph::new();
        let mut sidebar = sidebar(&registry);

        sidebar.handle_action(
            SidebarAction::CategorySelected("Sampling".into()),
            &registry,
            &mut graph,
            None,
        );

        assert_eq!(sidebar.state().summary.list_text(), "Nodes:\nKSampler");
    }

    #[test]
    fn test_slider_default_follows_settings() {
        let settings = LayoutSettings {
            default_columns: 5,
            ..LayoutSettings::default()
        };
        let sidebar = NodePackSidebar::new(settings, SettlePolicy::immediate());
        assert_eq!(sidebar.state().column_count, 5);
    }
}
