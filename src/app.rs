//! Node pack loader app
//!
//! Sidebar on the left, demo canvas in the middle. Per frame:
//! 1. sidebar panel (may start a load or clear the canvas)
//! 2. canvas render
//! 3. settle pass for nodes drawn this frame
//! 4. load session poll

use std::time::Instant;

use eframe::egui;
use tracing::info;

use node_pack_core::Canvas;
use node_pack_sidebar::NodePackSidebar;

use crate::config::LoaderConfig;
use crate::host::{DemoCanvas, DemoGraph};
use crate::registry::YamlRegistry;

pub struct NodePackApp {
    registry: YamlRegistry,
    graph: DemoGraph,
    canvas: DemoCanvas,
    sidebar: NodePackSidebar,
    sidebar_width: f32,
}

impl NodePackApp {
    pub fn new(registry: YamlRegistry, config: &LoaderConfig) -> Self {
        let mut sidebar = NodePackSidebar::new(config.layout, config.settle.policy());
        sidebar.refresh(&registry);
        info!(
            node_types = registry.len(),
            categories = sidebar.state().all_categories.len(),
            "node pack loader ready"
        );

        Self {
            registry,
            graph: DemoGraph::new(),
            canvas: DemoCanvas::new(config.window.canvas_size()),
            sidebar,
            sidebar_width: config.window.sidebar_width,
        }
    }

    /// Run the native window until it is closed.
    pub fn run(self, config: &LoaderConfig) -> eframe::Result<()> {
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title("Node Pack Loader")
                .with_inner_size([config.window.width, config.window.height])
                .with_min_inner_size([640.0, 400.0]),
            ..Default::default()
        };

        eframe::run_native(
            "Node Pack Loader",
            native_options,
            Box::new(move |cc| {
                cc.egui_ctx.set_theme(egui::Theme::Dark);
                Ok(Box::new(self) as Box<dyn eframe::App>)
            }),
        )
    }
}

impl eframe::App for NodePackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("node_pack_sidebar")
            .exact_width(self.sidebar_width)
            .resizable(false)
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.sidebar.ui(
                    ui,
                    &self.registry,
                    &mut self.graph,
                    Some(&mut self.canvas as &mut dyn Canvas),
                );
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.canvas.show(ui, &self.graph);
            });

        self.graph.settle_pending();
        self.sidebar.update(
            Instant::now(),
            &self.registry,
            &mut self.graph,
            Some(&mut self.canvas as &mut dyn Canvas),
        );

        if self.sidebar.is_loading() || self.canvas.is_dirty() {
            ctx.request_repaint();
        }
    }
}
