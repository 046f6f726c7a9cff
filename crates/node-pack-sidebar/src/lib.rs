//! Node Pack Sidebar
//!
//! egui sidebar that loads every node type of a category onto the host
//! graph and arranges them in columns.
//!
//! - **State** ([`SidebarState`]): search query, category list, selection,
//!   column count, summary. Every mutator re-derives what depends on it.
//! - **Panel** ([`sidebar_panel`]): draws the state and reports a
//!   [`SidebarAction`]; it never talks to the host.
//! - **Session** ([`LoadSession`]): frame-polled node creation, settle,
//!   layout and camera fit.
//! - **Controller** ([`NodePackSidebar`]): owns the above and is the only
//!   part that mutates the host.
//!
//! # Usage
//!
//! ```ignore
//! // once per frame
//! self.sidebar.update(Instant::now(), &self.registry, &mut self.graph, Some(&mut self.canvas));
//!
//! egui::SidePanel::left("node_pack").show(ctx, |ui| {
//!     self.sidebar.ui(ui, &self.registry, &mut self.graph, Some(&mut self.canvas));
//! });
//! ```

pub mod panel;
pub mod session;
pub mod sidebar;
pub mod state;
pub mod style;

pub use panel::{sidebar_panel, SidebarAction};
pub use session::{LoadProgress, LoadReport, LoadSession, SettlePolicy};
pub use sidebar::NodePackSidebar;
pub use state::SidebarState;
pub use style::SidebarStyle;

#[cfg(test)]
mod fixtures;
