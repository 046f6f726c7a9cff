//! Sidebar panel
//!
//! Renders a [`SidebarState`] and reports what the user did. The panel
//! never touches the registry or the graph; the caller turns the returned
//! [`SidebarAction`] into state changes.

use egui::{Button, ComboBox, Frame, RichText, ScrollArea, Slider, Stroke, TextEdit, Ui};

use node_pack_core::{MAX_COLUMNS, MIN_COLUMNS};

use crate::state::SidebarState;
use crate::style::SidebarStyle;

/// Result of one frame of sidebar interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarAction {
    /// `search_query` was edited in place
    SearchChanged,
    /// A category was picked from the dropdown
    CategorySelected(String),
    /// "Load Nodes" was clicked
    LoadNodes,
    /// "Clear Canvas" was clicked
    ClearCanvas,
}

/// Draw the sidebar. Only the search text and column slider are written
/// into `state` directly.
pub fn sidebar_panel(
    ui: &mut Ui,
    state: &mut SidebarState,
    style: &SidebarStyle,
) -> Option<SidebarAction> {
    let mut action = None;

    Frame::none()
        .fill(style.background)
        .inner_margin(style.padding)
        .show(ui, |ui| {
            style.apply(ui.visuals_mut());

            // Search
            let search = ui.add(
                TextEdit::singleline(&mut state.search_query)
                    .hint_text("Search categories...")
                    .desired_width(ui.available_width()),
            );
            if search.changed() {
                action = Some(SidebarAction::SearchChanged);
            }
            ui.add_space(style.padding);

            // Category dropdown
            ComboBox::from_id_salt("node_pack_category")
                .width(ui.available_width())
                .selected_text(state.selected.as_deref().unwrap_or(""))
                .show_ui(ui, |ui| {
                    for category in &state.filtered_categories {
                        let is_selected = state.selected.as_ref() == Some(category);
                        if ui.selectable_label(is_selected, category).clicked() && !is_selected {
                            action = Some(SidebarAction::CategorySelected(category.clone()));
                        }
                    }
                });
            ui.add_space(style.padding);

            // Load trigger, disabled while a session runs
            let label = if state.loading { "Loading..." } else { "Load Nodes" };
            if ui
                .add_enabled(!state.loading, styled_button(label, style))
                .clicked()
            {
                action = Some(SidebarAction::LoadNodes);
            }
            ui.add_space(style.padding);

            ui.horizontal(|ui| {
                ui.label("Columns: ");
                ui.add(Slider::new(&mut state.column_count, MIN_COLUMNS..=MAX_COLUMNS));
            });
            ui.add_space(style.padding);

            // Summary
            ui.label(state.summary.count_label());
            let list = state.summary.list_text();
            ScrollArea::vertical()
                .id_salt("node_pack_list")
                .max_height(style.list_height)
                .show(ui, |ui| {
                    ui.add(
                        TextEdit::multiline(&mut list.as_str())
                            .desired_width(ui.available_width())
                            .desired_rows(8),
                    );
                });
            ui.add_space(style.padding);

            if ui.add(styled_button("Clear Canvas", style)).clicked() {
                action = Some(SidebarAction::ClearCanvas);
            }
        });

    action
}

fn styled_button<'a>(label: &str, style: &SidebarStyle) -> Button<'a> {
    Button::new(RichText::new(label).color(style.button_text))
        .fill(style.button)
        .stroke(Stroke::new(1.0, style.button_border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeRegistry;
    use pretty_assertions::assert_eq;

    fn run_frame(state: &mut SidebarState) -> Option<SidebarAction> {
        let ctx = egui::Context::default();
        let mut action = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = sidebar_panel(ui, state, &SidebarStyle::default());
            });
        });
        action
    }

    #[test]
    fn test_idle_frame_reports_nothing() {
        let registry =
            FakeRegistry::new(&[("LoadImage", "Image Loaders"), ("MaskBlur", "Mask Ops")]);
        let mut state = SidebarState::new();
        state.refresh(&registry);
        let before = state.clone();

        assert_eq!(run_frame(&mut state), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_renders_while_loading() {
        let mut state = SidebarState {
            loading: true,
            ..SidebarState::new()
        };
        assert_eq!(run_frame(&mut state), None);
        assert!(state.loading);
    }
}
