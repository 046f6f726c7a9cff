//! Sidebar colours

use egui::{Color32, Stroke, Visuals};

/// Dark sidebar palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarStyle {
    pub background: Color32,
    pub text: Color32,
    /// Text inputs, dropdown and list background
    pub field: Color32,
    pub border: Color32,
    pub button: Color32,
    pub button_text: Color32,
    pub button_border: Color32,
    /// Height of the node list area
    pub list_height: f32,
    pub padding: f32,
}

impl Default for SidebarStyle {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0x18, 0x18, 0x1b),
            text: Color32::from_rgb(0xcc, 0xcc, 0xcc),
            field: Color32::from_rgb(0x44, 0x44, 0x44),
            border: Color32::from_rgb(0x55, 0x55, 0x55),
            button: Color32::from_rgb(0x55, 0x55, 0x55),
            button_text: Color32::WHITE,
            button_border: Color32::from_rgb(0x66, 0x66, 0x66),
            list_height: 200.0,
            padding: 10.0,
        }
    }
}

impl SidebarStyle {
    /// Override the widget visuals inside the sidebar.
    pub fn apply(&self, visuals: &mut Visuals) {
        visuals.override_text_color = Some(self.text);
        visuals.extreme_bg_color = self.field;
        visuals.selection.bg_fill = self.border;

        let border = Stroke::new(1.0, self.border);
        for widget in [
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
        ] {
            widget.bg_stroke = border;
        }
        visuals.widgets.inactive.weak_bg_fill = self.field;
        visuals.widgets.inactive.bg_fill = self.field;
    }
}
