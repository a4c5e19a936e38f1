//! Transform mode buttons and snap toggle

use egui::{Color32, RichText};
use gimbal_core::TransformMode;

use crate::app_state::{AppAction, SharedAppState};
use crate::config::UiTheme;
use crate::panels::Panel;

const ACTIVE: Color32 = Color32::from_rgb(0, 128, 0);
const INACTIVE: Color32 = Color32::from_rgb(128, 128, 128);
const SNAP_OFF: Color32 = Color32::from_rgb(200, 0, 0);

/// Overlay with the mode selector, snap toggle and orientation readout
pub struct ModeSelectorPanel {
    theme: UiTheme,
}

impl ModeSelectorPanel {
    pub fn new(theme: UiTheme) -> Self {
        Self { theme }
    }

    /// Sync the theme selector after the theme changed elsewhere
    pub fn set_theme(&mut self, theme: UiTheme) {
        self.theme = theme;
    }
}

impl Default for ModeSelectorPanel {
    fn default() -> Self {
        Self::new(UiTheme::default())
    }
}

fn styled_button(ui: &mut egui::Ui, text: &str, fill: Color32) -> egui::Response {
    ui.add(egui::Button::new(RichText::new(text).color(Color32::WHITE)).fill(fill))
}

impl Panel for ModeSelectorPanel {
    fn name(&self) -> &str {
        "Transform Controls"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        let mut state = app_state.lock();
        let snapshot = state.controller.snapshot();

        ui.label(RichText::new("Transform Controls:").strong().color(Color32::WHITE));

        ui.horizontal(|ui| {
            for mode in TransformMode::ALL {
                let fill = if snapshot.mode == *mode { ACTIVE } else { INACTIVE };
                if styled_button(ui, mode.name(), fill).clicked() {
                    state.queue_action(AppAction::SelectMode(*mode));
                }
            }
        });

        let (snap_text, snap_fill) = if snapshot.snap_enabled {
            ("Disable Snapping", ACTIVE)
        } else {
            ("Enable Snapping", SNAP_OFF)
        };
        if styled_button(ui, snap_text, snap_fill).clicked() {
            state.queue_action(AppAction::ToggleSnap);
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Orientation: {}", snapshot.orientation.name()))
                    .color(Color32::WHITE),
            );
            if ui.small_button("Toggle").clicked() {
                state.queue_action(AppAction::ToggleOrientation);
            }
        });
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(RichText::new("Press ").color(Color32::WHITE));
            ui.label(RichText::new("Alt").strong().color(Color32::WHITE));
            ui.label(
                RichText::new(" to toggle between Local and World space").color(Color32::WHITE),
            );
        });

        if !snapshot.orbit_enabled {
            ui.label(RichText::new("Orbit paused while dragging").weak());
        }

        ui.collapsing(RichText::new("View").color(Color32::WHITE), |ui| {
            ui.horizontal(|ui| {
                if ui.button("Reset cube").clicked() {
                    state.queue_action(AppAction::ResetObject);
                }
                if ui.button("Reset view").clicked() {
                    state.queue_action(AppAction::ResetView);
                }
            });
            if ui
                .button("Reset settings")
                .on_hover_text("Restore default theme, font size and drag timeout")
                .clicked()
            {
                state.queue_action(AppAction::ResetSettings);
            }
            let previous = self.theme;
            egui::ComboBox::from_id_salt("ui_theme")
                .selected_text(self.theme.name())
                .show_ui(ui, |ui| {
                    for theme in UiTheme::ALL {
                        ui.selectable_value(&mut self.theme, *theme, theme.name());
                    }
                });
            if self.theme != previous {
                state.queue_action(AppAction::SetTheme(self.theme));
            }
        });
    }
}
