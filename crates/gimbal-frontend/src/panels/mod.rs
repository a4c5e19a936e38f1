//! UI panels

mod mode_selector;
mod viewport;

pub use mode_selector::ModeSelectorPanel;
pub use viewport::ViewportPanel;

use crate::app_state::SharedAppState;

/// A region of the window that renders from, and queues actions on, app state
pub trait Panel {
    fn name(&self) -> &str;

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState);
}
