//! Application state shared between panels

use std::sync::Arc;

use gimbal_core::{GimbalController, TransformMode};
use parking_lot::Mutex;

use crate::config::UiTheme;

/// Deferred action queued by a panel and applied after the frame's UI pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    SelectMode(TransformMode),
    ToggleSnap,
    ToggleOrientation,
    SetTheme(UiTheme),
    /// Put the cube back at the origin
    ResetObject,
    /// Move the camera back to its configured pose
    ResetView,
    /// Restore default settings; renderer settings apply on next launch
    ResetSettings,
}

/// State owned by the application window
pub struct AppState {
    pub controller: GimbalController,
    pending_actions: Vec<AppAction>,
}

impl AppState {
    pub fn new(controller: GimbalController) -> Self {
        Self {
            controller,
            pending_actions: Vec::new(),
        }
    }

    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    pub fn take_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }
}

pub type SharedAppState = Arc<Mutex<AppState>>;
