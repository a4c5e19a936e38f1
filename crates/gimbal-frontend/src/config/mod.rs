//! Application configuration module
//!
//! This module handles application-wide configuration including renderer settings,
//! editor preferences, and UI settings.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use std::time::Duration;

use gimbal_renderer::RendererConfig;
use serde::{Deserialize, Serialize};

/// Editor preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Re-enable orbiting if a gizmo drag never reports its end (seconds)
    pub drag_timeout_secs: Option<f32>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_timeout_secs: Some(10.0),
        }
    }
}

impl EditorConfig {
    pub fn drag_timeout(&self) -> Option<Duration> {
        self.drag_timeout_secs
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f32(secs).ok())
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

impl UiTheme {
    pub const ALL: &'static [UiTheme] = &[UiTheme::Dark, UiTheme::Light];

    pub fn name(&self) -> &'static str {
        match self {
            UiTheme::Dark => "Dark",
            UiTheme::Light => "Light",
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        match self {
            UiTheme::Dark => egui::Visuals::dark(),
            UiTheme::Light => egui::Visuals::light(),
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// UI theme
    pub theme: UiTheme,
    /// Font size multiplier
    pub font_size: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Dark,
            font_size: 1.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Renderer settings
    #[serde(default)]
    pub renderer: RendererConfig,
    /// Editor settings
    #[serde(default)]
    pub editor: EditorConfig,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_timeout() {
        let mut editor = EditorConfig::default();
        assert_eq!(editor.drag_timeout(), Some(Duration::from_secs(10)));

        editor.drag_timeout_secs = None;
        assert_eq!(editor.drag_timeout(), None);

        editor.drag_timeout_secs = Some(-1.0);
        assert_eq!(editor.drag_timeout(), None);

        editor.drag_timeout_secs = Some(f32::NAN);
        assert_eq!(editor.drag_timeout(), None);
    }

    #[test]
    fn test_out_of_range_drag_timeout_is_ignored() {
        let config: AppConfig = ron::from_str("(editor: (drag_timeout_secs: Some(1e30)))").unwrap();
        assert_eq!(config.editor.drag_timeout(), None);

        let editor = EditorConfig {
            drag_timeout_secs: Some(f32::INFINITY),
        };
        assert_eq!(editor.drag_timeout(), None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = ron::from_str("(version: 1, ui: (theme: Light, font_size: 1.25))").unwrap();
        assert_eq!(config.ui.theme, UiTheme::Light);
        assert_eq!(config.renderer, RendererConfig::default());
        assert_eq!(config.editor, EditorConfig::default());
    }
}
