//! Gimbal Cube Frontend
//!
//! egui application that edits a single cube through the gimbal controller.

mod app;
mod app_state;
mod config;
mod input;
mod panels;
mod viewport_state;

pub use app::GimbalApp;
pub use config::{AppConfig, ConfigError, ConfigManager, EditorConfig, UiConfig, UiTheme};
