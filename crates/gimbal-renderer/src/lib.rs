//! Gimbal Cube Renderer
//!
//! Scene collaborator for the gimbal controller, drawn with the egui painter.
//!
//! # Architecture
//!
//! - [`camera::OrbitCamera`] - Orbit navigation, implements `OrbitSwitch`
//! - [`scene::Scene`] - The cube, its transform and the lights
//! - [`gizmo::ViewportGizmo`] - Transform gizmo, implements `GizmoHandle`
//! - [`renderer::SceneRenderer`] - Paints the scene into a viewport rect
//!
//! # Example
//!
//! ```ignore
//! use gimbal_renderer::{OrbitCamera, RendererConfig, Scene, SceneRenderer, ViewportGizmo};
//!
//! let config = RendererConfig::default();
//! let scene = Scene::new(&config);
//! let camera = OrbitCamera::from_config(&config.camera);
//! let gizmo = ViewportGizmo::new(config.gizmo.clone());
//! SceneRenderer::new().paint(&painter, rect, &scene, &camera, &gizmo);
//! ```

pub mod camera;
pub mod config;
pub mod light;
pub mod projection;
pub mod renderer;
pub mod scene;
pub mod gizmo;

pub use camera::*;
pub use config::{CameraConfig, GizmoSettings, RendererConfig};
pub use gizmo::*;
pub use light::*;
pub use renderer::*;
pub use scene::*;
