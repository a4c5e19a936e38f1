//! Renderer configuration

use serde::{Deserialize, Serialize};

/// Camera settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Initial eye position
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Radians of orbit per dragged pixel
    pub rotate_sensitivity: f32,
    /// Fraction of distance zoomed per scroll point
    pub zoom_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [5.0, 5.0, 5.0],
            fov_degrees: 50.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            rotate_sensitivity: 0.01,
            zoom_sensitivity: 0.002,
        }
    }
}

/// Gizmo interaction settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GizmoSettings {
    /// Axis handle length in pixels
    pub handle_length: f32,
    /// Pointer radius around the gizmo origin that grabs the gizmo
    pub grab_radius: f32,
    /// Radians of rotation per dragged pixel
    pub rotate_sensitivity: f32,
    /// Scale factor change per dragged pixel
    pub scale_sensitivity: f32,
}

impl Default for GizmoSettings {
    fn default() -> Self {
        Self {
            handle_length: 80.0,
            grab_radius: 90.0,
            rotate_sensitivity: 0.01,
            scale_sensitivity: 0.005,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RendererConfig {
    /// Viewport clear color (RGBA, 0.0-1.0)
    pub background_color: [f32; 4],
    /// Cube base color (RGBA, 0.0-1.0)
    pub cube_color: [f32; 4],
    pub ambient_intensity: f32,
    pub light_position: [f32; 3],
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub gizmo: GizmoSettings,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            // #dcdcdc
            background_color: [0.863, 0.863, 0.863, 1.0],
            // orange
            cube_color: [1.0, 0.647, 0.0, 1.0],
            ambient_intensity: 0.5,
            light_position: [5.0, 5.0, 5.0],
            camera: CameraConfig::default(),
            gizmo: GizmoSettings::default(),
        }
    }
}
