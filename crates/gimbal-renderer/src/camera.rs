//! Orbit camera

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};
use gimbal_core::OrbitSwitch;

use crate::config::CameraConfig;

/// Keeps the camera off the poles
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const MIN_DISTANCE: f32 = 0.5;

/// Camera orbiting a target point
///
/// Input is ignored while orbiting is switched off by the drag arbiter.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Rotation around world Y (radians)
    pub yaw: f32,
    /// Elevation above the XZ plane (radians)
    pub pitch: f32,
    pub distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    enabled: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    /// Place the camera at `eye`, looking at `target`
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(MIN_DISTANCE);
        let defaults = CameraConfig::default();
        Self {
            target,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
            fov_degrees: defaults.fov_degrees,
            near: defaults.near_plane,
            far: defaults.far_plane,
            rotate_sensitivity: defaults.rotate_sensitivity,
            zoom_sensitivity: defaults.zoom_sensitivity,
            enabled: true,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::from_eye(Vec3::from(config.position), Vec3::ZERO);
        camera.apply_config(config);
        camera
    }

    /// Apply lens and sensitivity settings, keeping the current pose
    pub fn apply_config(&mut self, config: &CameraConfig) {
        self.fov_degrees = config.fov_degrees;
        self.near = config.near_plane;
        self.far = config.far_plane;
        self.rotate_sensitivity = config.rotate_sensitivity;
        self.zoom_sensitivity = config.zoom_sensitivity;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect.max(1e-3), self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// World units covered by one pixel at the target distance
    pub fn world_per_pixel(&self, viewport_height: f32) -> f32 {
        let half_fov = self.fov_degrees.to_radians() * 0.5;
        2.0 * self.distance * half_fov.tan() / viewport_height.max(1.0)
    }

    /// Orbit by a pointer delta in pixels; returns false while disabled
    pub fn rotate(&mut self, dx: f32, dy: f32) -> bool {
        if !self.enabled {
            return false;
        }
        self.yaw -= dx * self.rotate_sensitivity;
        self.pitch = (self.pitch + dy * self.rotate_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        true
    }

    /// Dolly toward the target; positive `delta` zooms in
    pub fn zoom(&mut self, delta: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let factor = (1.0 - delta * self.zoom_sensitivity).max(0.1);
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, self.far * 0.5);
        true
    }
}

impl OrbitSwitch for OrbitCamera {
    fn set_orbit_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
