//! Scene lighting

use glam::Vec3;

/// Ambient term plus one directional light
#[derive(Debug, Clone, Copy)]
pub struct SceneLight {
    /// Direction pointing toward the light (normalized)
    pub direction: Vec3,
    pub intensity: f32,
    pub ambient: f32,
}

impl Default for SceneLight {
    fn default() -> Self {
        Self::from_position(Vec3::new(5.0, 5.0, 5.0), 0.5)
    }
}

impl SceneLight {
    /// Directional light shining from `position` toward the origin
    pub fn from_position(position: Vec3, ambient: f32) -> Self {
        Self {
            direction: position.normalize_or(Vec3::Y),
            intensity: 1.0,
            ambient,
        }
    }

    /// Brightness multiplier for a surface with world normal `normal`
    pub fn shade(&self, normal: Vec3) -> f32 {
        let diffuse = normal.normalize_or_zero().dot(self.direction).max(0.0) * self.intensity;
        (self.ambient + diffuse).min(1.0)
    }
}
