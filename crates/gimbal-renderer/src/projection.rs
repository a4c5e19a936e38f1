//! World to viewport projection helpers

use egui::{Pos2, Rect, pos2};
use glam::{Mat4, Vec3};

/// A point projected into a viewport rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub pos: Pos2,
    /// Normalized device depth, smaller is closer
    pub depth: f32,
}

/// Project a world point into `rect`; None if it is behind the camera
pub fn project(view_proj: &Mat4, point: Vec3, rect: Rect) -> Option<ScreenPoint> {
    let clip = *view_proj * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(ScreenPoint {
        pos: pos2(
            rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
            rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
        ),
        depth: ndc.z,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrbitCamera;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_projects_to_center() {
        let camera = OrbitCamera::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let view_proj = camera.view_projection(rect.aspect_ratio());

        let p = project(&view_proj, Vec3::ZERO, rect).unwrap();
        assert_relative_eq!(p.pos.x, 400.0, epsilon = 1e-2);
        assert_relative_eq!(p.pos.y, 300.0, epsilon = 1e-2);
    }

    #[test]
    fn test_behind_camera_is_culled() {
        let camera = OrbitCamera::default();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let view_proj = camera.view_projection(rect.aspect_ratio());
        assert!(project(&view_proj, Vec3::new(20.0, 20.0, 20.0), rect).is_none());
    }
}
