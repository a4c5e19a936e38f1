//! Scene painter

use std::f32::consts::TAU;

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, vec2};
use glam::{Mat4, Vec3};
use gimbal_core::TransformMode;

use crate::projection::{ScreenPoint, project};
use crate::{CUBE_FACES, OrbitCamera, Scene, ViewportGizmo};

const AXIS_COLORS: [Color32; 3] = [
    Color32::from_rgb(230, 60, 60),
    Color32::from_rgb(80, 200, 80),
    Color32::from_rgb(70, 120, 240),
];
const ACTIVE_COLOR: Color32 = Color32::from_rgb(255, 220, 60);
const EDGE_COLOR: Color32 = Color32::from_rgb(90, 60, 20);
const RING_SEGMENTS: usize = 48;

/// Convert an RGBA (0.0-1.0) color, darkened by `shade`
pub fn to_color32(rgba: [f32; 4], shade: f32) -> Color32 {
    let channel = |v: f32| (v * shade).clamp(0.0, 1.0) * 255.0;
    Color32::from_rgba_unmultiplied(
        channel(rgba[0]) as u8,
        channel(rgba[1]) as u8,
        channel(rgba[2]) as u8,
        (rgba[3].clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Paints the cube and gizmo into a viewport rect
pub struct SceneRenderer {
    edge_stroke: Stroke,
    handle_width: f32,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self {
            edge_stroke: Stroke::new(1.0, EDGE_COLOR),
            handle_width: 3.0,
        }
    }

    /// Screen position of the gizmo origin, if it is in front of the camera
    pub fn gizmo_origin(&self, rect: Rect, scene: &Scene, camera: &OrbitCamera) -> Option<Pos2> {
        let view_proj = camera.view_projection(rect.aspect_ratio());
        project(&view_proj, scene.cube.transform.translation, rect).map(|p| p.pos)
    }

    pub fn paint(
        &self,
        painter: &Painter,
        rect: Rect,
        scene: &Scene,
        camera: &OrbitCamera,
        gizmo: &ViewportGizmo,
    ) {
        painter.rect_filled(rect, 0.0, to_color32(scene.background_color, 1.0));

        let view_proj = camera.view_projection(rect.aspect_ratio());
        self.paint_cube(painter, rect, &view_proj, scene, camera);
        self.paint_gizmo(painter, rect, &view_proj, scene, camera, gizmo);
    }

    fn paint_cube(
        &self,
        painter: &Painter,
        rect: Rect,
        view_proj: &Mat4,
        scene: &Scene,
        camera: &OrbitCamera,
    ) {
        let cube = &scene.cube;
        let corners = cube.world_corners();
        let projected: Vec<Option<ScreenPoint>> = corners
            .iter()
            .map(|&c| project(view_proj, c, rect))
            .collect();
        let eye = camera.eye();

        let mut faces: Vec<(f32, Vec<Pos2>, Color32)> = Vec::with_capacity(CUBE_FACES.len());
        for face in CUBE_FACES.iter() {
            let normal = cube.world_normal(face);
            let center = face
                .corners
                .iter()
                .fold(Vec3::ZERO, |acc, &i| acc + corners[i])
                / 4.0;
            if normal.dot(eye - center) <= 0.0 {
                continue;
            }

            let Some(points) = face
                .corners
                .iter()
                .map(|&i| projected[i])
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };

            let depth = points.iter().map(|p| p.depth).sum::<f32>() / points.len() as f32;
            let fill = to_color32(cube.color, scene.light.shade(normal));
            faces.push((depth, points.into_iter().map(|p| p.pos).collect(), fill));
        }

        // Far faces first
        faces.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (_, points, fill) in faces {
            painter.add(Shape::convex_polygon(points, fill, self.edge_stroke));
        }
    }

    fn paint_gizmo(
        &self,
        painter: &Painter,
        rect: Rect,
        view_proj: &Mat4,
        scene: &Scene,
        camera: &OrbitCamera,
        gizmo: &ViewportGizmo,
    ) {
        let object = &scene.cube.transform;
        let Some(origin) = project(view_proj, object.translation, rect) else {
            return;
        };

        let length = gizmo.settings().handle_length * camera.world_per_pixel(rect.height());
        let axes = gizmo.axes(object);
        let mode = gizmo.config().mode;
        let dragging = gizmo.is_dragging();

        if mode == TransformMode::Rotate {
            let color = if dragging { ACTIVE_COLOR } else { AXIS_COLORS[1] };
            let ring: Vec<Pos2> = (0..RING_SEGMENTS)
                .filter_map(|i| {
                    let t = i as f32 / RING_SEGMENTS as f32 * TAU;
                    let point = object.translation + (axes[0] * t.cos() + axes[2] * t.sin()) * length;
                    project(view_proj, point, rect).map(|p| p.pos)
                })
                .collect();
            if ring.len() == RING_SEGMENTS {
                painter.add(Shape::closed_line(ring, Stroke::new(self.handle_width, color)));
            }
        }

        for (axis, base_color) in axes.iter().zip(AXIS_COLORS) {
            let Some(tip) = project(view_proj, object.translation + *axis * length, rect) else {
                continue;
            };
            let color = if dragging { ACTIVE_COLOR } else { base_color };
            painter.line_segment([origin.pos, tip.pos], Stroke::new(self.handle_width, color));

            match mode {
                TransformMode::Translate => {
                    painter.circle_filled(tip.pos, 5.0, color);
                }
                TransformMode::Scale => {
                    painter.rect_filled(Rect::from_center_size(tip.pos, vec2(9.0, 9.0)), 0.0, color);
                }
                TransformMode::Rotate => {}
            }
        }

        painter.circle_filled(origin.pos, 4.0, Color32::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color32() {
        assert_eq!(to_color32([1.0, 0.5, 0.0, 1.0], 1.0), Color32::from_rgb(255, 127, 0));
        assert_eq!(to_color32([1.0, 1.0, 1.0, 1.0], 0.0), Color32::from_rgb(0, 0, 0));
        assert_eq!(to_color32([2.0, -1.0, 0.0, 1.0], 1.0), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_gizmo_origin_at_cube() {
        let renderer = SceneRenderer::default();
        let scene = Scene::default();
        let camera = OrbitCamera::default();
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(640.0, 480.0));

        let origin = renderer.gizmo_origin(rect, &scene, &camera).unwrap();
        assert!((origin - rect.center()).length() < 0.5);
    }
}
