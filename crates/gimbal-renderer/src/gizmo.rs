//! On-screen transform gizmo
//!
//! [`ViewportGizmo`] is the handle the gimbal controller configures. It turns
//! pointer drags into transform updates, quantized by whatever snap increment
//! the controller last applied.

use egui::{Pos2, Vec2};
use glam::{Quat, Vec3};
use gimbal_core::{GizmoConfig, GizmoHandle, Orientation, SnapSpec, TransformMode};

use crate::{GizmoSettings, OrbitCamera, Transform};

/// Smallest scale factor a drag can produce
pub const MIN_SCALE: f32 = 0.01;

/// Pointer-capture events the controller subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoEvent {
    DragStarted,
    DragEnded,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    start: Transform,
    /// Pointer travel since the drag began, in pixels
    accumulated: Vec2,
}

/// Gizmo handle mounted in the viewport
pub struct ViewportGizmo {
    config: GizmoConfig,
    settings: GizmoSettings,
    drag: Option<DragState>,
}

impl Default for ViewportGizmo {
    fn default() -> Self {
        Self::new(GizmoSettings::default())
    }
}

impl ViewportGizmo {
    pub fn new(settings: GizmoSettings) -> Self {
        Self {
            config: GizmoConfig::default(),
            settings,
            drag: None,
        }
    }

    /// Configuration as last written by the controller
    pub fn config(&self) -> &GizmoConfig {
        &self.config
    }

    pub fn settings(&self) -> &GizmoSettings {
        &self.settings
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether a pointer at `pointer` grabs a gizmo drawn at `origin`
    pub fn hit_test(&self, pointer: Pos2, origin: Pos2) -> bool {
        pointer.distance(origin) <= self.settings.grab_radius
    }

    /// Axis directions in world space for the configured orientation
    pub fn axes(&self, object: &Transform) -> [Vec3; 3] {
        match self.config.space {
            Orientation::World => [Vec3::X, Vec3::Y, Vec3::Z],
            Orientation::Local => [
                object.rotation * Vec3::X,
                object.rotation * Vec3::Y,
                object.rotation * Vec3::Z,
            ],
        }
    }

    /// Pointer down on the gizmo
    pub fn begin_drag(&mut self, object: &Transform) -> Option<GizmoEvent> {
        if self.drag.is_some() {
            return None;
        }
        self.drag = Some(DragState {
            start: *object,
            accumulated: Vec2::ZERO,
        });
        tracing::debug!("Gizmo drag started ({})", self.config.mode.name());
        Some(GizmoEvent::DragStarted)
    }

    /// Pointer moved while captured; returns the new object transform
    pub fn drag(
        &mut self,
        delta: Vec2,
        camera: &OrbitCamera,
        viewport_height: f32,
    ) -> Option<Transform> {
        let drag = self.drag.as_mut()?;
        drag.accumulated += delta;
        let drag = *drag;

        let snap = self.config.snap();
        let transform = match self.config.mode {
            TransformMode::Translate => {
                let scale = camera.world_per_pixel(viewport_height);
                let offset = (camera.right() * drag.accumulated.x
                    - camera.up() * drag.accumulated.y)
                    * scale;
                self.translate(&drag.start, offset, snap)
            }
            TransformMode::Rotate => {
                let angle = drag.accumulated.x * self.settings.rotate_sensitivity;
                self.rotate(&drag.start, angle, snap)
            }
            TransformMode::Scale => {
                let factor = 1.0 - drag.accumulated.y * self.settings.scale_sensitivity;
                self.scale(&drag.start, factor, snap)
            }
        };
        Some(transform)
    }

    /// Pointer released or capture lost
    pub fn end_drag(&mut self) -> Option<GizmoEvent> {
        let drag = self.drag.take()?;
        tracing::debug!("Gizmo drag ended after {:?} px", drag.accumulated);
        Some(GizmoEvent::DragEnded)
    }

    /// Move by a world-space offset
    ///
    /// World space snaps the resulting position to the grid; local space
    /// snaps the offset along the object's own axes.
    pub fn translate(&self, start: &Transform, offset: Vec3, snap: SnapSpec) -> Transform {
        let translation = match self.config.space {
            Orientation::World => snap.snap_vec3(start.translation + offset),
            Orientation::Local => {
                let local = start.rotation.inverse() * offset;
                start.translation + start.rotation * snap.snap_vec3(local)
            }
        };
        Transform {
            translation,
            ..*start
        }
    }

    /// Turn about the vertical axis of the active frame
    pub fn rotate(&self, start: &Transform, angle: f32, snap: SnapSpec) -> Transform {
        let angle = snap.snap(angle);
        let rotation = match self.config.space {
            Orientation::World => Quat::from_rotation_y(angle) * start.rotation,
            Orientation::Local => start.rotation * Quat::from_rotation_y(angle),
        };
        Transform {
            rotation: rotation.normalize(),
            ..*start
        }
    }

    /// Uniformly scale by `factor`; scale always acts in the object's frame
    ///
    /// With snapping on, the floor is one increment so the result stays on
    /// the snap grid.
    pub fn scale(&self, start: &Transform, factor: f32, snap: SnapSpec) -> Transform {
        let floor = snap.increment().map_or(MIN_SCALE, |step| step.max(MIN_SCALE));
        let scale = snap
            .snap_vec3(start.scale * factor)
            .max(Vec3::splat(floor));
        Transform { scale, ..*start }
    }
}

impl GizmoHandle for ViewportGizmo {
    fn set_mode(&mut self, mode: TransformMode) {
        self.config.mode = mode;
    }

    fn set_space(&mut self, space: Orientation) {
        self.config.space = space;
    }

    fn set_translation_snap(&mut self, step: Option<f32>) {
        self.config.translation_snap = step;
    }

    fn set_rotation_snap(&mut self, step: Option<f32>) {
        self.config.rotation_snap = step;
    }

    fn set_scale_snap(&mut self, step: Option<f32>) {
        self.config.scale_snap = step;
    }
}
