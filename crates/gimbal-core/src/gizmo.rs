//! Gizmo handle seam
//!
//! The gizmo handle is owned by the renderer. The controller only ever sees
//! it through [`GizmoHandle`], and only writes a [`GizmoConfig`] to it.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::{Orientation, SnapSpec, TransformMode, compute_snap};

/// Configuration surface of an on-screen transform gizmo
pub trait GizmoHandle {
    fn set_mode(&mut self, mode: TransformMode);

    fn set_space(&mut self, space: Orientation);

    /// `None` disables translation snapping
    fn set_translation_snap(&mut self, step: Option<f32>);

    /// `None` disables rotation snapping (radians)
    fn set_rotation_snap(&mut self, step: Option<f32>);

    /// `None` disables scale snapping
    fn set_scale_snap(&mut self, step: Option<f32>);
}

/// Gizmo handle shared between the renderer (owner) and the controller
pub type SharedGizmoHandle = Arc<Mutex<dyn GizmoHandle>>;

/// Non-owning reference the controller keeps to a mounted handle
pub type WeakGizmoHandle = Weak<Mutex<dyn GizmoHandle>>;

/// Everything the controller writes to a gizmo handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoConfig {
    pub mode: TransformMode,
    pub space: Orientation,
    pub translation_snap: Option<f32>,
    pub rotation_snap: Option<f32>,
    pub scale_snap: Option<f32>,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self::reconcile(TransformMode::default(), Orientation::default(), false)
    }
}

impl GizmoConfig {
    /// Derive the handle configuration from controller state
    ///
    /// Only the active mode's increment is set; the other two are cleared.
    pub fn reconcile(mode: TransformMode, space: Orientation, snap_enabled: bool) -> Self {
        let snap = compute_snap(mode, snap_enabled);
        let (mut translation_snap, mut rotation_snap, mut scale_snap) = (None, None, None);
        match snap {
            SnapSpec::Distance(step) => translation_snap = Some(step),
            SnapSpec::Angle(step) => rotation_snap = Some(step),
            SnapSpec::Scale(step) => scale_snap = Some(step),
            SnapSpec::None => {}
        }

        Self {
            mode,
            space,
            translation_snap,
            rotation_snap,
            scale_snap,
        }
    }

    /// The snap increment for the configured mode
    pub fn snap(&self) -> SnapSpec {
        match self.mode {
            TransformMode::Translate => self.translation_snap.map_or(SnapSpec::None, SnapSpec::Distance),
            TransformMode::Rotate => self.rotation_snap.map_or(SnapSpec::None, SnapSpec::Angle),
            TransformMode::Scale => self.scale_snap.map_or(SnapSpec::None, SnapSpec::Scale),
        }
    }
}

/// Write a configuration record to a handle
pub fn apply(config: &GizmoConfig, handle: &mut dyn GizmoHandle) {
    handle.set_mode(config.mode);
    handle.set_space(config.space);
    handle.set_translation_snap(config.translation_snap);
    handle.set_rotation_snap(config.rotation_snap);
    handle.set_scale_snap(config.scale_snap);
}
