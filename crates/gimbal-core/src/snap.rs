//! Snap policy
//!
//! Maps the active transform mode and the snap toggle to the increment the
//! gizmo should quantize drags to. The increment is never stored; it is
//! derived from `(mode, enabled)` every time either changes.

use std::f32::consts::PI;

use glam::Vec3;

use crate::TransformMode;

/// Translation step in scene units
pub const TRANSLATION_SNAP: f32 = 1.0;
/// Rotation step in radians (10 degrees)
pub const ROTATION_SNAP: f32 = PI / 18.0;
/// Scale-factor step
pub const SCALE_SNAP: f32 = 0.1;

/// Snap increment for the active mode
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SnapSpec {
    /// Snap translation to multiples of this distance
    Distance(f32),
    /// Snap rotation to multiples of this angle (radians)
    Angle(f32),
    /// Snap scale factors to multiples of this step
    Scale(f32),
    /// No snapping
    #[default]
    None,
}

/// Compute the snap increment for a mode
pub fn compute_snap(mode: TransformMode, enabled: bool) -> SnapSpec {
    if !enabled {
        return SnapSpec::None;
    }
    match mode {
        TransformMode::Translate => SnapSpec::Distance(TRANSLATION_SNAP),
        TransformMode::Rotate => SnapSpec::Angle(ROTATION_SNAP),
        TransformMode::Scale => SnapSpec::Scale(SCALE_SNAP),
    }
}

impl SnapSpec {
    /// The raw increment, if snapping is active
    pub fn increment(&self) -> Option<f32> {
        match *self {
            SnapSpec::Distance(v) | SnapSpec::Angle(v) | SnapSpec::Scale(v) => Some(v),
            SnapSpec::None => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.increment().is_some()
    }

    /// Round a value to the nearest multiple of the increment
    pub fn snap(&self, value: f32) -> f32 {
        match self.increment() {
            Some(step) if step > 0.0 => (value / step).round() * step,
            _ => value,
        }
    }

    /// Component-wise [`SnapSpec::snap`]
    pub fn snap_vec3(&self, value: Vec3) -> Vec3 {
        Vec3::new(self.snap(value.x), self.snap(value.y), self.snap(value.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_disabled_is_none_for_every_mode() {
        for mode in TransformMode::ALL {
            assert_eq!(compute_snap(*mode, false), SnapSpec::None);
        }
    }

    #[test]
    fn test_enabled_constants() {
        assert_eq!(
            compute_snap(TransformMode::Translate, true),
            SnapSpec::Distance(1.0)
        );
        assert_eq!(compute_snap(TransformMode::Scale, true), SnapSpec::Scale(0.1));

        let SnapSpec::Angle(angle) = compute_snap(TransformMode::Rotate, true) else {
            panic!("rotate should snap by angle");
        };
        assert_relative_eq!(angle, 0.174_532_93, epsilon = 1e-6);
        assert_relative_eq!(angle.to_degrees(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_snap_value() {
        assert_relative_eq!(SnapSpec::Distance(1.0).snap(2.4), 2.0);
        assert_relative_eq!(SnapSpec::Distance(1.0).snap(-1.6), -2.0);
        assert_relative_eq!(SnapSpec::Scale(0.1).snap(1.234), 1.2, epsilon = 1e-6);
        assert_relative_eq!(SnapSpec::None.snap(1.234), 1.234);
    }

    #[test]
    fn test_snap_vec3() {
        let snapped = SnapSpec::Distance(1.0).snap_vec3(Vec3::new(0.4, 1.6, -2.2));
        assert_eq!(snapped, Vec3::new(0.0, 2.0, -2.0));
    }
}
