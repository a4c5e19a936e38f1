//! Scene contents: one cube and its lighting

use glam::{Mat4, Quat, Vec3};

use crate::{RendererConfig, SceneLight};

/// Translation, rotation and scale of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Unit cube corners, centered on the origin
pub const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

/// A cube face: corner indices (counter-clockwise seen from outside) and normal
#[derive(Debug, Clone, Copy)]
pub struct CubeFace {
    pub corners: [usize; 4],
    pub normal: Vec3,
}

pub const CUBE_FACES: [CubeFace; 6] = [
    CubeFace { corners: [1, 2, 6, 5], normal: Vec3::X },
    CubeFace { corners: [0, 4, 7, 3], normal: Vec3::NEG_X },
    CubeFace { corners: [3, 7, 6, 2], normal: Vec3::Y },
    CubeFace { corners: [0, 1, 5, 4], normal: Vec3::NEG_Y },
    CubeFace { corners: [4, 5, 6, 7], normal: Vec3::Z },
    CubeFace { corners: [0, 3, 2, 1], normal: Vec3::NEG_Z },
];

/// The manipulated cube
#[derive(Debug, Clone)]
pub struct CubeObject {
    pub transform: Transform,
    /// RGBA, 0.0-1.0
    pub color: [f32; 4],
}

impl CubeObject {
    pub fn new(color: [f32; 4]) -> Self {
        Self {
            transform: Transform::IDENTITY,
            color,
        }
    }

    /// Corners in world space
    pub fn world_corners(&self) -> [Vec3; 8] {
        let model = self.transform.to_mat4();
        CUBE_CORNERS.map(|c| model.transform_point3(c))
    }

    /// Face normal in world space
    pub fn world_normal(&self, face: &CubeFace) -> Vec3 {
        // Inverse-transpose handles non-uniform scale
        let normal_matrix = self.transform.to_mat4().inverse().transpose();
        normal_matrix.transform_vector3(face.normal).normalize_or_zero()
    }
}

/// Everything the renderer draws besides the gizmo
#[derive(Debug, Clone)]
pub struct Scene {
    pub cube: CubeObject,
    pub light: SceneLight,
    pub background_color: [f32; 4],
}

impl Scene {
    pub fn new(config: &RendererConfig) -> Self {
        Self {
            cube: CubeObject::new(config.cube_color),
            light: SceneLight::from_position(
                Vec3::from(config.light_position),
                config.ambient_intensity,
            ),
            background_color: config.background_color,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&RendererConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_face_normals_point_outward() {
        for face in CUBE_FACES.iter() {
            let center = face
                .corners
                .iter()
                .fold(Vec3::ZERO, |acc, &i| acc + CUBE_CORNERS[i])
                / 4.0;
            assert_relative_eq!(center.dot(face.normal), 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_world_corners_follow_transform() {
        let mut cube = CubeObject::new([1.0; 4]);
        cube.transform.translation = Vec3::new(1.0, 2.0, 3.0);
        cube.transform.scale = Vec3::splat(2.0);

        let corners = cube.world_corners();
        assert_eq!(corners[0], Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(corners[6], Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_world_normal_rotates() {
        let mut cube = CubeObject::new([1.0; 4]);
        cube.transform.rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let n = cube.world_normal(&CUBE_FACES[0]);
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-5);
    }
}
