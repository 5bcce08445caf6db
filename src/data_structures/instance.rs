//! Per-object transformation data.
//!
//! A [`Transform`] is stored the way scene objects are authored: a
//! non-uniform scale, one rotation angle per axis in degrees and a
//! translation. It is turned into a model matrix right before a draw.

use cgmath::{Deg, Matrix, Matrix4, SquareMatrix};

/// Scale, per-axis rotation (degrees) and translation of one drawn object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: cgmath::Vector3<f32>,
    /// Rotation around X, Y and Z in degrees.
    pub rotation: cgmath::Vector3<f32>,
    pub position: cgmath::Vector3<f32>,
}

impl Transform {
    /// Identity transform (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
            rotation: cgmath::Vector3::new(0.0, 0.0, 0.0),
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn from_arrays(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale: scale.into(),
            rotation: rotation.into(),
            position: position.into(),
        }
    }

    /// `translate * rotate_x * rotate_y * rotate_z * scale`.
    ///
    /// Z is the innermost rotation, so it is applied to the scaled mesh first.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Inverse-transpose of the model matrix, used to transform normals under
    /// non-uniform scale. Falls back to the model matrix for degenerate scales.
    pub fn normal_matrix(&self) -> Matrix4<f32> {
        let model = self.to_matrix();
        model.invert().map_or(model, |inverse| inverse.transpose())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
