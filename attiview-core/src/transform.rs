//! 3D transformation utilities

use nalgebra::{Matrix4, Point3, Unit, UnitQuaternion, Vector3};

/// An affine transformation applied to draw primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Counter-clockwise rotation by `degrees` about `axis`
    ///
    /// A zero axis yields the identity.
    pub fn rotation_degrees(degrees: f32, axis: Vector3<f32>) -> Self {
        match Unit::try_new(axis, f32::EPSILON) {
            Some(axis) => Self::rotation(UnitQuaternion::from_axis_angle(&axis, degrees.to_radians())),
            None => Self::identity(),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Compose this transformation with another; `other` applies first
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f32) -> bool {
        (self.matrix - Matrix4::identity()).norm() < epsilon
    }

    /// Column-major array for uniform upload
    pub fn to_cols_array(&self) -> [[f32; 4]; 4] {
        self.matrix.into()
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_degrees_is_counter_clockwise() {
        let rotate = Transform3D::rotation_degrees(90.0, Vector3::z());
        let p = rotate.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_compose_applies_right_operand_first() {
        let translate = Transform3D::translation(Vector3::new(0.0, 0.0, -0.7));
        let rotate = Transform3D::rotation_degrees(90.0, Vector3::z());
        let p = (translate * rotate).transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, -0.7), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        assert!(Transform3D::rotation_degrees(45.0, Vector3::zeros()).is_identity(1e-6));
    }
}
