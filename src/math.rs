//! Math utilities: model-space vector conversions, transforms, bounding boxes

use crate::models::Vector3;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Convert a model-file Vector3 to a glam Vec3
pub fn vec3_from_model(v: Vector3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert a glam Vec3 to a model-file Vector3
pub fn vec3_to_model(v: Vec3) -> Vector3 {
    Vector3 {
        x: v.x,
        y: v.y,
        z: v.z,
    }
}

/// Build a transformation matrix from position, Euler rotation (radians, XYZ
/// order), and scale
pub fn build_transform(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    let rot = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    Mat4::from_scale_rotation_translation(scale, rot, position)
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box around a single point
    pub fn from_point(p: Vec3) -> Self {
        Aabb { min: p, max: p }
    }

    /// Box around a set of points; None for an empty set
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Aabb::from_point(first);
        for p in iter {
            bounds.expand(p);
        }
        Some(bounds)
    }

    /// Grow the box to contain a point
    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Union of two boxes
    pub fn union(self, other: Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest extent across the three axes
    pub fn max_dimension(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }

    /// True when the box has no extent on any axis
    pub fn is_degenerate(&self) -> bool {
        self.max_dimension() <= f32::EPSILON
    }
}
