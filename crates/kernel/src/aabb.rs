use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The six face coordinates of an axis-aligned box.
///
/// `front` faces +z (toward the camera), `back` faces -z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Faces {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    pub front: f32,
    pub back: f32,
}

impl Faces {
    /// Derive faces from a center and half-extents.
    pub fn from_center(center: Vec3, half: Vec3) -> Self {
        Self {
            top: center.y + half.y,
            bottom: center.y - half.y,
            left: center.x - half.x,
            right: center.x + half.x,
            front: center.z + half.z,
            back: center.z - half.z,
        }
    }
}

/// Axis-aligned box: a movable center with fixed half-extents.
///
/// Faces are never cached; [`Aabb::faces`] derives them from the current
/// center, so no caller can observe faces from before a position change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    half: Vec3,
}

impl Aabb {
    /// `size` is full width/height/depth. Callers validate it is positive.
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half
    }

    pub fn size(&self) -> Vec3 {
        self.half * 2.0
    }

    pub fn faces(&self) -> Faces {
        Faces::from_center(self.center, self.half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_from_unit_cube_at_origin() {
        let f = Aabb::new(Vec3::ZERO, Vec3::ONE).faces();
        assert_eq!(f.top, 0.5);
        assert_eq!(f.bottom, -0.5);
        assert_eq!(f.left, -0.5);
        assert_eq!(f.right, 0.5);
        assert_eq!(f.front, 0.5);
        assert_eq!(f.back, -0.5);
    }

    #[test]
    fn ground_slab_faces() {
        let f = Aabb::new(Vec3::new(0.0, -2.0, 0.0), Vec3::new(10.0, 0.5, 50.0)).faces();
        assert_eq!(f.top, -1.75);
        assert_eq!(f.bottom, -2.25);
        assert_eq!(f.left, -5.0);
        assert_eq!(f.right, 5.0);
        assert_eq!(f.back, -25.0);
        assert_eq!(f.front, 25.0);
    }

    #[test]
    fn faces_follow_center() {
        let mut b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        b.center = Vec3::new(3.0, 1.0, -2.0);
        let f = b.faces();
        assert_eq!(f.left, 2.5);
        assert_eq!(f.bottom, 0.5);
        assert_eq!(f.back, -2.5);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let b = Aabb::new(Vec3::new(0.3, -1.7, 12.25), Vec3::new(1.0, 2.0, 0.5));
        assert_eq!(b.faces(), b.faces());
        assert_eq!(b.size(), Vec3::new(1.0, 2.0, 0.5));
    }
}
