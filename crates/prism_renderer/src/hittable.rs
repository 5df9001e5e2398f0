//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Primitive};
use prism_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Borrows the material and primitive it came from; records never outlive
/// the scene query that produced them.
#[derive(Clone, Copy, Debug)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub point: Point3,
    /// Unit surface normal, always facing against the incoming ray
    pub normal: Vec3,
    /// Ray parameter at the intersection
    pub t: f64,
    /// Whether the geometric outward normal already opposed the ray
    pub front_face: bool,
    /// Material of the primitive that was hit
    pub material: &'a Material,
    /// The primitive that was hit
    pub object: &'a Primitive,
    /// True when the hit only exists against the enlarged selection geometry
    pub hit_expanded: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record for `ray` at parameter `t` and orient the normal.
    ///
    /// `outward_normal` must be unit length.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, object: &'a Primitive) -> Self {
        let mut rec = Self {
            point: ray.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material: object.material(),
            object,
            hit_expanded: false,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection whose parameter lies strictly inside `ray_t`.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}
