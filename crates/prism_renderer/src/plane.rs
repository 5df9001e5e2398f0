//! Infinite plane primitive.

use crate::{primitive::SurfaceHit, GeometryError};
use prism_math::{Interval, Point3, Ray, Vec3};

/// Below this |dot(normal, direction)| the ray counts as parallel.
pub(crate) const PARALLEL_EPSILON: f64 = 1e-12;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Vec3,
}

impl Plane {
    /// Create a new plane. The normal is normalized here.
    pub fn new(point: Point3, normal: Vec3) -> Result<Self, GeometryError> {
        let normal = normal.try_normalize().ok_or(GeometryError::ZeroNormal)?;
        Ok(Self { point, normal })
    }

    pub fn point(&self) -> Point3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub(crate) fn set_point(&mut self, point: Point3) {
        self.point = point;
    }

    pub(crate) fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        intersect_plane(self.point, self.normal, ray, ray_t).map(|t| {
            // Planes are two-sided: always present the side facing the ray
            let outward_normal = if self.normal.dot(ray.direction) > 0.0 {
                -self.normal
            } else {
                self.normal
            };
            SurfaceHit { t, outward_normal }
        })
    }
}

/// Solve `dot(N, O + tD - P0) = 0` for t.
///
/// Parallel rays and non-finite solutions are misses.
pub(crate) fn intersect_plane(
    point: Point3,
    normal: Vec3,
    ray: &Ray,
    ray_t: Interval,
) -> Option<f64> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = normal.dot(point - ray.origin) / denom;
    if !t.is_finite() || !ray_t.surrounds(t) {
        return None;
    }
    Some(t)
}
