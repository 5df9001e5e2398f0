//! Sphere primitive for ray tracing.

use crate::{primitive::SurfaceHit, GeometryError};
use prism_math::{Interval, Point3, Ray, Vec3};

/// A sphere shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64) -> Result<Self, GeometryError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub(crate) fn set_center(&mut self, center: Point3) {
        self.center = center;
    }

    /// Same sphere with its radius multiplied by `factor`.
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            center: self.center,
            radius: self.radius * factor,
        }
    }

    pub(crate) fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        // Half-b form of the quadratic avoids cancellation in b² - 4ac
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal: Vec3 = (ray.at(root) - self.center) / self.radius;
        Some(SurfaceHit {
            t: root,
            outward_normal,
        })
    }
}
