//! Scene primitives: a shape, a shared material, and selection state.

use std::sync::Arc;

use crate::{GeometryError, HitRecord, Hittable, Material, Plane, Polygon, SceneId, Sphere};
use prism_math::{Interval, Point3, Ray, Vec3};

/// Uniform scale applied to selected geometry for the expanded-hit pass.
pub const EXPANSION_COEFFICIENT: f64 = 1.05;

/// Geometric part of an intersection, before material/object are attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SurfaceHit {
    pub t: f64,
    /// Unit normal pointing out of the surface
    pub outward_normal: Vec3,
}

/// The closed set of supported shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Polygon(Polygon),
}

impl Shape {
    /// Anchor point: sphere center, plane point, or polygon centroid.
    pub fn position(&self) -> Point3 {
        match self {
            Shape::Sphere(sphere) => sphere.center(),
            Shape::Plane(plane) => plane.point(),
            Shape::Polygon(polygon) => polygon.centroid(),
        }
    }

    fn set_position(&mut self, position: Point3) {
        match self {
            Shape::Sphere(sphere) => sphere.set_center(position),
            Shape::Plane(plane) => plane.set_point(position),
            Shape::Polygon(polygon) => polygon.set_centroid(position),
        }
    }

    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray, ray_t),
            Shape::Plane(plane) => plane.intersect(ray, ray_t),
            Shape::Polygon(polygon) => polygon.intersect(ray, ray_t),
        }
    }

    /// Intersect against the shape scaled by `factor` around its anchor.
    fn intersect_scaled(&self, ray: &Ray, ray_t: Interval, factor: f64) -> Option<SurfaceHit> {
        match self {
            Shape::Sphere(sphere) => sphere.scaled(factor).intersect(ray, ray_t),
            // An infinite plane is unchanged by scaling about one of its points
            Shape::Plane(plane) => plane.intersect(ray, ray_t),
            Shape::Polygon(polygon) => polygon.scaled(factor).intersect(ray, ray_t),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

/// A renderable object.
///
/// The material is shared (`Arc`), so several primitives can reference one
/// material whose lifetime is independent of any scene. `parent` is set
/// by the scene on insertion and survives cloning.
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    material: Arc<Material>,
    selected: bool,
    pub(crate) parent: Option<SceneId>,
}

impl Primitive {
    pub fn new(shape: impl Into<Shape>, material: Arc<Material>) -> Self {
        Self {
            shape: shape.into(),
            material,
            selected: false,
            parent: None,
        }
    }

    pub fn sphere(
        center: Point3,
        radius: f64,
        material: Arc<Material>,
    ) -> Result<Self, GeometryError> {
        Ok(Self::new(Sphere::new(center, radius)?, material))
    }

    pub fn plane(
        point: Point3,
        normal: Vec3,
        material: Arc<Material>,
    ) -> Result<Self, GeometryError> {
        Ok(Self::new(Plane::new(point, normal)?, material))
    }

    pub fn polygon(
        vertices: Vec<Point3>,
        material: Arc<Material>,
    ) -> Result<Self, GeometryError> {
        Ok(Self::new(Polygon::new(vertices)?, material))
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn position(&self) -> Point3 {
        self.shape.position()
    }

    /// Move the primitive so its anchor lands on `position`.
    pub fn set_position(&mut self, position: Point3) {
        self.shape.set_position(position);
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Scene that owns this primitive, if it has been inserted into one.
    pub fn parent(&self) -> Option<SceneId> {
        self.parent
    }

    /// Hit test that also accepts the slightly enlarged geometry of a
    /// selected primitive.
    ///
    /// Unselected primitives never report anything here. A selected one
    /// first tries the ordinary hit; only if that misses is the scaled
    /// shape tried, and such a hit is marked `hit_expanded`.
    pub fn hit_expanded<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        if !self.selected {
            return None;
        }
        if let Some(rec) = self.hit(ray, ray_t) {
            return Some(rec);
        }

        let surface = self
            .shape
            .intersect_scaled(ray, ray_t, EXPANSION_COEFFICIENT)?;
        let mut rec = HitRecord::new(ray, surface.t, surface.outward_normal, self);
        rec.hit_expanded = true;
        Some(rec)
    }
}

impl Hittable for Primitive {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let surface = self.shape.intersect(ray, ray_t)?;
        Some(HitRecord::new(ray, surface.t, surface.outward_normal, self))
    }
}
