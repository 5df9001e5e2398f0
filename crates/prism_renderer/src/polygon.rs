//! Planar polygon primitive.
//!
//! The polygon's plane comes from its first three vertices; inside/outside
//! classification projects onto the coordinate plane that drops the
//! normal's dominant axis and runs a crossing-number test there.

use crate::{plane::intersect_plane, primitive::SurfaceHit, GeometryError};
use prism_math::{Interval, Point3, Ray, Vec3};

/// A planar polygon with an ordered vertex loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
    normal: Vec3,
    centroid: Point3,
}

impl Polygon {
    /// Create a polygon. Vertices are assumed coplanar.
    pub fn new(vertices: Vec<Point3>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }

        let edge1 = vertices[1] - vertices[0];
        let edge2 = vertices[2] - vertices[0];
        let normal = edge1
            .cross(edge2)
            .try_normalize()
            .ok_or(GeometryError::DegeneratePolygon)?;

        let centroid = vertices.iter().copied().sum::<Point3>() / vertices.len() as f64;

        Ok(Self {
            vertices,
            normal,
            centroid,
        })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn centroid(&self) -> Point3 {
        self.centroid
    }

    /// Move the polygon so its centroid lands on `centroid`.
    pub(crate) fn set_centroid(&mut self, centroid: Point3) {
        let offset = centroid - self.centroid;
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
        self.centroid = centroid;
    }

    /// Same polygon uniformly scaled by `factor` around its centroid.
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|&v| self.centroid + (v - self.centroid) * factor)
                .collect(),
            normal: self.normal,
            centroid: self.centroid,
        }
    }

    pub(crate) fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let t = intersect_plane(self.centroid, self.normal, ray, ray_t)?;

        if !self.contains_coplanar(ray.at(t)) {
            return None;
        }

        Some(SurfaceHit {
            t,
            outward_normal: self.normal,
        })
    }

    /// Crossing-number test for a point already on the polygon's plane.
    fn contains_coplanar(&self, point: Point3) -> bool {
        let (u_axis, v_axis) = projection_axes(self.normal);
        let (px, py) = (point[u_axis], point[v_axis]);

        let mut inside = false;
        let mut j = self.vertices.len() - 1;
        for i in 0..self.vertices.len() {
            let (xi, yi) = (self.vertices[i][u_axis], self.vertices[i][v_axis]);
            let (xj, yj) = (self.vertices[j][u_axis], self.vertices[j][v_axis]);

            if (yi > py) != (yj > py) {
                let x_cross = (xj - xi) * (py - yi) / (yj - yi) + xi;
                if px < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// The two coordinate axes kept after dropping the normal's dominant one.
fn projection_axes(normal: Vec3) -> (usize, usize) {
    let n = normal.abs();
    if n.x >= n.y && n.x >= n.z {
        (1, 2)
    } else if n.y >= n.z {
        (0, 2)
    } else {
        (0, 1)
    }
}
