//! Prism renderer - CPU Monte Carlo path tracing
//!
//! Renders scenes of spheres, planes and polygons lit by point lights and
//! emissive surfaces. Direct light uses a Phong model with hard shadows;
//! indirect light is gathered by material scattering. Rendering is spread
//! over a rayon pool in fixed-size pixel batches.

mod camera;
mod error;
mod hittable;
mod light;
mod material;
mod plane;
mod polygon;
mod primitive;
mod renderer;
mod scene;
mod sphere;

pub use camera::{Camera, Viewport, FOCAL_LENGTH, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
pub use error::{GeometryError, RenderError, Result};
pub use hittable::{HitRecord, Hittable};
pub use light::Light;
pub use material::{
    Color, Dielectric, Emissive, Lambertian, Material, Metal, ScatterResult,
};
pub use plane::Plane;
pub use polygon::Polygon;
pub use primitive::{Primitive, Shape, EXPANSION_COEFFICIENT};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, sky_gradient, RenderConfig, Rgba,
    CLOSEST_HIT_MIN_T, SELECTION_HIGHLIGHT, SELECTION_OUTLINE,
};
pub use scene::{LightId, ObjectId, Scene, SceneId, SHADOW_EPSILON};
pub use sphere::Sphere;

/// Re-export common math types from prism_math
pub use prism_math::{Interval, Point3, Ray, Vec3};
