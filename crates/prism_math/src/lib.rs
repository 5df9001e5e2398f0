//! Geometry kernel for the prism renderer.
//!
//! Double precision throughout: `Vec3` and `Point3` are aliases of
//! `glam::DVec3`, so every `glam` operation (dot, cross, normalize, ...) is
//! available directly.

pub use glam::{DQuat, DVec3};

mod interval;
mod ray;
mod sampling;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{random_f64, random_range, random_unit_vector};
pub use vector::Vec3Ext;

/// Direction vector.
pub type Vec3 = DVec3;

/// Position in world space.
pub type Point3 = DVec3;
