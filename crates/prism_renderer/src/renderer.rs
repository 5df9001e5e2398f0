//! Radiance estimation and tone mapping.
//!
//! Implements Monte Carlo path tracing with:
//! - Configurable path depth and scatter fan-out
//! - Point-light direct illumination with hard shadows
//! - Square-root gamma and 8-bit quantization

use crate::{Color, HitRecord, RenderError, Result, Scene};
use bytemuck::{Pod, Zeroable};
use prism_math::{Interval, Ray};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Nearest accepted hit distance, suppresses self-intersection.
pub const CLOSEST_HIT_MIN_T: f64 = 0.001;

/// Added to the radiance of any hit on a selected primitive.
pub const SELECTION_HIGHLIGHT: Color = Color::new(0.15, 0.1, 0.0);

/// Returned for primary rays that only hit the enlarged selection shell.
pub const SELECTION_OUTLINE: Color = Color::new(1.0, 0.6, 0.1);

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Primary rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Scatter rays drawn at each surface hit
    pub samples_per_scatter: u32,
    /// Maximum path length, primary ray included
    pub max_ray_depth: u32,
    /// Pixels handed to a worker at a time
    pub thread_batch_size: usize,
    pub enable_parallel: bool,
    pub enable_direct_lighting: bool,
    /// Worker count; `None` uses the global rayon pool
    pub thread_count: Option<usize>,
    /// Base seed, combined with the batch index for each batch's RNG
    pub seed: u64,
    /// Outline and tint selected primitives
    pub highlight_selection: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 16,
            samples_per_scatter: 1,
            max_ray_depth: 8,
            thread_batch_size: 64,
            enable_parallel: true,
            enable_direct_lighting: true,
            thread_count: None,
            seed: 0x5eed,
            highlight_selection: true,
        }
    }
}

impl RenderConfig {
    /// Reject values that would divide by zero or leave work unscheduled.
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_pixel == 0 {
            return Err(invalid("samples_per_pixel", "must be at least 1"));
        }
        if self.samples_per_scatter == 0 {
            return Err(invalid("samples_per_scatter", "must be at least 1"));
        }
        if self.thread_batch_size == 0 {
            return Err(invalid("thread_batch_size", "must be at least 1"));
        }
        if self.thread_count == Some(0) {
            return Err(invalid("thread_count", "must be at least 1 when set"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> RenderError {
    RenderError::InvalidConfig { field, reason }
}

/// One pending path segment.
struct PathVertex {
    ray: Ray,
    depth: u32,
    /// Product of attenuations and fan-out weights from the camera
    throughput: Color,
    primary: bool,
}

/// Estimate the radiance arriving along `ray`.
///
/// Each hit contributes its emission, an optional selection tint, and
/// (when enabled) direct light from every point light. Indirect light
/// comes from `samples_per_scatter` scatter rays, each weighted by the
/// material attenuation and averaged. Paths are walked with an explicit
/// stack, so `depth` does not grow the call stack.
pub fn ray_color(
    scene: &Scene,
    ray: &Ray,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let expand_primary = config.highlight_selection && scene.has_selection();
    trace_path(scene, ray, depth, config, expand_primary, rng)
}

/// `ray_color` with the expanded primary sweep decided by the caller, so a
/// render can check the selection once instead of per sample.
pub(crate) fn trace_path(
    scene: &Scene,
    ray: &Ray,
    depth: u32,
    config: &RenderConfig,
    expand_primary: bool,
    rng: &mut dyn RngCore,
) -> Color {
    let interval = Interval::new(CLOSEST_HIT_MIN_T, f64::INFINITY);

    let mut radiance = Color::ZERO;
    let mut stack = vec![PathVertex {
        ray: *ray,
        depth,
        throughput: Color::ONE,
        primary: true,
    }];

    while let Some(vertex) = stack.pop() {
        // Path budget exhausted
        if vertex.depth == 0 {
            continue;
        }

        let expanded = vertex.primary && expand_primary;
        let Some(rec) = scene.hit_closest(&vertex.ray, interval, expanded) else {
            radiance += vertex.throughput * sky_gradient(&vertex.ray);
            continue;
        };

        if rec.hit_expanded {
            radiance += vertex.throughput * SELECTION_OUTLINE;
            continue;
        }

        let mut local = rec.material.emitted();
        if config.highlight_selection && rec.object.is_selected() {
            local += SELECTION_HIGHLIGHT;
        }
        if config.enable_direct_lighting {
            local += direct_lighting(scene, &vertex.ray, &rec);
        }
        radiance += vertex.throughput * local;

        // Children at depth 0 would contribute nothing
        if vertex.depth == 1 || config.samples_per_scatter == 0 {
            continue;
        }

        let weight = vertex.throughput / config.samples_per_scatter as f64;
        for _ in 0..config.samples_per_scatter {
            if let Some(result) = rec.material.scatter(&vertex.ray, &rec, rng) {
                stack.push(PathVertex {
                    ray: result.scattered,
                    depth: vertex.depth - 1,
                    throughput: weight * result.attenuation,
                    primary: false,
                });
            }
        }
    }

    radiance
}

/// Sum of every light's direct contribution at `rec`, with shadow rays.
fn direct_lighting(scene: &Scene, ray: &Ray, rec: &HitRecord) -> Color {
    let to_view = -ray.direction;
    scene
        .lights()
        .iter()
        .map(|light| {
            let occluded = scene.is_occluded(rec.point, light.position());
            light.direct_lighting(to_view, rec, occluded)
        })
        .sum()
}

/// Background seen by rays that leave the scene.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// An 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Tone-map a linear color to an opaque 8-bit pixel.
pub fn color_to_rgba(color: Color) -> Rgba {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f64| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    Rgba::new(quantize(color.x), quantize(color.y), quantize(color.z), 255)
}
