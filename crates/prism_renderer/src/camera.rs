//! Pinhole camera and render driver.

use std::time::Instant;

use crate::renderer::trace_path;
use crate::{color_to_rgba, Color, RenderConfig, RenderError, Result, Rgba, Scene};
use prism_math::{random_f64, DQuat, Point3, Ray, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Viewport extent along the right axis, in world units.
pub const VIEWPORT_WIDTH: f64 = 1.0;
/// Viewport extent along the down axis, in world units.
pub const VIEWPORT_HEIGHT: f64 = 1.0;
/// Distance from the camera center to the viewport.
pub const FOCAL_LENGTH: f64 = 1.0;

/// Above this |dot(direction, up)| the alternate up vector is used.
const PARALLEL_UP_THRESHOLD: f64 = 0.999;

/// Image plane of the camera in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub upper_left: Point3,
    pub right_dir: Vec3,
    pub down_dir: Vec3,
}

impl Viewport {
    fn derive(center: Point3, direction: Vec3) -> Self {
        let mut world_up = Vec3::Z;
        if direction.dot(world_up).abs() > PARALLEL_UP_THRESHOLD {
            world_up = Vec3::Y;
        }

        let right_dir = direction.cross(world_up).normalize();
        let down_dir = direction.cross(right_dir).normalize();
        let upper_left = center + direction * FOCAL_LENGTH
            - right_dir * (VIEWPORT_WIDTH * 0.5)
            - down_dir * (VIEWPORT_HEIGHT * 0.5);

        Self {
            upper_left,
            right_dir,
            down_dir,
        }
    }
}

/// Camera owning its output pixel buffer.
///
/// Pixels are stored column-major: pixel `(x, y)` lives at
/// `x * height + y`.
#[derive(Debug, Clone)]
pub struct Camera {
    center: Point3,
    direction: Vec3,
    viewport: Viewport,
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    config: RenderConfig,
}

impl Camera {
    /// Create a camera at `center` looking along `direction`.
    ///
    /// # Panics
    ///
    /// If `direction` is zero or not finite.
    pub fn new(center: Point3, direction: Vec3, resolution: (u32, u32)) -> Self {
        let direction = unit_direction(direction);
        let (width, height) = resolution;
        Self {
            center,
            direction,
            viewport: Viewport::derive(center, direction),
            width,
            height,
            pixels: vec![Rgba::default(); buffer_len(width, height)],
            config: RenderConfig::default(),
        }
    }

    /// Set the render configuration.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn set_center(&mut self, center: Point3) {
        self.center = center;
        self.update_viewport();
    }

    /// Unit viewing direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// # Panics
    ///
    /// If `direction` is zero or not finite.
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = unit_direction(direction);
        self.update_viewport();
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Turn the camera by `horizontal` radians about the viewport's down
    /// axis, then by `vertical` radians about the resulting right axis.
    pub fn rotate(&mut self, horizontal: f64, vertical: f64) {
        let yaw = DQuat::from_axis_angle(self.viewport.down_dir, horizontal);
        let right = yaw * self.viewport.right_dir;
        let pitch = DQuat::from_axis_angle(right, vertical);

        self.direction = unit_direction(pitch * (yaw * self.direction));
        self.update_viewport();
    }

    /// Move the camera by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.center += offset;
        self.update_viewport();
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: RenderConfig) {
        self.config = config;
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Change the output size. The pixel buffer is reallocated and cleared.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Rgba::default(); buffer_len(width, height)];
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(x as usize * self.height as usize + y as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// The pixel buffer as raw RGBA bytes, in buffer order.
    pub fn pixel_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Primary ray through a jittered point inside pixel `(x, y)`.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let delta_width = VIEWPORT_WIDTH / self.width as f64;
        let delta_height = VIEWPORT_HEIGHT / self.height as f64;

        let viewport_point = self.viewport.upper_left
            + self.viewport.right_dir * ((x as f64 + random_f64(rng)) * delta_width)
            + self.viewport.down_dir * ((y as f64 + random_f64(rng)) * delta_height);

        Ray::new(self.center, (viewport_point - self.center).normalize())
    }

    /// Average of `samples_per_pixel` radiance estimates for pixel `(x, y)`.
    ///
    /// Non-finite estimates are dropped so they cannot poison the pixel.
    pub fn sample_pixel(&self, scene: &Scene, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
        let expand_primary = self.config.highlight_selection && scene.has_selection();
        self.estimate_pixel(scene, x, y, expand_primary, rng)
    }

    fn estimate_pixel(
        &self,
        scene: &Scene,
        x: u32,
        y: u32,
        expand_primary: bool,
        rng: &mut dyn RngCore,
    ) -> Color {
        let samples = self.config.samples_per_pixel.max(1);
        let mut sum = Color::ZERO;

        for _ in 0..samples {
            let ray = self.get_ray(x, y, rng);
            let sample = trace_path(
                scene,
                &ray,
                self.config.max_ray_depth,
                &self.config,
                expand_primary,
                rng,
            );
            if sample.is_finite() {
                sum += sample;
            }
        }

        sum / samples as f64
    }

    /// Render `scene` into the pixel buffer.
    ///
    /// Pixels are split into batches of `thread_batch_size` consecutive
    /// buffer slots. Each batch gets its own RNG seeded from the base seed
    /// and the batch index, so the parallel and sequential paths produce
    /// identical images.
    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        self.config.validate()?;
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyResolution {
                width: self.width,
                height: self.height,
            });
        }

        let mut pixels = std::mem::take(&mut self.pixels);
        pixels.resize(buffer_len(self.width, self.height), Rgba::default());

        let result = self.render_into(scene, &mut pixels);
        self.pixels = pixels;
        result
    }

    fn render_into(&self, scene: &Scene, pixels: &mut [Rgba]) -> Result<()> {
        let config = &self.config;
        let batch_size = config.thread_batch_size;
        let height = self.height as usize;
        let batch_count = pixels.len().div_ceil(batch_size);

        log::info!(
            "Rendering {}x{}: {} spp, {} scatter, depth {}, {} batches of {}",
            self.width,
            self.height,
            config.samples_per_pixel,
            config.samples_per_scatter,
            config.max_ray_depth,
            batch_count,
            batch_size
        );
        let start = Instant::now();
        let expand_primary = config.highlight_selection && scene.has_selection();

        let render_batch = |(batch_index, batch): (usize, &mut [Rgba])| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(batch_index as u64));
            let first = batch_index * batch_size;

            for (offset, pixel) in batch.iter_mut().enumerate() {
                let index = first + offset;
                let (x, y) = ((index / height) as u32, (index % height) as u32);
                *pixel = color_to_rgba(self.estimate_pixel(scene, x, y, expand_primary, &mut rng));
            }
        };

        if config.enable_parallel {
            match config.thread_count {
                Some(threads) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build()?;
                    log::debug!("Using dedicated pool of {} threads", threads);
                    pool.install(|| {
                        pixels
                            .par_chunks_mut(batch_size)
                            .enumerate()
                            .for_each(&render_batch)
                    });
                }
                None => {
                    log::debug!("Using global pool of {} threads", rayon::current_num_threads());
                    pixels
                        .par_chunks_mut(batch_size)
                        .enumerate()
                        .for_each(&render_batch);
                }
            }
        } else {
            pixels
                .chunks_mut(batch_size)
                .enumerate()
                .for_each(&render_batch);
        }

        log::info!("Render finished in {:.2?}", start.elapsed());
        Ok(())
    }

    fn update_viewport(&mut self) {
        self.viewport = Viewport::derive(self.center, self.direction);
        log::debug!(
            "Viewport updated: upper_left={:?} right={:?} down={:?}",
            self.viewport.upper_left,
            self.viewport.right_dir,
            self.viewport.down_dir
        );
    }
}

fn unit_direction(direction: Vec3) -> Vec3 {
    let unit = direction.normalize_or_zero();
    assert!(
        unit != Vec3::ZERO,
        "camera direction must be non-zero and finite, got {direction}"
    );
    unit
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
