//! Surface materials and their scattering rules.

use crate::HitRecord;
use prism_math::{random_f64, random_unit_vector, Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Distance a dielectric pushes its new ray origin off the surface.
const SURFACE_OFFSET: f64 = 1e-4;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel fraction of the scattered radiance that survives
    pub attenuation: Color,
    /// Continuation ray
    pub scattered: Ray,
}

/// How light interacts with a surface.
///
/// A closed set of variants; every scene query dispatches with a `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
    Emissive(Emissive),
}

impl Material {
    pub fn lambertian(diffuse: Color) -> Self {
        Material::Lambertian(Lambertian::new(diffuse))
    }

    pub fn metal(specular: Color, fuzz: f64) -> Self {
        Material::Metal(Metal::new(specular, fuzz))
    }

    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric(Dielectric::new(refraction_index))
    }

    pub fn emissive(emission: Color) -> Self {
        Material::Emissive(Emissive::new(emission))
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the path ends here (absorption or a pure
    /// emitter).
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
            Material::Emissive(_) => None,
        }
    }

    /// Light emitted by the surface itself.
    pub fn emitted(&self) -> Color {
        match self {
            Material::Emissive(m) => m.emission,
            _ => Color::ZERO,
        }
    }

    /// Diffuse albedo, used by direct lighting. Zero if the variant has none.
    pub fn diffuse(&self) -> Color {
        match self {
            Material::Lambertian(m) => m.diffuse,
            _ => Color::ZERO,
        }
    }

    /// Specular tint. Zero if the variant has none.
    pub fn specular(&self) -> Color {
        match self {
            Material::Metal(m) => m.specular,
            Material::Dielectric(_) => Color::ONE,
            _ => Color::ZERO,
        }
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    diffuse: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(diffuse: Color) -> Self {
        Self { diffuse }
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        // Normal plus a unit vector approximates a cosine-weighted lobe
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.diffuse,
            scattered: Ray::new(rec.point, scatter_direction.normalize()),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    specular: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `specular`: The tint of reflected light
    /// - `fuzz`: Roughness, clamped to [0, 1]. 0.0 = perfect mirror
    pub fn new(specular: Color, fuzz: f64) -> Self {
        Self {
            specular,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = ray_in.direction.normalize().reflect_about(rec.normal);
        let scattered_dir = if self.fuzz > 0.0 {
            reflected + self.fuzz * random_unit_vector(rng)
        } else {
            reflected
        };

        // Fuzz can push the reflection below the surface: absorb it
        if scattered_dir.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.specular,
            scattered: Ray::new(rec.point, scattered_dir),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    refraction_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    pub fn refraction_index(&self) -> f64 {
        self.refraction_index
    }

    /// Schlick's approximation for reflectance.
    ///
    /// An index-matched interface (`ratio == 1`) has no boundary and
    /// reflects nothing.
    pub fn reflectance(cosine: f64, ratio: f64) -> f64 {
        if ratio == 1.0 {
            return 0.0;
        }
        let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction.normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        // Check for total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let reflects = cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > random_f64(rng);
        let direction = if reflects {
            unit_direction.reflect_about(rec.normal)
        } else {
            unit_direction.refract_through(rec.normal, refraction_ratio)
        };

        // Start the new ray on the side it travels into
        let side = if direction.dot(rec.normal) >= 0.0 { 1.0 } else { -1.0 };
        let origin = rec.point + rec.normal * (side * SURFACE_OFFSET);

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(origin, direction),
        })
    }
}

/// Self-luminous surface. Never scatters.
#[derive(Debug, Clone, PartialEq)]
pub struct Emissive {
    emission: Color,
}

impl Emissive {
    /// Create a new emitter with the given emission color.
    pub fn new(emission: Color) -> Self {
        Self { emission }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Primitive};
    use prism_math::{Interval, Point3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    const EPS: f64 = 1e-9;

    /// Hit the y = 0 plane from `origin` along `direction`.
    fn scatter_off_ground(
        material: Material,
        origin: Point3,
        direction: Vec3,
        rng: &mut StdRng,
    ) -> (Ray, Option<ScatterResult>) {
        let ground = Primitive::plane(Point3::ZERO, Vec3::Y, Arc::new(material)).unwrap();
        let ray = Ray::new(origin, direction);
        let rec = ground.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        let result = rec.material.scatter(&ray, &rec, rng);
        (ray, result)
    }

    #[test]
    fn test_lambertian_scatters_into_upper_hemisphere() {
        let mut rng = StdRng::seed_from_u64(42);
        let ground = Primitive::plane(
            Point3::ZERO,
            Vec3::Y,
            Arc::new(Material::lambertian(Color::splat(0.5))),
        )
        .unwrap();
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vec3::new(0.3, -1.0, 0.0));
        let rec = ground.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        for _ in 0..500 {
            let result = rec.material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::splat(0.5));
            assert!(result.scattered.direction.dot(Vec3::Y) >= 0.0);
            assert!((result.scattered.direction.length() - 1.0).abs() < EPS);
            assert_eq!(result.scattered.origin, rec.point);
        }
    }

    #[test]
    fn test_perfect_mirror_reflection() {
        let mut rng = StdRng::seed_from_u64(42);
        let specular = Color::new(0.9, 0.8, 0.7);

        // Perpendicular incidence bounces straight back
        let (_, result) = scatter_off_ground(
            Material::metal(specular, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            -Vec3::Y,
            &mut rng,
        );
        let result = result.unwrap();
        assert!((result.scattered.direction - Vec3::Y).length() < EPS);
        assert_eq!(result.attenuation, specular);

        // Oblique: normal component flips, tangential component unchanged
        let incoming = Vec3::new(1.0, -1.0, 0.5).normalize();
        let (_, result) = scatter_off_ground(
            Material::metal(specular, 0.0),
            Point3::new(-1.0, 1.0, -0.5),
            incoming,
            &mut rng,
        );
        let out = result.unwrap().scattered.direction;
        assert!((out.y + incoming.y).abs() < EPS);
        assert!((out.x - incoming.x).abs() < EPS);
        assert!((out.z - incoming.z).abs() < EPS);
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_fuzzy_metal_never_scatters_below_surface() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut absorbed = 0;
        for _ in 0..2000 {
            // Grazing incidence makes below-surface fuzz likely
            let (_, result) = scatter_off_ground(
                Material::metal(Color::ONE, 1.0),
                Point3::new(-10.0, 0.1, 0.0),
                Vec3::new(1.0, -0.01, 0.0),
                &mut rng,
            );
            match result {
                Some(r) => assert!(r.scattered.direction.dot(Vec3::Y) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_index_one_passes_straight_through() {
        let mut rng = StdRng::seed_from_u64(42);
        for direction in [
            -Vec3::Y,
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(3.0, -0.2, 1.0),
        ] {
            let (ray, result) = scatter_off_ground(
                Material::dielectric(1.0),
                Point3::new(0.0, 1.0, 0.0),
                direction,
                &mut rng,
            );
            let result = result.unwrap();
            let out = result.scattered.direction;
            assert!((out - ray.direction.normalize()).length() < 1e-9);
            assert_eq!(result.attenuation, Color::ONE);
            // Origin pushed below the surface, the side the ray continues into
            assert!(result.scattered.origin.y < 0.0);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mut rng = StdRng::seed_from_u64(42);
        // Exit a glass sphere at a steep angle from inside
        let glass = Primitive::sphere(Point3::ZERO, 1.0, Arc::new(Material::dielectric(1.5))).unwrap();
        let ray = Ray::new(Point3::new(0.0, 0.9, 0.0), Vec3::new(1.0, 0.05, 0.0));
        let rec = glass.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!(!rec.front_face);

        for _ in 0..50 {
            let result = rec.material.scatter(&ray, &rec, &mut rng).unwrap();
            // Stays inside: reflected back towards the interior
            assert!(result.scattered.direction.dot(rec.normal) > 0.0);
            assert!(result.scattered.origin.length() < 1.0);
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        assert_eq!(Dielectric::reflectance(0.3, 1.0), 0.0);
        let normal_incidence = Dielectric::reflectance(1.0, 1.0 / 1.5);
        assert!((normal_incidence - 0.04).abs() < 1e-9);
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_emissive_absorbs_and_emits() {
        let mut rng = StdRng::seed_from_u64(42);
        let emission = Color::new(4.0, 3.0, 2.0);
        let (_, result) = scatter_off_ground(
            Material::emissive(emission),
            Point3::new(0.0, 1.0, 0.0),
            -Vec3::Y,
            &mut rng,
        );
        assert!(result.is_none());
        assert_eq!(Material::emissive(emission).emitted(), emission);
        assert_eq!(Material::lambertian(Color::ONE).emitted(), Color::ZERO);
    }

    #[test]
    fn test_channels() {
        let lambert = Material::lambertian(Color::splat(0.25));
        assert_eq!(lambert.diffuse(), Color::splat(0.25));
        assert_eq!(lambert.specular(), Color::ZERO);

        let metal = Material::metal(Color::splat(0.75), 0.1);
        assert_eq!(metal.diffuse(), Color::ZERO);
        assert_eq!(metal.specular(), Color::splat(0.75));
    }
}
