//! Point lights with Phong direct illumination.

use crate::{Color, HitRecord, SceneId};
use prism_math::{Point3, Vec3, Vec3Ext};

/// A point light source.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    position: Point3,
    ambient: Color,
    diffuse: Color,
    specular: Color,
    phong_exponent: f64,
    pub(crate) parent: Option<SceneId>,
}

impl Light {
    /// Create a point light. `phong_exponent` is clamped to be non-negative.
    pub fn new(
        position: Point3,
        ambient: Color,
        diffuse: Color,
        specular: Color,
        phong_exponent: f64,
    ) -> Self {
        Self {
            position,
            ambient,
            diffuse,
            specular,
            phong_exponent: phong_exponent.max(0.0),
            parent: None,
        }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn diffuse(&self) -> Color {
        self.diffuse
    }

    pub fn specular(&self) -> Color {
        self.specular
    }

    pub fn phong_exponent(&self) -> f64 {
        self.phong_exponent
    }

    /// Scene that owns this light, if it has been inserted into one.
    pub fn parent(&self) -> Option<SceneId> {
        self.parent
    }

    /// Direct contribution of this light at `rec`.
    ///
    /// `to_view` points from the surface towards the viewer (any length).
    /// Ambient light is always added. The Lambert and Phong terms are
    /// dropped when `occluded` is set or the light is behind the surface.
    pub fn direct_lighting(&self, to_view: Vec3, rec: &HitRecord, occluded: bool) -> Color {
        let albedo = rec.material.diffuse();
        let ambient = self.ambient * albedo;
        if occluded {
            return ambient;
        }

        let Some(to_light) = (self.position - rec.point).try_normalize() else {
            return ambient;
        };

        let cos_light = to_light.dot(rec.normal);
        if cos_light <= 0.0 {
            // Light is behind the surface
            return ambient;
        }
        let diffuse = self.diffuse * cos_light * albedo;

        let specular = match to_view.try_normalize() {
            Some(to_view) => {
                // Mirror of the incident light direction about the normal
                let reflected = (-to_light).reflect_about(rec.normal);
                let cos_view = reflected.dot(to_view).max(0.0);
                self.specular * cos_view.powf(self.phong_exponent)
            }
            None => Color::ZERO,
        };

        ambient + diffuse + specular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Material, Primitive};
    use prism_math::{Interval, Ray};
    use std::sync::Arc;

    const EPS: f64 = 1e-9;

    fn white_light(position: Point3) -> Light {
        Light::new(
            position,
            Color::splat(0.1),
            Color::splat(0.8),
            Color::splat(0.5),
            16.0,
        )
    }

    fn ground() -> Primitive {
        Primitive::plane(
            Point3::ZERO,
            Vec3::Y,
            Arc::new(Material::lambertian(Color::new(0.5, 0.25, 1.0))),
        )
        .unwrap()
    }

    #[test]
    fn test_light_overhead() {
        let ground = ground();
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = ground.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        let light = white_light(Point3::new(0.0, 5.0, 0.0));

        let color = light.direct_lighting(-ray.direction, &rec, false);
        let albedo = Color::new(0.5, 0.25, 1.0);
        // Ambient + full Lambert + Phong peak (reflection aims straight at the viewer)
        let expected = 0.1 * albedo + 0.8 * albedo + Color::splat(0.5);
        assert!((color - expected).length() < EPS);
    }

    #[test]
    fn test_occlusion_keeps_only_ambient() {
        let ground = ground();
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = ground.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        let light = white_light(Point3::new(0.0, 5.0, 0.0));

        let color = light.direct_lighting(-ray.direction, &rec, true);
        assert!((color - 0.1 * Color::new(0.5, 0.25, 1.0)).length() < EPS);
    }

    #[test]
    fn test_light_below_surface_has_no_diffuse() {
        let ground = ground();
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = ground.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        let light = white_light(Point3::new(0.0, -5.0, 0.0));

        let color = light.direct_lighting(-ray.direction, &rec, false);
        assert!((color - 0.1 * Color::new(0.5, 0.25, 1.0)).length() < EPS);
    }

    #[test]
    fn test_grazing_light_has_weak_highlight() {
        let ground = ground();
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), -Vec3::Y);
        let rec = ground.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        let light = white_light(Point3::new(10.0, 1.0, 0.0));

        let color = light.direct_lighting(-ray.direction, &rec, false);
        let peak = white_light(Point3::new(0.0, 5.0, 0.0)).direct_lighting(-ray.direction, &rec, false);
        assert!(color.x < peak.x);
        assert!(color.x > 0.1 * 0.5);
    }

    #[test]
    fn test_light_under_surface_has_no_highlight() {
        let ground = ground();
        // Viewer skims the top of the plane, light sits just beneath it on
        // the mirror side
        let ray = Ray::new(Point3::new(-10.0, 0.1, 0.0), Vec3::new(10.0, -0.1, 0.0));
        let rec = ground.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        let light = Light::new(
            Point3::new(10.0, -0.1, 0.0),
            Color::splat(0.1),
            Color::ONE,
            Color::ONE,
            32.0,
        );

        let color = light.direct_lighting(-ray.direction, &rec, false);
        assert_eq!(color, 0.1 * Color::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn test_negative_phong_exponent_is_clamped() {
        let light = Light::new(Point3::Y, Color::ZERO, Color::ONE, Color::ONE, -4.0);
        assert_eq!(light.phong_exponent(), 0.0);

        let ground = ground();
        // View direction opposite the reflection, so the cosine clamps to zero
        let ray = Ray::new(Point3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = ground.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        let color = light.direct_lighting(Vec3::new(1.0, -0.2, 0.0), &rec, false);
        assert!(color.is_finite());
    }
}
