//! Built-in demo scene.

use std::sync::Arc;

use anyhow::Result;
use prism_math::{Point3, Vec3};
use prism_renderer::{Camera, Color, Light, Material, Primitive, Scene};

/// Ground, three material spheres, a lamp, a backdrop panel and two lights.
pub fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new();

    let ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let matte = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let glass = Arc::new(Material::dielectric(1.5));
    let gold = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 0.1));
    let lamp = Arc::new(Material::emissive(Color::splat(4.0)));
    let panel = Arc::new(Material::lambertian(Color::new(0.7, 0.2, 0.2)));

    scene.add_object(Primitive::plane(Point3::new(0.0, -1.0, 0.0), Vec3::Y, ground)?);
    scene.add_object(Primitive::sphere(Point3::new(0.0, 0.0, 1.0), 1.0, matte)?);
    scene.add_object(Primitive::sphere(Point3::new(-2.1, 0.0, 1.5), 1.0, glass)?);
    scene.add_object(Primitive::sphere(Point3::new(2.1, 0.0, 1.5), 1.0, gold)?);
    scene.add_object(Primitive::sphere(Point3::new(0.0, 2.2, 2.5), 0.4, lamp)?);
    scene.add_object(Primitive::polygon(
        vec![
            Point3::new(-1.2, -1.0, 4.0),
            Point3::new(1.2, -1.0, 4.0),
            Point3::new(1.2, 1.5, 4.5),
            Point3::new(-1.2, 1.5, 4.5),
        ],
        panel,
    )?);

    scene.add_light(Light::new(
        Point3::new(3.0, 5.0, -2.0),
        Color::splat(0.05),
        Color::splat(0.7),
        Color::splat(0.5),
        32.0,
    ));
    scene.add_light(Light::new(
        Point3::new(-4.0, 3.0, -1.0),
        Color::splat(0.02),
        Color::new(0.3, 0.3, 0.4),
        Color::splat(0.2),
        16.0,
    ));

    log::info!(
        "Demo scene: {} objects, {} lights",
        scene.len(),
        scene.lights().len()
    );
    Ok(scene)
}

/// Camera framing the demo scene.
pub fn build_camera(width: u32, height: u32) -> Camera {
    Camera::new(
        Point3::new(0.0, 1.0, -4.0),
        Vec3::new(0.0, -0.2, 1.0),
        (width, height),
    )
}
