use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use prism_renderer::{Camera, ObjectId, RenderConfig};

mod cli;
mod demo;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG, when set, overrides the flag
    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("Invalid render configuration")?;

    let mut scene = demo::build_scene().context("Failed to build demo scene")?;
    if let Some(index) = args.select {
        if !scene.set_selected(ObjectId(index), true) {
            log::warn!("No object #{} to select, scene has {}", index, scene.len());
        }
    }

    let mut camera = demo::build_camera(args.width, args.height).with_config(config);
    camera.render(&scene).context("Render failed")?;

    save_png(&camera, &args.output)?;
    log::info!("Saved {}", args.output.display());
    Ok(())
}

fn load_config(path: &Path) -> Result<RenderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::info!("Loaded render config from {}", path.display());
    Ok(config)
}

/// Write the camera's buffer as a row-major PNG.
fn save_png(camera: &Camera, path: &Path) -> Result<()> {
    let (width, height) = camera.resolution();
    let image = image::RgbaImage::from_fn(width, height, |x, y| {
        let pixel = camera.pixel(x, y).unwrap_or_default();
        image::Rgba([pixel.r, pixel.g, pixel.b, pixel.a])
    });

    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
