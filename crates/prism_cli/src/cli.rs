use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::RenderConfig;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render the prism demo scene to a PNG file
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "An offline Monte Carlo ray tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 400)]
    pub height: u32,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Scatter rays drawn at each surface hit
    #[arg(long)]
    pub scatter_samples: Option<u32>,

    /// Maximum path length
    #[arg(long, short = 'd')]
    pub max_depth: Option<u32>,

    /// Pixels handed to a worker at a time
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Worker thread count (defaults to one per core)
    #[arg(long, short = 't')]
    pub threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long)]
    pub no_parallel: bool,

    /// Skip point-light direct illumination
    #[arg(long)]
    pub no_direct: bool,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Index of a demo object to highlight as selected
    #[arg(long)]
    pub select: Option<usize>,

    /// JSON render configuration; flags override its fields
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Output PNG path
    #[arg(long, short = 'o', default_value = "render.png")]
    pub output: PathBuf,

    /// Logging level, RUST_LOG takes precedence
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(scatter) = self.scatter_samples {
            config.samples_per_scatter = scatter;
        }
        if let Some(depth) = self.max_depth {
            config.max_ray_depth = depth;
        }
        if let Some(batch) = self.batch_size {
            config.thread_batch_size = batch;
        }
        if self.threads.is_some() {
            config.thread_count = self.threads;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.no_parallel {
            config.enable_parallel = false;
        }
        if self.no_direct {
            config.enable_direct_lighting = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["prism", "-s", "3", "--no-direct", "--threads", "2"]);
        let mut config = RenderConfig {
            samples_per_pixel: 64,
            max_ray_depth: 5,
            ..RenderConfig::default()
        };
        args.apply(&mut config);

        assert_eq!(config.samples_per_pixel, 3);
        assert_eq!(config.max_ray_depth, 5);
        assert_eq!(config.thread_count, Some(2));
        assert!(!config.enable_direct_lighting);
        assert!(config.enable_parallel);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["prism"]);
        assert_eq!((args.width, args.height), (400, 400));
        assert_eq!(args.output, PathBuf::from("render.png"));

        let mut config = RenderConfig::default();
        args.apply(&mut config);
        assert_eq!(config, RenderConfig::default());
    }
}
