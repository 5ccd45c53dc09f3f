//! Glint command line renderer.
//!
//! Usage: `glint [OUTPUT] [CONFIG.json]`
//!
//! Builds the configured scene, renders it and writes the image. Set
//! `RUST_LOG=debug` to see per-band progress.

mod config;
mod output;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use config::AppConfig;

const USAGE: &str = "Usage: glint [OUTPUT] [CONFIG.json]

  OUTPUT        image path, format from extension (png, ppm, jpg); default result.png
  CONFIG.json   render settings, see the config module docs";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = match args.get(1) {
        Some(path) => AppConfig::load(Path::new(path))?,
        None => AppConfig::default(),
    };
    if let Some(output) = args.first() {
        config.output = PathBuf::from(output);
    }

    run(&config)
}

fn run(config: &AppConfig) -> Result<()> {
    log::info!("Starting Glint");

    let start = Instant::now();
    let world = config.scene.build();
    let camera = config.camera();
    log::info!("Scene {:?} built in {:?}", config.scene, start.elapsed());

    let start = Instant::now();
    let frame = glint_renderer::render(&camera, &world, &config.render, config.width, config.height)
        .context("Render failed")?;
    log::info!("Rendered in {:?}", start.elapsed());

    output::save(&frame, &config.output)
}
