//! Image file output.

use std::path::Path;

use anyhow::{Context, Result};
use glint_renderer::Framebuffer;
use image::{DynamicImage, RgbaImage};

/// Write the framebuffer to `path`, picking the format from the extension.
///
/// PNG keeps the alpha channel; PPM and JPEG get RGB only.
pub fn save(frame: &Framebuffer, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
        .context("Framebuffer size does not match its dimensions")?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("ppm") | Some("jpg") | Some("jpeg") => DynamicImage::ImageRgba8(image).to_rgb8().save(path),
        _ => image.save(path),
    }
    .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!(
        "Saved {}x{} image to {}",
        frame.width(),
        frame.height(),
        path.display()
    );
    Ok(())
}
