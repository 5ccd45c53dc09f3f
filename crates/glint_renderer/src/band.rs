//! Row-band partitioning for parallel rendering.
//!
//! The image is split into equal, contiguous bands of rows, one per worker.
//! Bands never overlap, so workers write disjoint slices of the framebuffer
//! and need no locking.

use crate::framebuffer::Rgba8;
use crate::renderer::{color_to_rgba, RenderContext};
use crate::sampling::row_rng;

/// A contiguous range of image rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Index of this band, top to bottom
    pub index: usize,
    /// First row (0 = top of the image)
    pub y_start: u32,
    /// Number of rows
    pub rows: u32,
}

impl Band {
    /// Create a new band.
    pub fn new(index: usize, y_start: u32, rows: u32) -> Self {
        Self { index, y_start, rows }
    }

    /// One past the last row.
    pub fn y_end(&self) -> u32 {
        self.y_start + self.rows
    }
}

/// Largest divisor of `height` that does not exceed `max_workers`.
///
/// Always at least 1, so every band gets the same number of rows.
pub fn worker_count(height: u32, max_workers: usize) -> usize {
    let limit = max_workers.min(height as usize).max(1);
    (1..=limit)
        .rev()
        .find(|k| height as usize % k == 0)
        .unwrap_or(1)
}

/// Split `height` rows into `workers` equal bands: band `i` covers
/// `[i * height / workers, (i + 1) * height / workers)`.
///
/// `workers` must divide `height`; use [`worker_count`] to pick it.
pub fn plan_bands(height: u32, workers: usize) -> Vec<Band> {
    debug_assert!(workers > 0 && height as usize % workers == 0);
    let rows = height / workers as u32;
    (0..workers)
        .map(|i| Band::new(i, i as u32 * rows, rows))
        .collect()
}

/// Render every pixel of `band` into `pixels`.
///
/// `pixels` is the band's slice of the framebuffer, row-major, starting at
/// column 0 of row `band.y_start`.
pub fn render_band(ctx: &RenderContext<'_>, band: &Band, seed: u64, pixels: &mut [Rgba8]) {
    let width = ctx.width as usize;
    debug_assert_eq!(pixels.len(), band.rows as usize * width);

    for (row, y) in pixels.chunks_exact_mut(width).zip(band.y_start..band.y_end()) {
        let mut rng = row_rng(seed, y);
        for (x, pixel) in row.iter_mut().enumerate() {
            let color = ctx.render_pixel(x as u32, y, &mut rng);
            *pixel = color_to_rgba(color, ctx.config.gamma);
        }
    }

    log::debug!(
        "Band {} done (rows {}..{})",
        band.index,
        band.y_start,
        band.y_end()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scenes, Camera, RenderConfig};

    #[test]
    fn test_worker_count_divides_height() {
        assert_eq!(worker_count(1080, 16), 15);
        assert_eq!(worker_count(1080, 8), 8);
        assert_eq!(worker_count(12, 5), 4);
        assert_eq!(worker_count(7, 4), 1);
        assert_eq!(worker_count(3, 64), 3);
        assert_eq!(worker_count(10, 0), 1);
    }

    #[test]
    fn test_bands_cover_image_exactly() {
        let bands = plan_bands(120, 8);
        assert_eq!(bands.len(), 8);
        assert_eq!(bands[0].y_start, 0);
        assert_eq!(bands[7].y_end(), 120);
        for pair in bands.windows(2) {
            assert_eq!(pair[0].y_end(), pair[1].y_start);
            assert_eq!(pair[0].rows, pair[1].rows);
        }
        let total: u32 = bands.iter().map(|b| b.rows).sum();
        assert_eq!(total, 120);
    }

    #[test]
    fn test_render_band_is_order_independent() {
        let world = scenes::material_showcase();
        let camera = Camera::simple(2.0);
        let config = RenderConfig {
            samples_per_pixel: 2,
            max_depth: 4,
            ..RenderConfig::default()
        };
        let ctx = RenderContext {
            camera: &camera,
            world: &world,
            config: &config,
            width: 8,
            height: 4,
        };

        // Whole image as one band vs. the bottom band alone
        let mut whole = vec![Rgba8::default(); 8 * 4];
        render_band(&ctx, &Band::new(0, 0, 4), 99, &mut whole);

        let mut bottom = vec![Rgba8::default(); 8 * 2];
        render_band(&ctx, &Band::new(1, 2, 2), 99, &mut bottom);

        assert_eq!(&whole[16..], &bottom[..]);
        assert!(whole.iter().all(|p| p.a == 255));
    }
}
