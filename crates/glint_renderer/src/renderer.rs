//! Core ray tracing renderer.
//!
//! Implements Monte Carlo ray tracing with:
//! - Recursive and iterative bounce loops with a configurable depth
//! - A normal-shading preview mode
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization
//! - Row-band parallelism over a rayon thread pool

use std::panic::{self, AssertUnwindSafe};

use crate::band::{plan_bands, render_band, worker_count};
use crate::framebuffer::{Framebuffer, Rgba8};
use crate::sampling::sample_square;
use crate::{Camera, Color, Hittable, Ray, Scene, SceneError};
use glint_math::{Interval, Vec3};
use rand::{Rng, RngCore};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lower intersection bound for every bounce; keeps rays from re-hitting the
/// surface they just left.
pub const T_MIN: f32 = 0.001;

/// Largest depth accepted for the recursive integrator.
pub const MAX_DEPTH_LIMIT: u32 = 512;

/// Sky color straight up.
const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Errors that can occur while rendering a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Framebuffer is empty ({width}x{height})")]
    EmptyFramebuffer { width: u32, height: u32 },

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render worker panicked: {0}")]
    WorkerPanicked(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Which function turns a camera ray into a color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    /// Recursive bounce loop
    #[default]
    Recursive,
    /// Loop with a running attenuation product
    Iterative,
    /// First-hit normals, no scattering
    Normals,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Bounce loop to use
    pub integrator: Integrator,
    /// Display gamma; pixels are encoded as `c^(1/gamma)`
    pub gamma: f32,
    /// Offset each sample randomly inside its pixel
    pub jitter: bool,
    /// Upper bound on worker threads, 0 = one per CPU
    pub max_workers: usize,
    /// Base seed for the per-row generators, random when unset
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            integrator: Integrator::Recursive,
            gamma: 2.2,
            jitter: true,
            max_workers: 0,
            seed: None,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "gamma must be positive, got {}",
                self.gamma
            )));
        }
        if self.integrator == Integrator::Recursive && self.max_depth > MAX_DEPTH_LIMIT {
            return Err(RenderError::InvalidConfig(format!(
                "max_depth {} exceeds the recursive limit of {MAX_DEPTH_LIMIT}; use the iterative integrator",
                self.max_depth
            )));
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// Each hit multiplies the light returned along the scattered ray by the
/// material's attenuation. Rays that run out of depth or get absorbed carry no
/// light; rays that escape see the sky.
pub fn ray_color(ray: &Ray, world: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match world
        .material(rec.material)
        .and_then(|material| material.scatter(ray, &rec, rng))
    {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Loop form of [`ray_color`].
///
/// Consumes random draws in the same order, so with the same generator state
/// both return the same color up to float rounding.
pub fn ray_color_iterative(ray: &Ray, world: &Scene, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;
    let mut current = *ray;

    for _ in 0..max_depth {
        let Some(rec) = world.hit(&current, Interval::new(T_MIN, f32::INFINITY)) else {
            return throughput * sky_gradient(&current);
        };

        match world
            .material(rec.material)
            .and_then(|material| material.scatter(&current, &rec, rng))
        {
            Some(result) => {
                throughput *= result.attenuation;
                current = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    Color::ZERO
}

/// Shade the first hit by its normal mapped to [0, 1]; sky on a miss.
pub fn normal_color(ray: &Ray, world: &Scene) -> Color {
    match world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) {
        Some(rec) => 0.5 * (rec.normal + Vec3::ONE),
        None => sky_gradient(ray),
    }
}

/// Compute sky gradient background.
///
/// White towards -Y, pale blue towards +Y, blended on the normalized
/// direction's height.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = (0.5 * (unit_direction.y + 1.0)).clamp(0.0, 1.0);
    Color::ONE * (1.0 - a) + SKY_BLUE * a
}

/// Apply gamma correction to a linear value clamped to [0, 1].
#[inline]
pub fn linear_to_gamma(linear: f32, gamma: f32) -> f32 {
    linear.clamp(0.0, 1.0).powf(1.0 / gamma)
}

/// Convert a linear color to an opaque 8-bit pixel.
pub fn color_to_rgba(color: Color, gamma: f32) -> Rgba8 {
    let quantize = |c: f32| (255.0 * linear_to_gamma(c, gamma)).round() as u8;
    Rgba8::new(quantize(color.x), quantize(color.y), quantize(color.z), 255)
}

/// Everything a worker needs to shade pixels. Shared read-only across threads.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub camera: &'a Camera,
    pub world: &'a Scene,
    pub config: &'a RenderConfig,
    pub width: u32,
    pub height: u32,
}

impl<'a> RenderContext<'a> {
    /// Image-plane coordinates for a point inside pixel (x, y).
    ///
    /// `y` counts rows from the top while `v` grows upwards. A dimension of one
    /// pixel always maps to the viewport center.
    pub fn pixel_uv(&self, x: u32, y: u32, dx: f32, dy: f32) -> (f32, f32) {
        let u = if self.width > 1 {
            (x as f32 + dx) / (self.width - 1) as f32
        } else {
            0.5
        };
        let v = if self.height > 1 {
            ((self.height - 1 - y) as f32 + dy) / (self.height - 1) as f32
        } else {
            0.5
        };
        (u, v)
    }

    /// Trace one camera ray with the configured integrator.
    pub fn trace(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        match self.config.integrator {
            Integrator::Recursive => ray_color(ray, self.world, self.config.max_depth, rng),
            Integrator::Iterative => ray_color_iterative(ray, self.world, self.config.max_depth, rng),
            Integrator::Normals => {
                if self.config.max_depth == 0 {
                    Color::ZERO
                } else {
                    normal_color(ray, self.world)
                }
            }
        }
    }

    /// Render a single pixel with multi-sampling; returns the averaged linear color.
    pub fn render_pixel(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Color {
        let mut pixel_color = Color::ZERO;

        for _ in 0..self.config.samples_per_pixel {
            let (dx, dy) = if self.config.jitter {
                sample_square(rng)
            } else {
                (0.0, 0.0)
            };
            let (u, v) = self.pixel_uv(x, y, dx, dy);
            let ray = self.camera.get_ray(u, v);
            pixel_color += self.trace(&ray, rng);
        }

        // Average the samples
        pixel_color / self.config.samples_per_pixel as f32
    }
}

/// Render the entire scene into a new framebuffer.
///
/// Rows are split into equal contiguous bands, one per worker, and rendered on
/// a dedicated thread pool. Returns once every band is done.
pub fn render(
    camera: &Camera,
    world: &Scene,
    config: &RenderConfig,
    width: u32,
    height: u32,
) -> RenderResult<Framebuffer> {
    config.validate()?;
    world.validate()?;
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyFramebuffer { width, height });
    }

    let max_workers = if config.max_workers == 0 {
        std::thread::available_parallelism().map_or(1, |n| n.get())
    } else {
        config.max_workers
    };
    let workers = worker_count(height, max_workers);
    let bands = plan_bands(height, workers);
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {:?} integrator, {} surfaces",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        config.integrator,
        world.len()
    );
    log::info!("Using {} workers, {} rows per band", workers, height / workers as u32);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("glint-band-{i}"))
        .build()?;

    let ctx = RenderContext {
        camera,
        world,
        config,
        width,
        height,
    };
    let mut frame = Framebuffer::new(width, height);
    let band_len = (height / workers as u32) as usize * width as usize;

    run_workers(&pool, || {
        frame
            .pixels_mut()
            .par_chunks_mut(band_len)
            .zip(bands.par_iter())
            .for_each(|(pixels, band)| render_band(&ctx, band, seed, pixels));
    })?;

    Ok(frame)
}

/// Run `job` on `pool`, turning a panic in any worker into an error.
fn run_workers(pool: &rayon::ThreadPool, job: impl FnOnce() + Send) -> RenderResult<()> {
    panic::catch_unwind(AssertUnwindSafe(|| pool.install(job))).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        log::error!("Render aborted: {}", message);
        RenderError::WorkerPanicked(message)
    })
}
