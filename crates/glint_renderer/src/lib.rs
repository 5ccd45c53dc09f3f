//! Glint - CPU sphere ray tracing
//!
//! Renders a fixed scene of spheres with diffuse, metal and glass materials,
//! lit only by a sky gradient. Pixels are evaluated in parallel over bands of
//! rows and written to an 8-bit RGBA [`Framebuffer`].

mod band;
mod camera;
mod framebuffer;
mod hittable;
mod material;
mod renderer;
mod scene;
mod sphere;

pub mod sampling;
pub mod scenes;

pub use band::{plan_bands, render_band, worker_count, Band};
pub use camera::Camera;
pub use framebuffer::{Framebuffer, Rgba8};
pub use hittable::{HitRecord, Hittable, Surface};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgba, linear_to_gamma, normal_color, ray_color, ray_color_iterative, render,
    sky_gradient, Integrator, RenderConfig, RenderContext, RenderError, RenderResult,
    MAX_DEPTH_LIMIT, T_MIN,
};
pub use scene::{MaterialId, Scene, SceneError, SceneResult};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Color, Interval, Ray, Vec3};
