//! Random sampling helpers.
//!
//! Every helper draws from an injected `RngCore`, so callers decide which
//! generator backs a render. The frame loop gives each image row its own
//! seeded generator (see [`row_rng`]); nothing here touches shared state.

use glint_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform float in [low, high).
#[inline]
pub fn uniform(rng: &mut dyn RngCore, low: f32, high: f32) -> f32 {
    low + (high - low) * gen_f32(rng)
}

/// Random point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            uniform(rng, -1.0, 1.0),
            uniform(rng, -1.0, 1.0),
            uniform(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random unit vector, uniformly distributed on the sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random unit vector in the hemisphere around `normal`.
pub fn random_on_hemisphere(rng: &mut dyn RngCore, normal: Vec3) -> Vec3 {
    let v = random_unit_vector(rng);
    if v.dot(normal) > 0.0 {
        v
    } else {
        -v
    }
}

/// Sub-pixel offset in [-0.5, 0.5) x [-0.5, 0.5).
#[inline]
pub fn sample_square(rng: &mut dyn RngCore) -> (f32, f32) {
    (gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
}

/// Generator for one image row.
///
/// Depends only on the frame seed and the row index, so the draws for a row do
/// not change with the number of workers or the order rows are visited in.
pub fn row_rng(seed: u64, y: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (u64::from(y) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
