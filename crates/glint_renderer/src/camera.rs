//! Camera for ray generation.

use crate::Ray;
use glint_math::Vec3;

/// Maps normalized image-plane coordinates to world-space rays.
///
/// `u` runs left to right and `v` bottom to top across the viewport; (0, 0) is
/// the lower-left corner and (1, 1) the upper-right. Coordinates outside
/// [0, 1] are fine and simply land outside the nominal viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Camera at the origin looking down -Z through an axis-aligned viewport.
    pub fn axis_aligned(viewport_width: f32, viewport_height: f32, focal_length: f32) -> Self {
        let origin = Vec3::ZERO;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, focal_length);

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Axis-aligned camera with a 2-unit tall viewport at focal length 1.
    pub fn simple(aspect_ratio: f32) -> Self {
        let viewport_height = 2.0;
        Self::axis_aligned(aspect_ratio * viewport_height, viewport_height, 1.0)
    }

    /// Positioned camera.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `vup`: approximate up direction, must not be parallel to the view direction
    pub fn look_at(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect_ratio: f32) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Orthonormal camera basis
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = look_from;
        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
        }
    }

    /// Ray from the eye through image-plane point (u, v).
    #[inline]
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + u * self.horizontal + v * self.vertical - self.origin,
        )
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::simple(16.0 / 9.0)
    }
}
