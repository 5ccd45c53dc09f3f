//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use glint_math::{Interval, Vec3};

/// A sphere primitive.
///
/// A negative radius is allowed: the geometry is the same as for `|radius|`
/// but the outward normal points inwards, which turns the sphere into a hollow
/// shell (used for bubbles inside glass). A zero radius is invalid, see
/// [`crate::Scene::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Outward normal at a point on the surface. Unit length; flipped for a
    /// negative radius.
    #[inline]
    pub fn outward_normal(&self, p: Vec3) -> Vec3 {
        (p - self.center) / self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains_left_open(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains_left_open(root) {
                return None;
            }
        }

        let outward_normal = self.outward_normal(ray.at(root));
        Some(HitRecord::new(ray, root, outward_normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    fn unit_sphere_ahead(radius: f32) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), radius, MaterialId::default())
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_ahead(0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, forward()).unwrap();
        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_ahead(0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_head_on_normal_is_outward_unit() {
        let sphere = unit_sphere_ahead(0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -3.0));

        let rec = sphere.hit(&ray, forward()).unwrap();
        assert!((rec.normal.length() - 1.0).abs() < 1e-6);
        // Points from the center back towards the ray origin
        assert!(rec.normal.dot(rec.p - sphere.center()) > 0.0);
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_negative_radius_flips_outward_normal() {
        let solid = unit_sphere_ahead(0.5);
        let shell = unit_sphere_ahead(-0.5);
        let p = Vec3::new(0.0, 0.5, -1.0);

        assert_eq!(shell.outward_normal(p), -solid.outward_normal(p));

        // Same hit distance; the shell is entered from its back face
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let solid_hit = solid.hit(&ray, forward()).unwrap();
        let shell_hit = shell.hit(&ray, forward()).unwrap();
        assert_eq!(solid_hit.t, shell_hit.t);
        assert!(solid_hit.front_face);
        assert!(!shell_hit.front_face);
        assert_eq!(solid_hit.normal, shell_hit.normal);
    }

    #[test]
    fn test_far_root_from_inside() {
        let sphere = unit_sphere_ahead(0.5);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, forward()).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-6);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_interval_is_left_open() {
        let sphere = unit_sphere_ahead(0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Near root sits exactly on the lower bound: rejected, far root taken
        let rec = sphere.hit(&ray, Interval::new(0.5, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-6);

        // Near root sits exactly on the upper bound: accepted
        let rec = sphere.hit(&ray, Interval::new(0.001, 0.5)).unwrap();
        assert_eq!(rec.t, 0.5);
    }

    #[test]
    fn test_tangent_and_behind() {
        let sphere = unit_sphere_ahead(0.5);

        // Sphere entirely behind the ray
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(sphere.hit(&ray, forward()).is_none());

        // Ray passes just outside the silhouette
        let ray = Ray::new(Vec3::new(0.0, 0.51, 0.0), Vec3::NEG_Z);
        assert!(sphere.hit(&ray, forward()).is_none());
    }
}
