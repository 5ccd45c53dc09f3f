//! Surface scattering models.

use crate::hittable::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::Ray;
use glint_math::{near_zero, reflect, refract, Color};
use rand::RngCore;

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel fraction of light carried by the scattered ray
    pub attenuation: Color,
    /// The new ray leaving the hit point
    pub scattered: Ray,
}

/// How light interacts with a surface. The set of models is fixed.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` if the ray scatters, or `None` if it is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(ray_in, rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the reflection below the surface; that light is absorbed
        if scattered_dir.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered: Ray::new(rec.p, scattered_dir),
            })
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let direction = if cannot_refract(refraction_ratio, sin_theta)
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Total internal reflection test.
#[inline]
fn cannot_refract(refraction_ratio: f32, sin_theta: f32) -> bool {
    refraction_ratio * sin_theta > 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaterialId;
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays a fixed sequence of 32-bit draws, cycling when exhausted.
    struct ScriptedRng {
        draws: Vec<u32>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(draws: &[u32]) -> Self {
            Self {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.draws[self.next % self.draws.len()];
            self.next += 1;
            value
        }

        fn next_u64(&mut self) -> u64 {
            let lo = u64::from(self.next_u32());
            let hi = u64::from(self.next_u32());
            (hi << 32) | lo
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    // Draws 0.5, 0.25, 0.5 map to the in-sphere point (0, -0.5, 0)
    const OPPOSITE_NORMAL_DRAWS: [u32; 3] = [0x8000_0000, 0x4000_0000, 0x8000_0000];

    fn record(normal: Vec3, front_face: bool) -> HitRecord {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            material: MaterialId::default(),
            t: 1.0,
            front_face,
        }
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let material = Material::from(Lambertian::new(Color::new(0.8, 0.3, 0.3)));
        let mut rng = StdRng::seed_from_u64(11);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        for normal in [Vec3::Y, Vec3::X, Vec3::new(1.0, 1.0, 1.0).normalize()] {
            let rec = record(normal, true);
            for _ in 0..500 {
                let result = material.scatter(&ray, &rec, &mut rng).unwrap();
                assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
                assert_eq!(result.scattered.origin, rec.p);
                assert!(!near_zero(result.scattered.direction));
                assert!(result.scattered.direction.dot(normal) >= -1e-6);
            }
        }
    }

    #[test]
    fn test_lambertian_degenerate_direction_falls_back_to_normal() {
        let mut rng = ScriptedRng::new(&OPPOSITE_NORMAL_DRAWS);
        assert_eq!(random_unit_vector(&mut rng), Vec3::NEG_Y);

        let material = Lambertian::new(Color::splat(0.5));
        let rec = record(Vec3::Y, true);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        let mut rng = ScriptedRng::new(&OPPOSITE_NORMAL_DRAWS);
        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.direction, rec.normal);
        assert_eq!(result.scattered.origin, rec.p);
        assert_eq!(result.attenuation, Color::splat(0.5));
    }

    #[test]
    fn test_metal_perfect_mirror() {
        let material = Material::from(Metal::new(Color::splat(0.9), 0.0));
        let mut rng = StdRng::seed_from_u64(12);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = record(Vec3::new(0.0, 1.0, 0.0), true);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.direction, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(result.attenuation, Color::splat(0.9));
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_metal_grazing_fuzz_can_absorb() {
        // Nearly tangent incoming ray with maximum fuzz: some draws go below the surface
        let material = Material::from(Metal::new(Color::ONE, 1.0));
        let mut rng = StdRng::seed_from_u64(13);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.01, 0.0));
        let rec = record(Vec3::Y, true);

        let mut absorbed = 0;
        for _ in 0..500 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction.dot(Vec3::Y) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_normal_incidence_has_no_total_internal_reflection() {
        let glass = Dielectric::new(1.5);
        let mut rng = StdRng::seed_from_u64(14);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        for front_face in [true, false] {
            let rec = record(Vec3::Y, front_face);
            let ratio = if front_face { 1.0 / glass.ior() } else { glass.ior() };
            let cos_theta = (-ray.direction().normalize()).dot(rec.normal).min(1.0);
            let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
            assert!(!cannot_refract(ratio, sin_theta));

            // Schlick gives ~4% reflectance head-on, so most rays pass straight through
            let mut refracted = 0;
            for _ in 0..1000 {
                let result = glass.scatter(&ray, &rec, &mut rng).unwrap();
                assert_eq!(result.attenuation, Color::ONE);
                if (result.scattered.direction - Vec3::NEG_Y).length() < 1e-5 {
                    refracted += 1;
                }
            }
            assert!(refracted > 900, "only {refracted} of 1000 rays refracted");
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection_from_inside() {
        // Leaving glass at 60 degrees from the normal: 1.5 * sin(60) > 1
        let glass = Material::from(Dielectric::new(1.5));
        let mut rng = StdRng::seed_from_u64(15);
        let incoming = Vec3::new(60f32.to_radians().sin(), -60f32.to_radians().cos(), 0.0);
        let ray = Ray::new(Vec3::ZERO, incoming);
        let rec = record(Vec3::Y, false);

        for _ in 0..100 {
            let result = glass.scatter(&ray, &rec, &mut rng).unwrap();
            let expected = reflect(incoming.normalize(), Vec3::Y);
            assert!((result.scattered.direction - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        // Head-on glass reflectance is ((1 - 1.5) / (1 + 1.5))^2 = 0.04
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        // Symmetric under swapping the media
        assert!((Dielectric::reflectance(1.0, 1.0 / 1.5) - 0.04).abs() < 1e-6);
        // Grazing incidence reflects everything
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }
}
