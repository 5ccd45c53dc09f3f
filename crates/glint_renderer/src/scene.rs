//! Scene aggregate: the surfaces to render and the materials they share.
//!
//! Materials live in an arena owned by the scene. Surfaces refer to them by
//! [`MaterialId`], so any number of spheres can share one material without
//! reference counting. A scene is built once, then only read while rendering.

use crate::{HitRecord, Hittable, Material, Ray, Sphere, Surface};
use glint_math::{Interval, Vec3};
use thiserror::Error;

/// Index of a material in a [`Scene`]'s material arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Problems that make a scene unrenderable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Surface {index} is a sphere with degenerate radius {radius}")]
    DegenerateSphere { index: usize, radius: f32 },

    #[error("Surface {index} references unknown material {material}")]
    UnknownMaterial { index: usize, material: usize },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// An ordered list of surfaces plus the material arena.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    surfaces: Vec<Surface>,
    materials: Vec<Material>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its id.
    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        self.materials.push(material.into());
        MaterialId(self.materials.len() - 1)
    }

    /// Add a surface to the scene.
    pub fn add(&mut self, surface: impl Into<Surface>) {
        self.surfaces.push(surface.into());
    }

    /// Add a sphere using a previously stored material.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: MaterialId) {
        self.add(Sphere::new(center, radius, material));
    }

    /// Look up a material by id.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Get the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Check if the scene has no surfaces.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Check the preconditions the intersection code relies on.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, surface) in self.surfaces.iter().enumerate() {
            match surface {
                Surface::Sphere(sphere) => {
                    let radius = sphere.radius();
                    if radius == 0.0 || !radius.is_finite() {
                        return Err(SceneError::DegenerateSphere { index, radius });
                    }
                    let material = sphere.material().index();
                    if material >= self.materials.len() {
                        return Err(SceneError::UnknownMaterial { index, material });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;

        for surface in &self.surfaces {
            let closest_so_far = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = surface.hit(ray, ray_t.with_max(closest_so_far)) {
                closest = Some(rec);
            }
        }

        closest
    }
}
