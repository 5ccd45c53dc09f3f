//! Built-in scenes.

use crate::{Color, Dielectric, Lambertian, Metal, Scene};
use glint_math::Vec3;

const GROUND_CENTER: Vec3 = Vec3::new(0.0, -100.5, -1.0);
const GROUND_RADIUS: f32 = 100.0;

/// Ground plus three spheres: diffuse in the middle, a hollow glass ball on
/// the left and fuzzy metal on the right.
pub fn material_showcase() -> Scene {
    let mut scene = Scene::new();

    let ground = scene.add_material(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center = scene.add_material(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass = scene.add_material(Dielectric::new(1.5));
    let metal = scene.add_material(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

    scene.add_sphere(GROUND_CENTER, GROUND_RADIUS, ground);
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, center);
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass);
    // Negative radius: inner surface of the glass shell
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.4, glass);
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, metal);

    scene
}

/// One sphere in front of the camera on top of the ground.
pub fn single_sphere() -> Scene {
    let mut scene = Scene::new();

    let ground = scene.add_material(Lambertian::new(Color::splat(0.5)));
    let sphere = scene.add_material(Lambertian::new(Color::new(0.7, 0.3, 0.3)));

    scene.add_sphere(GROUND_CENTER, GROUND_RADIUS, ground);
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, sphere);

    scene
}
