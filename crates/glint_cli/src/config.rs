//! Program configuration, loaded from an optional JSON file.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "width": 400,
//!   "height": 225,
//!   "scene": "single_sphere",
//!   "camera": { "kind": "look_at", "look_from": [-2, 2, 1], "look_at": [0, 0, -1], "vup": [0, 1, 0], "vfov": 20 },
//!   "render": { "samples_per_pixel": 50, "integrator": "iterative", "seed": 7 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glint_renderer::{scenes, Camera, RenderConfig, Scene, Vec3};
use serde::{Deserialize, Serialize};

/// Which built-in scene to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenePreset {
    #[default]
    Showcase,
    SingleSphere,
}

impl ScenePreset {
    pub fn build(self) -> Scene {
        match self {
            ScenePreset::Showcase => scenes::material_showcase(),
            ScenePreset::SingleSphere => scenes::single_sphere(),
        }
    }
}

/// Camera placement. The aspect ratio always comes from the output size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraConfig {
    /// Eye at the origin looking down -Z
    Simple {
        viewport_height: f32,
        focal_length: f32,
    },
    /// Eye anywhere, vertical field of view in degrees
    LookAt {
        look_from: [f32; 3],
        look_at: [f32; 3],
        vup: [f32; 3],
        vfov: f32,
    },
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig::Simple {
            viewport_height: 2.0,
            focal_length: 1.0,
        }
    }
}

impl CameraConfig {
    pub fn build(&self, aspect_ratio: f32) -> Camera {
        match *self {
            CameraConfig::Simple {
                viewport_height,
                focal_length,
            } => Camera::axis_aligned(aspect_ratio * viewport_height, viewport_height, focal_length),
            CameraConfig::LookAt {
                look_from,
                look_at,
                vup,
                vfov,
            } => Camera::look_at(
                Vec3::from(look_from),
                Vec3::from(look_at),
                Vec3::from(vup),
                vfov,
                aspect_ratio,
            ),
        }
    }
}

/// Top-level program settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Image path; the extension picks the format
    pub output: PathBuf,
    pub scene: ScenePreset,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            output: PathBuf::from("result.png"),
            scene: ScenePreset::default(),
            camera: CameraConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn camera(&self) -> Camera {
        self.camera.build(self.aspect_ratio())
    }
}
