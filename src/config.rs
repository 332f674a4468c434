//! Startup options, loaded from TOML.
//!
//! Every section uses `#[serde(default)]`, so a file that only overrides `[camera]` still gets
//! the stock window, projection and scene.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, mesh::MeshKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowOptions,
    pub camera: CameraOptions,
    pub projection: ProjectionOptions,
    /// Image files, addressed by index from `Drawable::texture`.
    pub textures: Vec<PathBuf>,
    pub drawables: Vec<Drawable>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowOptions::default(),
            camera: CameraOptions::default(),
            projection: ProjectionOptions::default(),
            textures: vec![PathBuf::from("Wood.jpg")],
            drawables: default_drawables(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f32; 4],
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Tutorial 3.4".to_owned(),
            width: 800,
            height: 600,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Initial camera pose and its fixed tuning constants. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    pub position: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    /// world units per second
    pub movement_speed: f32,
    /// degrees per pixel of cursor travel
    pub mouse_sensitivity: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            zoom: 45.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Pixels per world unit for the orthographic volume; half extents are `size / ortho_scale`.
    pub ortho_scale: f32,
    pub ortho_near: f32,
    pub ortho_far: f32,
    pub perspective_near: f32,
    pub perspective_far: f32,
    pub start_orthographic: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            ortho_scale: 150.0,
            ortho_near: 4.5,
            ortho_far: 6.5,
            perspective_near: 0.5,
            perspective_far: 150.0,
            start_orthographic: false,
        }
    }
}

/// One entry of the scene table: which mesh, which texture slot, and where it sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub name: String,
    pub mesh: MeshKind,
    #[serde(default)]
    pub texture: usize,
    #[serde(flatten)]
    pub placement: Placement,
}

/// Scale, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub scale: Vec3,
    pub rotation_axis: Vec3,
    pub rotation_degrees: f32,
    pub translation: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation_axis: Vec3::Y,
            rotation_degrees: 0.0,
            translation: Vec3::ZERO,
        }
    }
}

fn default_drawables() -> Vec<Drawable> {
    let case = |name: &str, x: f32| Drawable {
        name: name.to_owned(),
        mesh: MeshKind::Box,
        texture: 0,
        placement: Placement {
            scale: Vec3::new(3.0, 1.0, 9.0),
            rotation_axis: Vec3::new(0.0, 0.0, 0.8),
            rotation_degrees: 0.0,
            translation: Vec3::new(x, -2.7, -5.0),
        },
    };

    vec![
        Drawable {
            name: "table".to_owned(),
            mesh: MeshKind::Table,
            texture: 0,
            placement: Placement {
                scale: Vec3::new(27.0, 0.2, 140.0),
                rotation_axis: Vec3::new(0.0, -5.0, 0.0),
                rotation_degrees: 0.0,
                translation: Vec3::new(-1.0, -3.0, 0.0),
            },
        },
        case("left case", -4.0),
        case("middle case", -1.0),
        case("right case", 2.0),
    ]
}
