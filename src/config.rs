//! Viewer configuration.
//!
//! All values have code-level defaults matching the shipped scene. The only
//! runtime override is the asset root, which can be pointed elsewhere with the
//! `SHAPE_VIEWER_ASSETS` environment variable.

use std::path::{Path, PathBuf};

use wgpu::Color;

/// Environment variable that overrides the asset root.
pub const ASSET_DIR_ENV: &str = "SHAPE_VIEWER_ASSETS";

/// A texture file and the tag it is registered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureSource {
    pub tag: String,
    /// Path relative to the asset root.
    pub file: String,
}

impl TextureSource {
    pub fn new(tag: &str, file: &str) -> Self {
        Self {
            tag: tag.to_string(),
            file: file.to_string(),
        }
    }
}

/// Starting values for the free-fly camera.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    pub fov_deg: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 10.0],
            yaw_deg: -90.0,
            pitch_deg: 0.0,
            fov_deg: 45.0,
            movement_speed: 4.0,
            mouse_sensitivity: 0.12,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_colour: Color,
    pub asset_dir: PathBuf,
    /// Textures in registration order. The order defines the slot of each tag.
    pub textures: Vec<TextureSource>,
    pub camera: CameraConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Shape Viewer".to_string(),
            width: 800,
            height: 600,
            clear_colour: Color::BLACK,
            asset_dir: resolve_asset_dir(),
            textures: vec![
                TextureSource::new("floor", "textures/brick.png"),
                TextureSource::new("cone", "textures/breadcrust.png"),
                TextureSource::new("box", "textures/gold-seamless-texture.png"),
            ],
            camera: CameraConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Absolute-or-relative path of an asset below the configured root.
    pub fn asset_path(&self, file: &str) -> PathBuf {
        self.asset_dir.join(file)
    }
}

/// Picks the asset root: env override, then `./assets`, then the build-script copy.
pub fn resolve_asset_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ASSET_DIR_ENV) {
        return PathBuf::from(dir);
    }
    let local = Path::new("./").join("assets");
    if local.exists() {
        return local;
    }
    PathBuf::from(env!("SHAPE_VIEWER_BUNDLED_ASSETS"))
}
