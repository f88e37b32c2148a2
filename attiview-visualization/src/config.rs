//! Viewer configuration

use attiview_core::{Error, Result, DEFAULT_FRAME_INTERVAL};
use attiview_gpu::RenderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Light shining on the quadrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Direction towards the light
    pub direction: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            direction: [0.0, 0.0, 1.0],
            ambient: 0.1,
            diffuse: 0.75,
        }
    }
}

/// Window, texture and animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Top-left corner of the window on screen
    pub position: [i32; 2],
    pub sphere_texture: PathBuf,
    pub ring_texture: PathBuf,
    pub frame_interval_ms: u64,
    pub start_animated: bool,
    pub background_color: [f64; 4],
    pub lighting: LightingConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Program".to_string(),
            width: 720,
            height: 720,
            position: [100, 100],
            sphere_texture: PathBuf::from("./sphere.jpg"),
            ring_texture: PathBuf::from("./ring.jpg"),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL.as_millis() as u64,
            start_animated: false,
            background_color: [0.0, 0.0, 0.0, 1.0],
            lighting: LightingConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            Error::InvalidData(format!("invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidData(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(Error::InvalidData(
                "frame interval must be at least 1 ms".to_string(),
            ));
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            background_color: self.background_color,
            light_direction: self.lighting.direction,
            ambient: self.lighting.ambient,
            diffuse: self.lighting.diffuse,
        }
    }
}
