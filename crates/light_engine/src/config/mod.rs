//! Configuration system
//!
//! File-backed settings for the demo programs. Every value defaults to the constants
//! the demos were designed around, so a missing config file changes nothing.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value outside its usable range
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial window width in pixels
    pub width: u32,
    /// Initial window height in pixels
    pub height: u32,
    /// Title prefix; the light variant name is appended
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Light Lab".to_string(),
        }
    }
}

/// Camera and orbit-controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Aspect ratio used until the first resize
    pub initial_aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Camera position in world space
    pub position: [f32; 3],
    /// Point the orbit controller circles around
    pub orbit_target: [f32; 3],
}

impl CameraConfig {
    /// Check that a perspective projection can be built from these values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fov_ok = self.fov_degrees > 0.0 && self.fov_degrees < 180.0;
        if !fov_ok {
            return Err(ConfigError::Invalid(format!("camera.fov_degrees = {}", self.fov_degrees)));
        }
        let aspect_ok = self.initial_aspect.is_finite() && self.initial_aspect > 0.0;
        if !aspect_ok {
            return Err(ConfigError::Invalid(format!("camera.initial_aspect = {}", self.initial_aspect)));
        }
        let clip_ok = self.near > 0.0 && self.far.is_finite() && self.far > self.near;
        if !clip_ok {
            return Err(ConfigError::Invalid(format!(
                "camera.near = {}, camera.far = {}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            initial_aspect: 2.0,
            near: 0.1,
            far: 100.0,
            position: [0.0, 10.0, 20.0],
            orbit_target: [0.0, 5.0, 0.0],
        }
    }
}

/// Static scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Edge length of the square ground plane
    pub plane_size: f32,
    /// Ground texture path (a 2x2 checker tile)
    pub texture_path: String,
    /// Clear color
    pub background: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            plane_size: 40.0,
            texture_path: "image/checker.png".to_string(),
            background: "black".to_string(),
        }
    }
}

/// Top-level settings for a light demo program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Camera settings
    pub camera: CameraConfig,
    /// Scene settings
    pub scene: SceneConfig,
}

impl Config for DemoConfig {}

impl DemoConfig {
    /// Load from `path` if it exists, falling back to defaults otherwise
    ///
    /// A missing file is normal and logged at debug level; an unreadable or invalid
    /// file is logged as a warning and also falls back to defaults.
    pub fn load_or_default(path: &str) -> Self {
        if !Path::new(path).exists() {
            log::debug!("No config at {}, using defaults", path);
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(mut config) => {
                log::info!("Loaded demo config from {}", path);
                if let Err(e) = config.camera.validate() {
                    log::warn!("{} in {}, using default camera", e, path);
                    config.camera = CameraConfig::default();
                }
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DemoConfig = toml::from_str(
            r#"
            [window]
            width = 800

            [scene]
            texture_path = "assets/checker.png"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.scene.texture_path, "assets/checker.png");
        assert!((config.scene.plane_size - 40.0).abs() < f32::EPSILON);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_ron_round_trip_through_files() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("light_demo_config_{}.ron", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        let mut config = DemoConfig::default();
        config.camera.fov_degrees = 60.0;
        config.save_to_file(&path_str).expect("save ron");

        let loaded = DemoConfig::load_from_file(&path_str).expect("load ron");
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let result = DemoConfig::default().save_to_file("settings.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_default_camera_is_valid() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_camera_rejected() {
        let zero_aspect = CameraConfig { initial_aspect: 0.0, ..CameraConfig::default() };
        assert!(matches!(zero_aspect.validate(), Err(ConfigError::Invalid(_))));

        let flat_frustum = CameraConfig { near: 5.0, far: 5.0, ..CameraConfig::default() };
        assert!(matches!(flat_frustum.validate(), Err(ConfigError::Invalid(_))));

        let nan_fov = CameraConfig { fov_degrees: f32::NAN, ..CameraConfig::default() };
        assert!(nan_fov.validate().is_err());
    }

    #[test]
    fn test_invalid_camera_in_file_replaced_by_defaults() {
        let path = std::env::temp_dir().join(format!("light_demo_camera_{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[window]\nwidth = 640\n\n[camera]\ninitial_aspect = 0.0\nnear = 1.0\nfar = 1.0\n",
        )
        .expect("write toml");

        let config = DemoConfig::load_or_default(&path.to_string_lossy());
        assert_eq!(config.window.width, 640);
        assert_eq!(config.camera, CameraConfig::default());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load_or_default("definitely/not/here/light_demo.toml");
        assert_eq!(config, DemoConfig::default());
    }
}
