//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BOWL_SECTION__KEY`)
//!
//! Every lane measurement lives here rather than in code: the reference
//! values are tuned for looks, not taken from a rulebook.

use std::path::Path;

use bowling_core::{Camera, DirectionalLight};
use bowling_geometry::{BallSpec, GeometryError, LaneSpec, PinSpec, Vec3};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Lane measurements
    #[serde(default)]
    pub lane: LaneSpec,
    /// Pin measurements
    #[serde(default)]
    pub pins: PinSpec,
    /// Ball measurements
    #[serde(default)]
    pub ball: BallSpec,
    /// Scene dressing (floor, skybox, gutters, camera, lights)
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`BOWL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BOWL_LANE__WIDTH=1.2 -> lane.width = 1.2
        figment = figment.merge(Env::prefixed("BOWL_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Check every measurement before any geometry is computed
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.lane.validate()?;
        self.pins.validate()?;
        self.ball.validate()
    }
}

/// Scene dressing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene name
    pub name: String,
    /// Edge length of the square ground
    pub floor_size: f32,
    /// Edge length of the skybox cube
    pub skybox_size: f32,
    /// Height of the skybox centre
    pub skybox_height: f32,
    /// Width of each gutter limiter
    pub gutter_width: f32,
    /// Edge length of the decal projection box
    pub decal_size: f32,
    /// Number of sides of the pin cylinder
    pub pin_sides: u32,
    /// Strength of the lane's mirror reflection
    pub reflection_level: f32,
    /// Distance of the ball from the near end of the lane
    pub ball_start_z: f32,
    /// Key that recolors the ball
    pub recolor_key: char,
    /// Camera settings
    pub camera: CameraConfig,
    /// Directional lights
    pub lights: Vec<LightConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "Bowling Lane".to_string(),
            floor_size: 100.0,
            skybox_size: 100.0,
            skybox_height: 3.5,
            gutter_width: 0.2,
            decal_size: 1.0,
            pin_sides: 6,
            reflection_level: 0.2,
            ball_start_z: 5.0,
            recolor_key: 'c',
            camera: CameraConfig::default(),
            lights: vec![
                LightConfig {
                    name: "dir01".to_string(),
                    direction: [0.5, -1.0, 0.5],
                    position: Some([20.0, 40.0, -20.0]),
                    intensity: 0.9,
                },
                LightConfig {
                    name: "dir02".to_string(),
                    direction: [-0.5, -1.0, -0.5],
                    position: None,
                    intensity: 0.35,
                },
            ],
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Movement speed
    pub speed: f32,
    /// Movement inertia
    pub inertia: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 1.6, 0.0],
            speed: 0.8,
            inertia: 0.4,
        }
    }
}

impl CameraConfig {
    /// Convert to the scene camera
    pub fn to_camera(&self) -> Camera {
        Camera {
            position: Vec3::from_array(self.start_position),
            speed: self.speed,
            inertia: self.inertia,
        }
    }
}

/// Directional light configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    pub name: String,
    /// Direction [x, y, z]
    pub direction: [f32; 3],
    /// Optional position [x, y, z]
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    pub intensity: f32,
}

impl LightConfig {
    /// Convert to a scene light
    pub fn to_light(&self) -> DirectionalLight {
        let light = DirectionalLight::new(
            self.name.clone(),
            Vec3::from_array(self.direction),
            self.intensity,
        );
        match self.position {
            Some(p) => light.with_position(Vec3::from_array(p)),
            None => light,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.lane.width, 1.07);
        assert_eq!(config.pins.distance_between_pins, 0.3);
        assert_eq!(config.ball.radius, 0.11);
        assert_eq!(config.scene.lights.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("foul_line_to_head_pin"));
        assert!(toml.contains("distance_between_rows"));
        assert!(toml.contains("log_level"));
    }

    #[test]
    fn test_camera_conversion() {
        let camera = CameraConfig::default().to_camera();
        assert_eq!(camera.position, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(camera.speed, 0.8);
    }

    #[test]
    fn test_light_conversion() {
        let lights: Vec<DirectionalLight> =
            SceneConfig::default().lights.iter().map(LightConfig::to_light).collect();
        assert_eq!(lights[0].position, Some(Vec3::new(20.0, 40.0, -20.0)));
        assert_eq!(lights[1].position, None);
        assert_eq!(lights[1].intensity, 0.35);
    }

    #[test]
    fn test_invalid_measurement_fails_validation() {
        let mut config = AppConfig::default();
        config.pins.height = 0.0;
        assert_eq!(config.validate().unwrap_err().field(), "pin_height");
    }
}
