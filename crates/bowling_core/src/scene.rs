//! Scene serialization
//!
//! A Scene bundles the world with its camera, lights and key actions, and
//! can be written to or read from RON files for a rendering collaborator.

use std::fs;
use std::io;
use std::path::Path;

use bowling_geometry::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::{ActionError, KeyAction, KeyTrigger};
use crate::World;

/// First-person free camera
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Movement speed
    pub speed: f32,
    /// Movement inertia (0.0 = none)
    pub inertia: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0),
            speed: 0.8,
            inertia: 0.4,
        }
    }
}

/// Directional light
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub name: String,
    /// Direction the light travels
    pub direction: Vec3,
    /// Optional position, used by shadow generators
    #[serde(default)]
    pub position: Option<Vec3>,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(name: impl Into<String>, direction: Vec3, intensity: f32) -> Self {
        Self {
            name: name.into(),
            direction,
            position: None,
            intensity,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }
}

/// A serializable scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// All entities
    pub world: World,
    /// The active camera
    #[serde(default)]
    pub camera: Camera,
    /// Lights in the scene
    #[serde(default)]
    pub lights: Vec<DirectionalLight>,
    /// Key bindings
    #[serde(default)]
    pub actions: Vec<KeyAction>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            world: World::new(),
            camera: Camera::default(),
            lights: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Create a scene around an existing world
    pub fn from_world(name: impl Into<String>, world: World) -> Self {
        Self {
            world,
            ..Self::new(name)
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse a scene from RON text
    pub fn from_ron_str(contents: &str) -> Result<Self, SceneLoadError> {
        Ok(ron::from_str(contents)?)
    }

    /// Render the scene as pretty RON text
    pub fn to_ron_string(&self) -> Result<String, SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }

    /// Set the camera
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Add a light
    pub fn add_light(&mut self, light: DirectionalLight) {
        self.lights.push(light);
    }

    /// Add a key binding
    pub fn add_action(&mut self, action: KeyAction) {
        self.actions.push(action);
    }

    /// Run every action bound to a key event, returning how many fired
    pub fn dispatch_key<R: Rng + ?Sized>(
        &mut self,
        key: char,
        trigger: KeyTrigger,
        rng: &mut R,
    ) -> Result<usize, ActionError> {
        let mut fired = 0;
        for action in self.actions.iter().filter(|a| a.matches(key, trigger)) {
            self.world.apply_effect(&action.effect, rng)?;
            fired += 1;
        }
        Ok(fired)
    }
}

/// Error loading a scene
#[derive(Debug, Error)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Parse error (invalid RON syntax)
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Error saving a scene
#[derive(Debug, Error)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Serialization error
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}
