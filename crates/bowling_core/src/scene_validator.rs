//! Scene validation
//!
//! Validates scenes for common errors before they are handed to a renderer.
//! The [`SceneValidator`] checks for issues like empty scenes, duplicate
//! entity names, dangling entity keys and degenerate transforms or lights.

use std::collections::HashSet;

use thiserror::Error;

use crate::scene::Scene;
use crate::shapes::ShapeTemplate;
use crate::EntityKey;

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Scene has no entities
    #[error("Scene has no entities")]
    EmptyScene,
    /// Duplicate entity name found
    #[error("Duplicate entity name: '{0}'")]
    DuplicateName(String),
    /// An entity refers to a key that is not in the world
    #[error("Entity '{entity}' refers to missing entity {target:?}")]
    DanglingReference { entity: String, target: EntityKey },
    /// An instance's source is itself an instance
    #[error("Entity '{0}' instances another instance")]
    NestedInstance(String),
    /// An action targets a key that is not in the world
    #[error("Action on key '{key}' targets missing entity {target:?}")]
    DanglingActionTarget { key: char, target: EntityKey },
    /// A scale component is zero, negative or not finite
    #[error("Entity '{0}' has a degenerate scale")]
    DegenerateScale(String),
    /// A light has no direction or a negative intensity
    #[error("Light '{0}' is degenerate")]
    DegenerateLight(String),
}

/// Scene validator that checks for common errors
///
/// # Example
/// ```ignore
/// let errors = SceneValidator::validate(&scene);
/// for error in &errors {
///     log::error!("Validation error: {}", error);
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(scene: &Scene) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let world = &scene.world;

        if world.is_empty() {
            errors.push(ValidationError::EmptyScene);
        }

        let mut seen_names = HashSet::new();
        for (key, entity) in world.iter() {
            if let Some(ref name) = entity.name {
                if !seen_names.insert(name.as_str()) {
                    errors.push(ValidationError::DuplicateName(name.clone()));
                }
            }

            for target in world.dangling_references(key) {
                errors.push(ValidationError::DanglingReference {
                    entity: entity.label().to_string(),
                    target,
                });
            }

            if let ShapeTemplate::Instance { source } = entity.shape {
                if let Some(src) = world.get_entity(source) {
                    if matches!(src.shape, ShapeTemplate::Instance { .. }) {
                        errors.push(ValidationError::NestedInstance(entity.label().to_string()));
                    }
                }
            }

            let scale = entity.transform.scale;
            if !scale.is_finite() || scale.min_element() <= 0.0 {
                errors.push(ValidationError::DegenerateScale(entity.label().to_string()));
            }
        }

        for action in &scene.actions {
            let target = action.effect.target();
            if !world.contains(target) {
                errors.push(ValidationError::DanglingActionTarget {
                    key: action.key,
                    target,
                });
            }
        }

        for light in &scene.lights {
            if light.direction.length_squared() <= f32::EPSILON || light.intensity < 0.0 {
                errors.push(ValidationError::DegenerateLight(light.name.clone()));
            }
        }

        errors
    }

    /// Check if a scene is valid (has no validation errors)
    pub fn is_valid(scene: &Scene) -> bool {
        Self::validate(scene).is_empty()
    }
}
