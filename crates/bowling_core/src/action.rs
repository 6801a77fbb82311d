//! Key-triggered scene actions
//!
//! Actions are plain data bound to a key. Capturing input is left to the host;
//! it reports key events to [`Scene::dispatch_key`](crate::Scene::dispatch_key).

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EntityKey, World};

/// When a key binding fires
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyTrigger {
    KeyDown,
    KeyUp,
}

/// What an action does to the world
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Replace the target's diffuse color with a random opaque color
    RandomizeDiffuse { target: EntityKey },
}

impl Effect {
    /// The entity this effect acts on
    pub fn target(&self) -> EntityKey {
        match self {
            Effect::RandomizeDiffuse { target } => *target,
        }
    }
}

/// A key binding
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyAction {
    /// Bound key, matched case-insensitively
    pub key: char,
    pub trigger: KeyTrigger,
    pub effect: Effect,
}

impl KeyAction {
    pub fn on_key_up(key: char, effect: Effect) -> Self {
        Self {
            key,
            trigger: KeyTrigger::KeyUp,
            effect,
        }
    }

    /// Check whether a key event fires this binding
    pub fn matches(&self, key: char, trigger: KeyTrigger) -> bool {
        self.trigger == trigger && self.key.eq_ignore_ascii_case(&key)
    }
}

/// Error applying an effect
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// The target entity is no longer in the world
    #[error("action target {0:?} is not in the world")]
    MissingTarget(EntityKey),
}

impl World {
    /// Apply an effect with the given random source
    pub fn apply_effect<R: Rng + ?Sized>(&mut self, effect: &Effect, rng: &mut R) -> Result<(), ActionError> {
        match *effect {
            Effect::RandomizeDiffuse { target } => {
                let entity = self
                    .get_entity_mut(target)
                    .ok_or(ActionError::MissingTarget(target))?;
                let rgb = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()];
                entity.material.set_diffuse_rgb(rgb);
                log::debug!("Recolored '{}' to {:?}", entity.label(), rgb);
            }
        }
        Ok(())
    }
}
