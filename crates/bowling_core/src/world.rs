//! World container for entities
//!
//! The World owns every entity in the scene. Entities refer to each other
//! through [`EntityKey`]s handed out by [`World::add_entity`], never by name.

use bowling_geometry::Aabb;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::shapes::ShapeTemplate;
use crate::Entity;

new_key_type! {
    /// Generational key to an entity in the world
    pub struct EntityKey;
}

/// Upper bound on instance chains followed when resolving shapes
const MAX_INSTANCE_DEPTH: usize = 8;

/// The scene world containing all entities
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Add an entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        log::debug!("Adding {} entity '{}'", entity.shape.kind(), entity.label());
        self.entities.insert(entity)
    }

    /// Remove an entity, returning it if the key was live
    pub fn remove_entity(&mut self, key: EntityKey) -> Option<Entity> {
        self.entities.remove(key)
    }

    /// Get a reference to an entity by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Check whether a key refers to a live entity
    #[inline]
    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    /// Find the first entity with the given name
    ///
    /// Linear scan meant for tests and diagnostics; dependents hold keys.
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities from the world
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Iterate over keys and entities
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Iterate over keys and entities mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityKey, &mut Entity)> {
        self.entities.iter_mut()
    }

    /// Iterate over entities carrying a tag
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = (EntityKey, &'a Entity)> + 'a {
        self.entities.iter().filter(move |(_, e)| e.has_tag(tag))
    }

    /// Iterate over instances of the given source entity
    pub fn instances_of(&self, source: EntityKey) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter().filter(move |(_, e)| {
            matches!(e.shape, ShapeTemplate::Instance { source: s } if s == source)
        })
    }

    /// Resolve the concrete shape of an entity, following instance links
    ///
    /// Returns `None` for a dead key, a dangling source, or a chain longer
    /// than the supported depth (which includes cycles).
    pub fn resolve_shape(&self, key: EntityKey) -> Option<&ShapeTemplate> {
        let mut current = key;
        for _ in 0..MAX_INSTANCE_DEPTH {
            let shape = &self.entities.get(current)?.shape;
            match shape {
                ShapeTemplate::Instance { source } => current = *source,
                _ => return Some(shape),
            }
        }
        None
    }

    /// World-space bounds of an entity
    pub fn world_bounds(&self, key: EntityKey) -> Option<Aabb> {
        let entity = self.entities.get(key)?;
        let local = self.resolve_shape(key)?.local_bounds()?;
        Some(local.transformed(entity.transform.to_matrix()))
    }

    /// Keys referenced by `key` that no longer exist in the world
    pub fn dangling_references(&self, key: EntityKey) -> Vec<EntityKey> {
        self.entities
            .get(key)
            .map(|e| e.referenced_keys().filter(|k| !self.contains(*k)).collect())
            .unwrap_or_default()
    }
}
