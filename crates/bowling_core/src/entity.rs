//! Entity and Material types
//!
//! An Entity represents an object in the scene with a transform, shape, and material.

use std::collections::BTreeSet;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::shapes::ShapeTemplate;
use crate::{EntityKey, Transform3D};

bitflags! {
    /// Render-state flags of an entity
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct EntityFlags: u8 {
        /// Entity takes part in the scene (disabled entities only serve as sources)
        const ENABLED = 1 << 0;
        /// Entity is drawn
        const VISIBLE = 1 << 1;
        /// Back faces are culled when drawing
        const BACK_FACE_CULLING = 1 << 2;
        /// Default for a freshly created entity
        const DEFAULT = Self::ENABLED.bits() | Self::VISIBLE.bits() | Self::BACK_FACE_CULLING.bits();
    }
}

impl Default for EntityFlags {
    fn default() -> Self {
        EntityFlags::DEFAULT
    }
}

/// A simple material with diffuse, specular and emissive colors
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
    /// Specular color as RGB
    #[serde(default = "Material::default_specular")]
    pub specular: [f32; 3],
    /// Emissive color as RGB
    #[serde(default)]
    pub emissive: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Material {
    /// Create a new material with the given RGBA color
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            base_color: [r, g, b, a],
            specular: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
        }
    }

    /// Create a new opaque material with the given RGB color
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Set the specular color
    pub fn with_specular(mut self, specular: [f32; 3]) -> Self {
        self.specular = specular;
        self
    }

    /// Set the emissive color
    pub fn with_emissive(mut self, emissive: [f32; 3]) -> Self {
        self.emissive = emissive;
        self
    }

    /// Replace the RGB part of the diffuse color, keeping alpha
    pub fn set_diffuse_rgb(&mut self, rgb: [f32; 3]) {
        self.base_color[0] = rgb[0];
        self.base_color[1] = rgb[1];
        self.base_color[2] = rgb[2];
    }

    fn default_specular() -> [f32; 3] {
        [1.0, 1.0, 1.0]
    }

    /// White material
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);

    /// Gray material
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);

    /// Black material
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);

    /// Green material
    pub const GREEN: Self = Self::from_rgb(0.0, 1.0, 0.0);
}

/// Planar mirror reflection rendered onto an entity's surface
///
/// The render list holds the keys of the entities that appear in the mirror.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MirrorReflection {
    /// Mirror plane as (a, b, c, d) with a*x + b*y + c*z + d = 0
    pub plane: [f32; 4],
    /// Reflection strength (0.0-1.0)
    pub level: f32,
    /// Texture resolution of the reflection
    pub resolution: u32,
    /// Entities drawn into the reflection
    pub render_list: Vec<EntityKey>,
}

impl MirrorReflection {
    /// A downward-facing mirror plane at the given height
    pub fn horizontal(height: f32, level: f32) -> Self {
        Self {
            plane: [0.0, -1.0, 0.0, height],
            level,
            resolution: 1024,
            render_list: Vec::new(),
        }
    }

    /// Add entities to the render list
    pub fn with_render_list(mut self, keys: impl IntoIterator<Item = EntityKey>) -> Self {
        self.render_list.extend(keys);
        self
    }
}

/// An entity in the scene
///
/// Each entity has:
/// - An optional name (for display and diagnostics, never for lookup by dependents)
/// - Tags (for categorization and filtering)
/// - A transform (position, rotation, scale)
/// - A shape template (the geometry)
/// - A material (visual properties)
/// - Render flags and a rendering group
/// - An optional mirror reflection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Optional name for this entity
    pub name: Option<String>,
    /// Tags for categorization (e.g., "pin", "decal")
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// The entity's transform in world space
    pub transform: Transform3D,
    /// The entity's shape
    pub shape: ShapeTemplate,
    /// The entity's material
    pub material: Material,
    /// Render-state flags
    #[serde(default)]
    pub flags: EntityFlags,
    /// Draw order group; higher groups draw later
    #[serde(default)]
    pub rendering_group: u8,
    /// Optional mirror reflection on this entity's surface
    #[serde(default)]
    pub reflection: Option<MirrorReflection>,
}

impl Entity {
    /// Create a new entity with the given shape
    pub fn new(shape: ShapeTemplate) -> Self {
        Self::with_transform(shape, Transform3D::identity(), Material::default())
    }

    /// Create a new entity with shape and material
    pub fn with_material(shape: ShapeTemplate, material: Material) -> Self {
        Self::with_transform(shape, Transform3D::identity(), material)
    }

    /// Create a new entity with shape, transform, and material
    pub fn with_transform(shape: ShapeTemplate, transform: Transform3D, material: Material) -> Self {
        Self {
            name: None,
            tags: BTreeSet::new(),
            transform,
            shape,
            material,
            flags: EntityFlags::DEFAULT,
            rendering_group: 0,
            reflection: None,
        }
    }

    /// Set the name of this entity
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this entity
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Add multiple tags to this entity
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for tag in tags {
            self.tags.insert(tag.into());
        }
        self
    }

    /// Replace the render flags
    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the rendering group
    pub fn with_rendering_group(mut self, group: u8) -> Self {
        self.rendering_group = group;
        self
    }

    /// Attach a mirror reflection
    pub fn with_reflection(mut self, reflection: MirrorReflection) -> Self {
        self.reflection = Some(reflection);
        self
    }

    /// Check if this entity has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Check if this entity takes part in the scene
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.flags.contains(EntityFlags::ENABLED)
    }

    /// Check if this entity is drawn
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(EntityFlags::ENABLED | EntityFlags::VISIBLE)
    }

    /// Label used in logs and validation messages
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// Every key this entity refers to (shape source or host, reflection list)
    pub fn referenced_keys(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.shape
            .referenced_key()
            .into_iter()
            .chain(self.reflection.iter().flat_map(|r| r.render_list.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bowling_geometry::Vec3;

    #[test]
    fn test_material_default() {
        let m = Material::default();
        assert_eq!(m.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(m.emissive, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_material_from_rgb() {
        let m = Material::from_rgb(0.5, 0.6, 0.7);
        assert_eq!(m.base_color, [0.5, 0.6, 0.7, 1.0]);
    }

    #[test]
    fn test_set_diffuse_keeps_alpha() {
        let mut m = Material::new(0.0, 0.0, 0.0, 0.5);
        m.set_diffuse_rgb([0.1, 0.2, 0.3]);
        assert_eq!(m.base_color, [0.1, 0.2, 0.3, 0.5]);
    }

    #[test]
    fn test_skybox_style_material() {
        let m = Material::BLACK.with_specular([0.0, 0.0, 0.0]);
        assert_eq!(m.specular, [0.0, 0.0, 0.0]);
        assert_eq!(m.base_color, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_entity_flags_default() {
        let flags = EntityFlags::default();
        assert!(flags.contains(EntityFlags::ENABLED));
        assert!(flags.contains(EntityFlags::VISIBLE));
        assert!(flags.contains(EntityFlags::BACK_FACE_CULLING));
    }

    #[test]
    fn test_disabled_entity_is_not_visible() {
        let entity = Entity::new(ShapeTemplate::cube(1.0))
            .with_flags(EntityFlags::VISIBLE);
        assert!(!entity.is_enabled());
        assert!(!entity.is_visible());
    }

    #[test]
    fn test_entity_builders() {
        let entity = Entity::with_material(ShapeTemplate::cube(1.0), Material::GRAY)
            .with_name("lane")
            .with_tags(["static", "lane"])
            .with_rendering_group(1);

        assert_eq!(entity.label(), "lane");
        assert!(entity.has_tag("static"));
        assert!(entity.has_tag("lane"));
        assert_eq!(entity.rendering_group, 1);
        assert_eq!(entity.material, Material::GRAY);
    }

    #[test]
    fn test_entity_with_transform() {
        let transform = Transform3D::from_position(Vec3::new(1.0, 2.0, 3.0));
        let entity = Entity::with_transform(ShapeTemplate::cube(1.0), transform, Material::GREEN);
        assert_eq!(entity.transform.position.x, 1.0);
        assert_eq!(entity.material.base_color, [0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unnamed_label() {
        assert_eq!(Entity::new(ShapeTemplate::cube(1.0)).label(), "<unnamed>");
    }

    #[test]
    fn test_mirror_plane() {
        let mirror = MirrorReflection::horizontal(0.2, 0.2);
        assert_eq!(mirror.plane, [0.0, -1.0, 0.0, 0.2]);
        assert!(mirror.render_list.is_empty());
    }
}
