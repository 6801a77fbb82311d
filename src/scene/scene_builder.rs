//! LaneSceneBuilder - Declarative lane scene construction
//!
//! Provides a fluent API for assembling the bowling lane scene from an
//! [`AppConfig`]. All geometry is computed up front in [`LaneSceneBuilder::new`],
//! so the `add_*` steps cannot fail.

use bowling_core::{
    DirectionalLight, Effect, Entity, EntityFlags, EntityKey, KeyAction, Material,
    MirrorReflection, Scene, ShapeTemplate, Transform3D,
};
use bowling_geometry::{
    build_ball_shape, compute_lane_dimensions, compute_pin_layout, CompositeSolidDescriptor,
    GeometryError, LaneDimensions, PinLayout, PinSpec, Quat, Vec3,
};

use crate::config::{AppConfig, SceneConfig};

/// Grass-like floor color
const FLOOR_COLOR: Material = Material::from_rgb(0.25, 0.5, 0.2);

/// Rendering group for decals, drawn over the lane
const DECAL_GROUP: u8 = 1;

/// Rendering group for the ball, drawn over the decals
const BALL_GROUP: u8 = 2;

/// Builder for the bowling lane scene
///
/// # Example
/// ```ignore
/// let scene = LaneSceneBuilder::new(&config)?
///     .add_floor()
///     .add_skybox()
///     .add_lights()
///     .add_lane()
///     .add_gutters()
///     .add_pins()
///     .add_ball()
///     .add_recolor_action()
///     .build();
/// ```
pub struct LaneSceneBuilder {
    scene: Scene,
    settings: SceneConfig,
    pin_spec: PinSpec,
    layout: PinLayout,
    dimensions: LaneDimensions,
    ball_shape: CompositeSolidDescriptor,
    ball_radius: f32,
    lane: Option<EntityKey>,
    skybox: Option<EntityKey>,
    ball: Option<EntityKey>,
    pins: Vec<EntityKey>,
}

impl LaneSceneBuilder {
    /// Validate the configuration and compute all lane geometry
    pub fn new(config: &AppConfig) -> Result<Self, GeometryError> {
        config.validate()?;
        let layout = compute_pin_layout(&config.pins, &config.lane)?;
        let dimensions = compute_lane_dimensions(&config.lane)?;
        let ball_shape = build_ball_shape(&config.ball)?;

        log::debug!(
            "Lane {:.2}m long, head pin at z={:.2}",
            dimensions.total_length,
            layout.head_pin().position.z
        );

        let settings = config.scene.clone();
        let scene = Scene::new(settings.name.clone()).with_camera(settings.camera.to_camera());

        Ok(Self {
            scene,
            settings,
            pin_spec: config.pins,
            layout,
            dimensions,
            ball_shape,
            ball_radius: config.ball.radius,
            lane: None,
            skybox: None,
            ball: None,
            pins: Vec::new(),
        })
    }

    /// Build the complete default scene in one call
    pub fn build_default(config: &AppConfig) -> Result<Scene, GeometryError> {
        Ok(Self::new(config)?
            .add_floor()
            .add_skybox()
            .add_lights()
            .add_lane()
            .add_gutters()
            .add_pins()
            .add_ball()
            .add_recolor_action()
            .build())
    }

    /// The computed pin layout
    pub fn layout(&self) -> &PinLayout {
        &self.layout
    }

    /// The computed lane dimensions
    pub fn dimensions(&self) -> &LaneDimensions {
        &self.dimensions
    }

    /// Add the square ground plane
    pub fn add_floor(mut self) -> Self {
        let size = self.settings.floor_size;
        self.scene.world.add_entity(
            Entity::with_material(
                ShapeTemplate::Ground {
                    width: size,
                    depth: size,
                    subdivisions: 1,
                },
                FLOOR_COLOR,
            )
            .with_name("floor")
            .with_tag("static"),
        );
        self
    }

    /// Add the skybox, seen from inside so back-face culling is off
    pub fn add_skybox(mut self) -> Self {
        let transform = Transform3D::from_position_rotation(
            Vec3::new(0.0, self.settings.skybox_height, 0.0),
            Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2),
        );
        let key = self.scene.world.add_entity(
            Entity::with_transform(
                ShapeTemplate::cube(self.settings.skybox_size),
                transform,
                Material::BLACK.with_specular([0.0, 0.0, 0.0]),
            )
            .with_name("skybox")
            .with_tag("static")
            .with_flags(EntityFlags::ENABLED | EntityFlags::VISIBLE),
        );
        self.skybox = Some(key);
        self
    }

    /// Add the configured directional lights
    pub fn add_lights(mut self) -> Self {
        let lights: Vec<DirectionalLight> =
            self.settings.lights.iter().map(|l| l.to_light()).collect();
        for light in lights {
            self.scene.add_light(light);
        }
        self
    }

    /// Add the lane surface and its decals
    ///
    /// The lane's mirror render list is filled in by [`build`](Self::build),
    /// so pins, ball and skybox may be added before or after.
    pub fn add_lane(mut self) -> Self {
        let dims = self.dimensions;
        let transform = Transform3D::from_position(dims.center()).with_scale(dims.size());
        let lane = self.scene.world.add_entity(
            Entity::with_transform(
                ShapeTemplate::cube(1.0),
                transform,
                Material::WHITE.with_emissive([0.5, 0.5, 0.5]),
            )
            .with_name("lane")
            .with_tag("static")
            .with_reflection(MirrorReflection::horizontal(
                dims.height,
                self.settings.reflection_level,
            )),
        );
        self.lane = Some(lane);

        let decals = [
            ("dots-second-approach", dims.decals.second_approach_dots),
            ("dots-first-approach", dims.decals.first_approach_dots),
            ("foul-line", dims.decals.foul_line),
            ("arrows", dims.decals.arrows),
            ("dots-inner", dims.decals.inner_dots),
        ];
        let size = Vec3::splat(self.settings.decal_size);
        for (name, offset) in decals {
            self.scene.world.add_entity(
                Entity::with_transform(
                    ShapeTemplate::decal(lane, size),
                    Transform3D::from_position(dims.surface_point(offset)),
                    Material::WHITE,
                )
                .with_name(name)
                .with_tag("decal")
                .with_rendering_group(DECAL_GROUP),
            );
        }
        self
    }

    /// Add the gutter limiters on both sides of the lane
    pub fn add_gutters(mut self) -> Self {
        let dims = self.dimensions;
        let right = Transform3D::from_position(Vec3::new(
            dims.width,
            dims.height / 2.0,
            dims.total_length / 2.0,
        ))
        .with_scale(Vec3::new(self.settings.gutter_width, dims.height, dims.total_length));

        for (name, transform) in [("gutter-right", right), ("gutter-left", right.mirrored_x())] {
            self.scene.world.add_entity(
                Entity::with_transform(ShapeTemplate::cube(1.0), transform, Material::GRAY)
                    .with_name(name)
                    .with_tag("static"),
            );
        }
        self
    }

    /// Add the disabled pin template and its ten instances
    pub fn add_pins(mut self) -> Self {
        let pin = self.pin_spec;
        let template = self.scene.world.add_entity(
            Entity::with_material(
                ShapeTemplate::cylinder(
                    pin.height,
                    pin.diameter / 2.0,
                    pin.diameter,
                    self.settings.pin_sides,
                ),
                Material::WHITE,
            )
            .with_name("pin")
            .with_tag("template")
            .with_flags(EntityFlags::empty()),
        );

        for (i, placed) in self.layout.pins().iter().enumerate() {
            let key = self.scene.world.add_entity(
                Entity::with_transform(
                    ShapeTemplate::Instance { source: template },
                    Transform3D::from_position(placed.position),
                    Material::WHITE,
                )
                .with_name(format!("pin-{}", i))
                .with_tag("pin"),
            );
            self.pins.push(key);
        }
        self
    }

    /// Add the ball resting on the lane
    pub fn add_ball(mut self) -> Self {
        let position = Vec3::new(
            0.0,
            self.dimensions.height + self.ball_radius,
            self.settings.ball_start_z,
        );
        let key = self.scene.world.add_entity(
            Entity::with_transform(
                ShapeTemplate::Composite(self.ball_shape.clone()),
                Transform3D::from_position(position),
                Material::GREEN,
            )
            .with_name("ball")
            .with_tag("dynamic")
            .with_rendering_group(BALL_GROUP),
        );
        self.ball = Some(key);
        self
    }

    /// Bind the recolor key to the ball
    ///
    /// Does nothing if no ball has been added yet.
    pub fn add_recolor_action(mut self) -> Self {
        match self.ball {
            Some(target) => self.scene.add_action(KeyAction::on_key_up(
                self.settings.recolor_key,
                Effect::RandomizeDiffuse { target },
            )),
            None => log::warn!("No ball in scene; recolor action not bound"),
        }
        self
    }

    /// Finish the scene
    ///
    /// Fills the lane's mirror render list with the pins, the ball and the skybox.
    pub fn build(mut self) -> Scene {
        let reflected: Vec<EntityKey> = self
            .pins
            .iter()
            .copied()
            .chain(self.ball)
            .chain(self.skybox)
            .collect();

        if let Some(lane) = self.lane.and_then(|key| self.scene.world.get_entity_mut(key)) {
            if let Some(reflection) = lane.reflection.as_mut() {
                reflection.render_list = reflected;
            }
        }

        log::info!(
            "Built scene '{}' with {} entities",
            self.scene.name,
            self.scene.world.entity_count()
        );
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bowling_core::{KeyTrigger, SceneValidator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn default_scene() -> Scene {
        LaneSceneBuilder::build_default(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_default_scene_is_valid() {
        let scene = default_scene();
        assert!(SceneValidator::validate(&scene).is_empty());
        // floor, skybox, lane, 5 decals, 2 gutters, template, 10 pins, ball
        assert_eq!(scene.world.entity_count(), 22);
        assert_eq!(scene.lights.len(), 2);
        assert_eq!(scene.actions.len(), 1);
    }

    #[test]
    fn test_pins_instance_disabled_template() {
        let scene = default_scene();
        let (template, entity) = scene.world.get_by_name("pin").unwrap();
        assert!(!entity.is_enabled());

        let pins: Vec<_> = scene.world.instances_of(template).collect();
        assert_eq!(pins.len(), 10);
        assert!(pins.iter().all(|(_, e)| e.is_enabled() && e.has_tag("pin")));
    }

    #[test]
    fn test_head_pin_position() {
        let scene = default_scene();
        let (_, head) = scene.world.get_by_name("pin-0").unwrap();
        let p = head.transform.position;
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 0.44).abs() < 1e-5);
        assert!((p.z - 22.85).abs() < 1e-4);
    }

    #[test]
    fn test_lane_reflects_pins_ball_and_skybox() {
        let scene = default_scene();
        let (_, lane) = scene.world.get_by_name("lane").unwrap();
        let reflection = lane.reflection.as_ref().unwrap();
        assert_eq!(reflection.render_list.len(), 12);
        assert_eq!(reflection.plane, [0.0, -1.0, 0.0, 0.2]);

        let (ball, _) = scene.world.get_by_name("ball").unwrap();
        let (skybox, _) = scene.world.get_by_name("skybox").unwrap();
        assert!(reflection.render_list.contains(&ball));
        assert!(reflection.render_list.contains(&skybox));
    }

    #[test]
    fn test_reflection_independent_of_step_order() {
        let scene = LaneSceneBuilder::new(&AppConfig::default())
            .unwrap()
            .add_pins()
            .add_lane()
            .add_ball()
            .build();
        let (_, lane) = scene.world.get_by_name("lane").unwrap();
        assert_eq!(lane.reflection.as_ref().unwrap().render_list.len(), 11);
    }

    #[test]
    fn test_decals_sit_on_lane() {
        let scene = default_scene();
        let (lane, _) = scene.world.get_by_name("lane").unwrap();
        let decals: Vec<_> = scene.world.with_tag("decal").collect();
        assert_eq!(decals.len(), 5);
        for (_, decal) in decals {
            assert_eq!(decal.shape.referenced_key(), Some(lane));
            assert_eq!(decal.rendering_group, DECAL_GROUP);
            assert!((decal.transform.position.y - 0.2).abs() < 1e-6);
        }
        let (_, foul) = scene.world.get_by_name("foul-line").unwrap();
        assert!((foul.transform.position.z - 8.57).abs() < 1e-4);
    }

    #[test]
    fn test_gutters_mirror_each_other() {
        let scene = default_scene();
        let (_, right) = scene.world.get_by_name("gutter-right").unwrap();
        let (_, left) = scene.world.get_by_name("gutter-left").unwrap();
        assert_eq!(right.transform.position.x, 1.07);
        assert_eq!(left.transform.position.x, -1.07);
        assert_eq!(right.transform.scale, left.transform.scale);
    }

    #[test]
    fn test_ball_rests_on_lane() {
        let scene = default_scene();
        let (_, ball) = scene.world.get_by_name("ball").unwrap();
        assert!((ball.transform.position.y - 0.31).abs() < 1e-6);
        assert_eq!(ball.transform.position.z, 5.0);
        assert_eq!(ball.rendering_group, BALL_GROUP);
        assert!(matches!(ball.shape, ShapeTemplate::Composite(_)));
    }

    #[test]
    fn test_skybox_has_no_back_face_culling() {
        let scene = default_scene();
        let (_, skybox) = scene.world.get_by_name("skybox").unwrap();
        assert!(!skybox.flags.contains(EntityFlags::BACK_FACE_CULLING));
        assert!(skybox.is_visible());
        assert_eq!(skybox.transform.position.y, 3.5);
    }

    #[test]
    fn test_recolor_key_changes_ball() {
        let mut scene = default_scene();
        let mut rng = StdRng::seed_from_u64(11);
        let fired = scene.dispatch_key('c', KeyTrigger::KeyUp, &mut rng).unwrap();
        assert_eq!(fired, 1);
        let (_, ball) = scene.world.get_by_name("ball").unwrap();
        assert_ne!(ball.material, Material::GREEN);
    }

    #[test]
    fn test_recolor_without_ball_is_skipped() {
        let scene = LaneSceneBuilder::new(&AppConfig::default())
            .unwrap()
            .add_recolor_action()
            .build();
        assert!(scene.actions.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.lane.width = -1.0;
        let err = LaneSceneBuilder::new(&config).err().unwrap();
        assert_eq!(err.field(), "width");
    }
}
