//! End-to-end tests: configuration to validated, serialized scene

use bowling_core::{EntityFlags, Scene, SceneValidator, ShapeTemplate};
use bowling_lane::{AppConfig, LaneSceneBuilder};

#[test]
fn test_reference_scene_round_trips_through_ron() {
    let scene = LaneSceneBuilder::build_default(&AppConfig::default()).unwrap();
    let text = scene.to_ron_string().unwrap();
    let loaded = Scene::from_ron_str(&text).unwrap();

    assert!(SceneValidator::is_valid(&loaded));
    assert_eq!(loaded.world.entity_count(), scene.world.entity_count());

    let (lane, original) = scene.world.get_by_name("lane").unwrap();
    let (loaded_lane, reloaded) = loaded.world.get_by_name("lane").unwrap();
    assert_eq!(lane, loaded_lane);
    assert_eq!(original.reflection, reloaded.reflection);
}

#[test]
fn test_pins_resolve_to_template_geometry() {
    let scene = LaneSceneBuilder::build_default(&AppConfig::default()).unwrap();
    let (template, _) = scene.world.get_by_name("pin").unwrap();

    for (key, _) in scene.world.instances_of(template) {
        match scene.world.resolve_shape(key) {
            Some(ShapeTemplate::Cylinder {
                height,
                diameter_top,
                diameter_bottom,
                tessellation,
            }) => {
                assert_eq!(*height, 0.48);
                assert_eq!(*diameter_top, 0.09);
                assert_eq!(*diameter_bottom, 0.18);
                assert_eq!(*tessellation, 6);
            }
            other => panic!("pin resolved to {:?}", other),
        }
    }
}

#[test]
fn test_pins_lie_inside_lane_bounds() {
    let scene = LaneSceneBuilder::build_default(&AppConfig::default()).unwrap();
    let (lane, _) = scene.world.get_by_name("lane").unwrap();
    let lane_bounds = scene.world.world_bounds(lane).unwrap();

    for (key, pin) in scene.world.with_tag("pin") {
        let p = pin.transform.position;
        assert!(p.x.abs() < 1.07 / 2.0, "pin off the lane at {:?}", p);
        assert!(p.z < lane_bounds.max.z);
        let bounds = scene.world.world_bounds(key).unwrap();
        assert!((bounds.min.y - 0.2).abs() < 1e-5, "pin base not on the surface");
    }
}

#[test]
fn test_wider_lane_moves_gutters() {
    let mut config = AppConfig::default();
    config.lane.width = 1.5;
    let scene = LaneSceneBuilder::build_default(&config).unwrap();
    let (_, gutter) = scene.world.get_by_name("gutter-right").unwrap();
    assert_eq!(gutter.transform.position.x, 1.5);
}

#[test]
fn test_only_template_is_disabled() {
    let scene = LaneSceneBuilder::build_default(&AppConfig::default()).unwrap();
    let disabled: Vec<_> = scene
        .world
        .iter()
        .filter(|(_, e)| !e.flags.contains(EntityFlags::ENABLED))
        .map(|(_, e)| e.label().to_string())
        .collect();
    assert_eq!(disabled, vec!["pin".to_string()]);
}

#[test]
fn test_declared_length_mismatch_rejected() {
    let mut config = AppConfig::default();
    config.lane.declared_total_length = Some(30.0);
    assert!(LaneSceneBuilder::build_default(&config).is_err());
}
