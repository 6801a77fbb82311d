//! Cross-calculator properties of the lane geometry

use bowling_geometry::{
    build_ball_shape, compute_lane_dimensions, compute_pin_layout, BallSpec, GeometryError,
    LaneSpec, PinSpec,
};

fn lanes() -> Vec<LaneSpec> {
    vec![
        LaneSpec::default(),
        LaneSpec {
            width: 2.0,
            height: 0.05,
            foul_line_to_head_pin: 10.0,
            foul_line_to_arrows: 2.0,
            ..LaneSpec::default()
        },
        LaneSpec {
            approach_board_to_second_approach_dots: 1.0,
            pin_area_buffer: 2.0,
            ..LaneSpec::default()
        },
    ]
}

#[test]
fn test_reference_scenario() {
    let lane = LaneSpec {
        width: 1.07,
        foul_line_to_head_pin: 18.28,
        first_approach_dots_to_foul_line: 3.66,
        second_approach_to_first_approach: 0.91,
        ..LaneSpec::default()
    };
    let layout = compute_pin_layout(&PinSpec::default(), &lane).unwrap();
    let head = layout.head_pin().position;
    assert!((head.z - 22.85).abs() < 1e-4);
    assert_eq!(head.x, 0.0);
    assert!((head.y - 0.44).abs() < 1e-6);
}

#[test]
fn test_pins_stand_on_lane_for_every_lane() {
    let pins = PinSpec::default();
    for lane in lanes() {
        let layout = compute_pin_layout(&pins, &lane).unwrap();
        let dims = compute_lane_dimensions(&lane).unwrap();
        for pin in layout.pins() {
            let bottom = pin.position.y - pins.height / 2.0;
            assert!((bottom - dims.height).abs() < 1e-6);
            assert!(pin.position.z < dims.total_length);
        }
    }
}

#[test]
fn test_head_pin_past_foul_line() {
    for lane in lanes() {
        let layout = compute_pin_layout(&PinSpec::default(), &lane).unwrap();
        let dims = compute_lane_dimensions(&lane).unwrap();
        assert!(layout.head_pin().position.z > dims.decals.foul_line);
    }
}

#[test]
fn test_total_length_matches_segments_for_every_lane() {
    for lane in lanes() {
        let dims = compute_lane_dimensions(&lane).unwrap();
        let sum = lane.approach_board_to_second_approach_dots
            + lane.first_approach_dots_to_foul_line
            + lane.second_approach_to_first_approach
            + lane.foul_line_to_head_pin
            + lane.pin_deck_length
            + lane.pin_area_buffer;
        assert!((dims.total_length - sum).abs() < 1e-4);
    }
}

#[test]
fn test_wider_spacing_scales_offsets() {
    let pins = PinSpec {
        distance_between_pins: 0.6,
        ..PinSpec::default()
    };
    let layout = compute_pin_layout(&pins, &LaneSpec::default()).unwrap();
    let xs: Vec<f32> = layout.row(4).map(|p| p.position.x).collect();
    assert!((xs[0] + 0.9).abs() < 1e-5);
    assert!((xs[3] - 0.9).abs() < 1e-5);
}

#[test]
fn test_errors_name_the_field() {
    let ball = BallSpec {
        radius: -1.0,
        ..BallSpec::default()
    };
    match build_ball_shape(&ball) {
        Err(GeometryError::InvalidSpecification { field, .. }) => assert_eq!(field, "ball.radius"),
        other => panic!("expected InvalidSpecification, got {:?}", other),
    }
}

#[test]
fn test_calculators_are_thread_safe() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let layout = compute_pin_layout(&PinSpec::default(), &LaneSpec::default()).unwrap();
                let dims = compute_lane_dimensions(&LaneSpec::default()).unwrap();
                let ball = build_ball_shape(&BallSpec::default()).unwrap();
                (layout, dims, ball)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for r in &results[1..] {
        assert_eq!(r.0, results[0].0);
        assert_eq!(r.1, results[0].1);
        assert_eq!(r.2, results[0].2);
    }
}
