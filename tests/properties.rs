// tests/properties.rs - integration-level invariants from the engine spec.
use rand::rngs::StdRng;
use rand::SeedableRng;

use krusty_cursor::config::CursorConfig;
use krusty_cursor::duration::{self, SessionContext};
use krusty_cursor::geometry::Point;
use krusty_cursor::params;
use krusty_cursor::recording::{Recording, RecordedEvent};
use krusty_cursor::sink::NullSink;
use krusty_cursor::trajectory;
use krusty_cursor::{Cursor, DurationSpec, ElementRect, InputSink, Target};

#[test]
fn trajectories_always_start_and_end_at_the_requested_points() {
    let origins_and_destinations = [
        (Point::new(0.0, 0.0), Point::new(500.0, 500.0)),
        (Point::new(1000.0, 1000.0), Point::new(1000.0, 1000.0)),
        (Point::new(50.0, 900.0), Point::new(1800.0, 20.0)),
    ];

    for seed in 0..10u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = CursorConfig::default();
        for (origin, destination) in origins_and_destinations {
            let curve_params = params::select(&mut rng, &config, origin, destination, (1920.0, 1080.0)).unwrap();
            let built = trajectory::build(&mut rng, &curve_params, origin, destination, 12.0).unwrap();
            assert_eq!(built.points().first().copied(), Some(origin));
            assert_eq!(built.points().last().copied(), Some(destination));
        }
    }
}

#[test]
fn duration_grows_with_index_of_difficulty() {
    let config = CursorConfig::default();
    let mut rng = StdRng::seed_from_u64(99);
    let mut session = SessionContext::new(config.recent_target_size_window);

    let short = duration::compute(&mut rng, &config, &mut session, Point::new(0.0, 0.0), Point::new(20.0, 0.0), 40.0);
    let mut session_b = SessionContext::new(config.recent_target_size_window);
    let long = duration::compute(
        &mut rng,
        &config,
        &mut session_b,
        Point::new(0.0, 0.0),
        Point::new(1800.0, 0.0),
        6.0,
    );
    assert!(long >= short, "expected a harder (farther, smaller-target) move to take at least as long: {long} < {short}");
}

#[test]
fn end_to_end_move_click_drag_over_null_sink() {
    let config = CursorConfig::default();
    let sink = NullSink::new(Point::new(100.0, 100.0), (1920.0, 1080.0));
    let mut cursor = Cursor::with_rng(sink, config, StdRng::seed_from_u64(7)).unwrap();

    cursor
        .move_to(Target::Absolute(Point::new(800.0, 600.0)), DurationSpec::Fixed(0.01), 12.0)
        .unwrap();
    assert_eq!(cursor.sink().position().unwrap(), Point::new(800.0, 600.0));

    cursor
        .click(Target::Absolute(Point::new(900.0, 650.0)), 2, 0.0, None)
        .unwrap();
    assert_eq!(cursor.sink().position().unwrap(), Point::new(900.0, 650.0));

    cursor
        .drag_and_drop(
            Target::Absolute(Point::new(300.0, 300.0)),
            Target::Absolute(Point::new(1500.0, 900.0)),
            DurationSpec::Fixed(0.02),
            true,
        )
        .unwrap();
    assert_eq!(cursor.sink().position().unwrap(), Point::new(1500.0, 900.0));
}

#[test]
fn element_target_hanging_off_the_viewport_retries_at_its_center() {
    let config = CursorConfig::default();
    let sink = NullSink::new(Point::new(100.0, 100.0), (800.0, 600.0));
    let mut cursor = Cursor::with_rng(sink, config, StdRng::seed_from_u64(3)).unwrap();

    // Entirely past the right edge, so every beta-sampled x in the rect
    // (whatever the draw) is out of bounds, not just a tail case.
    let rect = ElementRect {
        x: 900.0,
        y: 100.0,
        width: 300.0,
        height: 60.0,
    };
    cursor
        .move_to(Target::Element(rect, None), DurationSpec::Fixed(0.01), 12.0)
        .unwrap();

    assert_eq!(cursor.sink().position().unwrap(), rect.center());
}

#[test]
fn out_of_bounds_absolute_target_is_rejected() {
    let config = CursorConfig::default();
    let sink = NullSink::new(Point::new(100.0, 100.0), (800.0, 600.0));
    let mut cursor = Cursor::with_rng(sink, config, StdRng::seed_from_u64(4)).unwrap();

    let err = cursor
        .move_to(Target::Absolute(Point::new(5000.0, 100.0)), DurationSpec::Fixed(0.01), 12.0)
        .unwrap_err();
    assert!(matches!(err, krusty_cursor::CursorError::OutOfBounds { .. }));
}

#[test]
fn recording_round_trips_through_both_encodings() {
    let mut recording = Recording::new();
    recording.push(RecordedEvent::r#move(Point::new(12.0, 34.0)));
    recording.push(RecordedEvent::click(Point::new(56.0, 78.0), 1));
    recording.push(RecordedEvent::drag(Point::new(0.0, 0.0), Point::new(999.0, 999.0)));

    let bytes = recording.to_bincode().unwrap();
    assert_eq!(Recording::from_bincode(&bytes).unwrap(), recording);

    let json = recording.to_json().unwrap();
    assert_eq!(Recording::from_json(&json).unwrap(), recording);
}

#[test]
fn steady_mode_produces_the_fixed_preset_regardless_of_seed() {
    let config = CursorConfig {
        steady: true,
        ..CursorConfig::default()
    };
    for seed in 0..5u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let curve_params = params::select(
            &mut rng,
            &config,
            Point::new(0.0, 0.0),
            Point::new(1000.0, 1000.0),
            (1920.0, 1080.0),
        )
        .unwrap();
        assert_eq!(curve_params.offset_boundary_x, config.steady_offset_boundary);
        assert_eq!(curve_params.distortion_mean, config.steady_distortion_mean);
    }
}
