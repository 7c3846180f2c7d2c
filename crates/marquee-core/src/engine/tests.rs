use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::config::{AutoplayDirection, TiltDirection};

const FRAME: Duration = Duration::from_micros(16_667);

fn lane(count: usize, extent: f32) -> Lane<str> {
    let items = (0..count)
        .map(|i| Item::new(ItemId(i as u64), Arc::from(format!("item {i}").as_str()), extent))
        .collect();
    Lane::new(items, 0.0)
}

fn autoplay(speed: f32, direction: AutoplayDirection) -> EngineConfig {
    EngineConfig {
        autoplay: true,
        autoplay_speed: speed,
        autoplay_direction: direction,
        ..Default::default()
    }
}

fn at(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn vertical(y: f32) -> Point {
    Point::new(0.0, y)
}

/// Wrapped offset difference mapped into (-cycle/2, cycle/2]
fn signed_delta(before: f32, after: f32, cycle: f32) -> f32 {
    let mut delta = after - before;
    if delta > cycle / 2.0 {
        delta -= cycle;
    } else if delta <= -cycle / 2.0 {
        delta += cycle;
    }
    delta
}

#[derive(Clone, Default)]
struct Recorder {
    offsets: Rc<RefCell<Vec<f32>>>,
    tilts: Rc<RefCell<Vec<Option<TiltTransform>>>>,
}

impl Renderer<str> for Recorder {
    fn render(&mut self, frame: &LaneFrame<'_, str>) {
        self.offsets.borrow_mut().push(frame.offset);
        self.tilts.borrow_mut().push(frame.tilt);
    }
}

#[test]
fn test_wrap_continuity_over_many_cycles() {
    let mut engine = ScrollEngine::new(lane(2, 5.0), autoplay(0.7, AutoplayDirection::Down));
    let cycle = engine.lane().cycle_length();
    let step = 0.7 * momentum::frames(FRAME);

    for _ in 0..2_000 {
        let before = engine.offset();
        engine.step(FRAME);
        let after = engine.offset();
        assert!((0.0..cycle).contains(&after), "offset {after} escaped");
        let delta = signed_delta(before, after, cycle);
        assert!((delta - step).abs() < 1e-3, "jump of {delta} at {before}");
    }
}

#[test]
fn test_backward_wrap_stays_in_range() {
    let mut engine = ScrollEngine::new(lane(3, 4.0), autoplay(1.3, AutoplayDirection::Up));
    let cycle = engine.lane().cycle_length();
    for _ in 0..500 {
        engine.step(FRAME);
        assert!((0.0..cycle).contains(&engine.offset()));
    }
}

#[test]
fn test_empty_lane_is_inert() {
    let recorder = Recorder::default();
    let mut engine = ScrollEngine::new(Lane::<str>::empty(), autoplay(1.0, AutoplayDirection::Down))
        .with_renderer(recorder.clone());

    for _ in 0..100 {
        assert!(!engine.step(FRAME));
    }
    assert!(!engine.pointer_down(vertical(1.0), at(0)));
    assert!(!engine.pointer_enter());
    assert!(!engine.wheel(3.0));

    assert_eq!(engine.offset(), 0.0);
    assert_eq!(engine.state().velocity(), 0.0);
    assert_eq!(engine.state().mutations(), 0);
    assert!(engine.frame().placements(100.0).is_empty());
    assert!(recorder.offsets.borrow().is_empty());
}

#[test]
fn test_pause_on_hover_freezes_autoplay() {
    let config = EngineConfig {
        pause_on_hover: true,
        ..autoplay(1.0, AutoplayDirection::Down)
    };
    let mut engine = ScrollEngine::new(lane(4, 10.0), config);
    engine.step(FRAME);
    assert!(engine.pointer_enter());
    assert!(engine.is_paused());

    let frozen = engine.offset();
    for _ in 0..50 {
        assert!(!engine.step(FRAME));
    }
    assert_eq!(engine.offset(), frozen);

    engine.pointer_leave(vertical(-1.0), at(1_000));
    engine.step(FRAME);
    assert!(engine.offset() > frozen);
}

#[test]
fn test_hover_without_pause_keeps_autoplay() {
    let mut engine = ScrollEngine::new(lane(4, 10.0), autoplay(1.0, AutoplayDirection::Down));
    engine.pointer_enter();
    assert!(!engine.is_paused());
    assert!(engine.step(FRAME));
}

#[test]
fn test_momentum_applies_while_hover_paused() {
    let config = EngineConfig {
        pause_on_hover: true,
        ..autoplay(1.0, AutoplayDirection::Down)
    };
    let mut engine = ScrollEngine::new(lane(10, 10.0), config);
    engine.pointer_enter();
    engine.pointer_down(vertical(0.0), at(0));
    engine.pointer_move(vertical(6.0), at(50));
    engine.pointer_up(vertical(6.0), at(50));
    assert_eq!(engine.phase(), Phase::Momentum);

    let v = engine.state().velocity();
    let before = engine.offset();
    engine.step(FRAME);
    let moved = engine.offset() - before;
    assert!((moved - v * momentum::frames(FRAME)).abs() < 1e-3);
}

#[test]
fn test_momentum_decays_geometrically_then_stops() {
    let config = EngineConfig {
        damping: 0.9,
        stop_threshold: 0.05,
        ..Default::default()
    };
    let mut engine = ScrollEngine::new(lane(10, 10.0), config);

    engine.pointer_down(vertical(0.0), at(0));
    engine.pointer_move(vertical(10.0), at(50));
    engine.pointer_up(vertical(10.0), at(50));

    let v0 = engine.state().velocity();
    assert!((v0 - 10.0 / 3.0).abs() < 1e-3);
    assert_eq!(engine.phase(), Phase::Momentum);

    let mut n = 0;
    let mut last_moving = v0;
    while engine.phase() == Phase::Momentum {
        engine.step(FRAME);
        n += 1;
        let v = engine.state().velocity();
        if v != 0.0 {
            let expected = v0 * 0.9_f32.powi(n);
            assert!((v - expected).abs() < 1e-4, "frame {n}: {v} vs {expected}");
            last_moving = v;
        }
        assert!(n < 1_000, "momentum never settled");
    }

    // Stops exactly at zero once the next damped value drops under threshold
    assert_eq!(engine.state().velocity(), 0.0);
    assert!(last_moving >= 0.05);
    assert!((last_moving * 0.9).abs() < 0.05);

    // Settled means settled: no further motion without autoplay
    let rest = engine.offset();
    assert!(!engine.step(FRAME));
    assert_eq!(engine.offset(), rest);
}

#[test]
fn test_direction_sign() {
    for (direction, sign) in [(AutoplayDirection::Down, 1.0), (AutoplayDirection::Up, -1.0)] {
        let mut engine = ScrollEngine::new(lane(3, 10.0), autoplay(0.5, direction));
        let cycle = engine.lane().cycle_length();
        for _ in 0..200 {
            let before = engine.offset();
            engine.step(FRAME);
            let delta = signed_delta(before, engine.offset(), cycle);
            assert!(delta * sign > 0.0, "{direction:?} moved by {delta}");
        }
    }
}

#[test]
fn test_drag_suppresses_autoplay() {
    let mut engine = ScrollEngine::new(lane(3, 10.0), autoplay(2.0, AutoplayDirection::Down));
    engine.pointer_down(vertical(5.0), at(0));
    let held = engine.offset();
    assert!(!engine.step(FRAME));
    assert_eq!(engine.offset(), held);
}

#[test]
fn test_drag_moves_and_wraps() {
    let mut engine = ScrollEngine::new(lane(2, 5.0), EngineConfig::default());
    engine.pointer_down(vertical(0.0), at(0));
    engine.pointer_move(vertical(-3.0), at(10));
    assert!((engine.offset() - 7.0).abs() < 1e-5);
    engine.pointer_move(vertical(24.0), at(20));
    assert!((engine.offset() - 4.0).abs() < 1e-4);
}

#[test]
fn test_down_cancels_momentum() {
    let mut engine = ScrollEngine::new(lane(5, 10.0), EngineConfig::default());
    engine.pointer_down(vertical(0.0), at(0));
    engine.pointer_move(vertical(20.0), at(16));
    engine.pointer_up(vertical(20.0), at(16));
    assert_eq!(engine.phase(), Phase::Momentum);

    engine.pointer_down(vertical(3.0), at(100));
    assert_eq!(engine.phase(), Phase::Dragging);
    assert_eq!(engine.state().velocity(), 0.0);
}

#[test]
fn test_release_with_zero_elapsed_time_is_still() {
    let mut engine = ScrollEngine::new(lane(5, 10.0), EngineConfig::default());
    engine.pointer_down(vertical(0.0), at(40));
    engine.pointer_move(vertical(8.0), at(40));
    engine.pointer_up(vertical(8.0), at(40));
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.state().velocity(), 0.0);
}

#[test]
fn test_release_after_long_hold_is_still() {
    let mut engine = ScrollEngine::new(lane(5, 10.0), EngineConfig::default());
    engine.pointer_down(vertical(0.0), at(0));
    engine.pointer_move(vertical(30.0), at(50));
    engine.pointer_up(vertical(30.0), at(5050));
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.state().velocity(), 0.0);

    let before = engine.offset();
    for _ in 0..30 {
        engine.step(FRAME);
    }
    assert_eq!(engine.offset(), before);
}

#[test]
fn test_release_position_counts_as_final_move() {
    let mut engine = ScrollEngine::new(lane(5, 10.0), EngineConfig::default());
    engine.pointer_down(vertical(0.0), at(0));
    engine.pointer_up(vertical(5.0), at(50));
    assert!((engine.offset() - 5.0).abs() < 1e-5);
    assert_eq!(engine.phase(), Phase::Momentum);
}

#[test]
fn test_leave_releases_drag_and_hover() {
    let mut engine = ScrollEngine::new(lane(5, 10.0), EngineConfig::default());
    engine.pointer_enter();
    engine.pointer_down(vertical(0.0), at(0));
    engine.pointer_move(vertical(4.0), at(16));
    assert!(engine.pointer_leave(vertical(8.0), at(32)));
    assert!(!engine.state().is_hovered());
    assert_eq!(engine.phase(), Phase::Momentum);
    assert!(engine.state().last_sample().is_none());
}

#[test]
fn test_momentum_and_autoplay_are_summed_and_capped() {
    let config = EngineConfig {
        max_velocity: 5.0,
        ..autoplay(1.0, AutoplayDirection::Down)
    };
    let mut engine = ScrollEngine::new(lane(100, 10.0), config);
    engine.pointer_down(vertical(0.0), at(0));
    engine.pointer_move(vertical(100.0), at(16));
    engine.pointer_up(vertical(100.0), at(16));
    assert_eq!(engine.state().velocity(), 5.0);

    let before = engine.offset();
    engine.step(FRAME);
    let moved = engine.offset() - before;
    assert!((moved - 5.0 * momentum::frames(FRAME)).abs() < 1e-3);
}

#[test]
fn test_horizontal_axis_uses_x() {
    let config = EngineConfig {
        axis: Axis::Horizontal,
        ..Default::default()
    };
    let mut engine = ScrollEngine::new(lane(5, 10.0), config);
    engine.pointer_down(Point::new(0.0, 0.0), at(0));
    engine.pointer_move(Point::new(4.0, 30.0), at(16));
    assert!((engine.offset() - 4.0).abs() < 1e-5);
}

#[test]
fn test_non_finite_pointer_ignored() {
    let mut engine = ScrollEngine::new(lane(5, 10.0), EngineConfig::default());
    assert!(!engine.pointer_down(vertical(f32::NAN), at(0)));
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn test_wheel_nudges_offset() {
    let config = EngineConfig {
        wheel_multiplier: 3.0,
        ..Default::default()
    };
    let mut engine = ScrollEngine::new(lane(5, 10.0), config);
    assert!(engine.wheel(1.0));
    assert_eq!(engine.offset(), 3.0);
    assert!(engine.wheel(-2.0));
    assert_eq!(engine.offset(), 47.0);
    assert_eq!(engine.phase(), Phase::Idle);
}

#[test]
fn test_renderer_sees_every_mutation() {
    let recorder = Recorder::default();
    let mut engine = ScrollEngine::new(lane(3, 10.0), autoplay(1.0, AutoplayDirection::Down))
        .with_renderer(recorder.clone());

    engine.step(FRAME);
    engine.step(FRAME);
    engine.pointer_enter();

    assert_eq!(recorder.offsets.borrow().len(), 3);
    assert_eq!(
        *recorder.offsets.borrow().last().unwrap(),
        engine.offset()
    );
    assert_eq!(
        recorder.tilts.borrow()[0],
        Some(TiltTransform::for_direction(TiltDirection::Left))
    );
}

#[test]
fn test_tilt_disabled_has_no_transform() {
    let config = EngineConfig {
        tilt_enabled: false,
        ..Default::default()
    };
    let engine = ScrollEngine::new(lane(1, 1.0), config);
    assert!(engine.frame().tilt.is_none());
}

#[test]
fn test_visible_placements_cover_viewport() {
    let mut engine = ScrollEngine::new(lane(3, 4.0), EngineConfig::default());
    engine.wheel(2.5);
    let frame = engine.frame();
    let visible = frame.visible(10.0);
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|p| p.end() > 0.0 && p.start < 10.0));
    assert!(visible.first().unwrap().start <= 0.0);
    assert!(visible.last().unwrap().end() >= 10.0);
}

#[test]
fn test_reconfigure_resets_state() {
    let mut engine = ScrollEngine::new(lane(3, 10.0), autoplay(1.0, AutoplayDirection::Down));
    engine.step(FRAME);
    engine.pointer_enter();
    let mutations = engine.state().mutations();

    engine.reconfigure(autoplay(-4.0, AutoplayDirection::Up));
    assert_eq!(engine.offset(), 0.0);
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.state().is_hovered());
    assert_eq!(engine.config().autoplay_speed, 0.0);
    assert_eq!(engine.state().mutations(), mutations + 1);
}

#[test]
fn test_set_items_rewraps_offset() {
    let mut engine = ScrollEngine::new(lane(4, 10.0), EngineConfig::default());
    engine.wheel(17.5);
    assert_eq!(engine.offset(), 35.0);

    engine.set_items(lane(2, 10.0));
    assert_eq!(engine.lane().cycle_length(), 20.0);
    assert_eq!(engine.offset(), 15.0);

    engine.set_items(Lane::empty());
    assert_eq!(engine.offset(), 0.0);
    assert!(!engine.step(FRAME));
}

#[test]
fn test_unmount_freezes_state() {
    let recorder = Recorder::default();
    let mut engine = ScrollEngine::new(lane(3, 10.0), autoplay(1.0, AutoplayDirection::Down))
        .with_renderer(recorder.clone());
    engine.step(FRAME);
    engine.unmount();
    let frozen = engine.state().clone();

    assert!(!engine.step(FRAME));
    assert!(!engine.pointer_down(vertical(0.0), at(0)));
    assert!(!engine.pointer_enter());
    assert!(!engine.wheel(1.0));
    engine.reconfigure(EngineConfig::default());

    assert!(engine.is_detached());
    assert_eq!(engine.state(), &frozen);
    assert_eq!(recorder.offsets.borrow().len(), 1);
}
