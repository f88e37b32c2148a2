//! Event sequences driven through the public handler interface

use attiview_core::{
    ArrowKey, DeadlineTimer, OrientationState, PixelPos, PointerButton, SceneRenderer,
    SceneTextures, TimerDriver,
};
use attiview_visualization::{
    MenuCommand, SpecialKey, ViewerConfig, ViewerController, ViewerHandler,
};
use std::time::{Duration, Instant};

const ORIGIN: PixelPos = PixelPos { x: 0, y: 0 };

#[test]
fn deadline_timer_drives_frames_until_escape() {
    let config = ViewerConfig {
        frame_interval_ms: 5,
        ..ViewerConfig::default()
    };
    let mut controller = ViewerController::new(&config, DeadlineTimer::new());
    assert!(controller.timer().deadline().is_none());

    let _ = controller.on_char('s', ORIGIN);
    let deadline = controller.timer().deadline().unwrap();

    // not yet due
    assert!(!controller.timer_mut().fire_due(deadline - Duration::from_millis(1)));

    for expected in 1..=3 {
        let due = controller.timer().deadline().unwrap();
        assert!(controller.timer_mut().fire_due(due));
        assert!(controller.on_timer().redraw);
        assert_eq!(controller.state().animation.frame_number(), expected);
    }

    let _ = controller.on_char('\u{1b}', ORIGIN);
    let due = controller.timer().deadline().unwrap();
    assert!(controller.timer_mut().fire_due(due));
    assert!(!controller.on_timer().redraw);
    assert!(controller.timer().deadline().is_none());
}

#[test]
fn orientation_reaches_composed_scene() {
    let mut controller = ViewerController::new(&ViewerConfig::default(), DeadlineTimer::new());
    for _ in 0..90 {
        let _ = controller.on_special_key(SpecialKey::Arrow(ArrowKey::Left), ORIGIN);
    }
    assert_eq!(controller.state().orientation, OrientationState::new(90, 0));

    let draws = SceneRenderer::new()
        .compose(&controller.state().orientation, &SceneTextures::default())
        .resolve()
        .unwrap();
    let edge = draws[1]
        .model
        .transform_point(&attiview_core::Point3::new(1.0, 0.0, 0.0));
    assert!(edge.x.abs() < 1e-5 && (edge.y - 1.0).abs() < 1e-5);
}

#[test]
fn right_button_drag_then_quit() {
    let mut controller = ViewerController::new(&ViewerConfig::default(), NullTimer);

    let _ = controller.on_pointer_button(PointerButton::Right, true, PixelPos::new(3, 3));
    let _ = controller.on_pointer_button(PointerButton::Left, false, PixelPos::new(3, 3));
    assert!(controller.state().drag.is_dragging());

    let _ = controller.on_pointer_button(PointerButton::Right, false, PixelPos::new(9, 9));
    assert!(!controller.state().drag.is_dragging());

    let response = controller.on_menu(MenuCommand::Quit);
    assert!(response.quit && !response.redraw);
}

struct NullTimer;

impl TimerDriver for NullTimer {
    fn schedule(&mut self, _after: Duration) {}
}

#[test]
fn fresh_timer_is_never_due() {
    let mut timer = DeadlineTimer::new();
    assert!(!timer.fire_due(Instant::now()));
}
