//! Integration tests for the control surface
//!
//! These tests drive the public surface the way a renderer would: load a
//! session, issue gestures, and observe the published playback state.

mod common;

use common::builders::SessionBuilder;
use common::{assert_float_eq, SESSION_START_MS};
use replay_controls::controls::{CompactionLevel, Control, ControlCommand, PlayButton};
use replay_controls::session::{BreadcrumbIndex, RawEvent};

#[test]
fn test_index_normalizes_event_order() {
    let raw = vec![
        RawEvent::new("user", 100),
        RawEvent::new("user", 50),
        RawEvent::new("user", 200),
    ];
    let index = BreadcrumbIndex::build(&raw);
    let order: Vec<i64> = index.events().iter().map(|e| e.timestamp_ms).collect();
    assert_eq!(order, vec![50, 100, 200]);
}

#[test]
fn test_next_breadcrumb_converts_between_relative_and_absolute() {
    let mut surface = SessionBuilder::new(5_000.0)
        .event("ui", 1_050)
        .event("ui", 1_210)
        .event("ui", 1_400)
        .surface();

    surface.dispatch(ControlCommand::Seek(120.0)).unwrap();
    surface.dispatch(ControlCommand::NextBreadcrumb).unwrap();

    assert_eq!(surface.state().current_time_ms, 210.0);
}

#[test]
fn test_rewind_near_end_clamps_to_start() {
    let mut surface = SessionBuilder::new(5_000.0).surface();
    surface.dispatch(ControlCommand::Seek(4_995.0)).unwrap();
    surface.dispatch(ControlCommand::Rewind).unwrap();

    assert_eq!(surface.state().current_time_ms, 0.0);
}

#[test]
fn test_resize_sequence_carries_no_state() {
    let mut surface = SessionBuilder::new(5_000.0).surface();
    let levels: Vec<_> = [500.0, 350.0, 500.0]
        .into_iter()
        .map(|w| surface.resize(w))
        .collect();

    assert_eq!(
        levels,
        vec![
            CompactionLevel::Full,
            CompactionLevel::Compact,
            CompactionLevel::Full
        ]
    );
    assert_eq!(surface.visible_controls().len(), 6);
}

#[test]
fn test_next_breadcrumb_with_nothing_ahead_keeps_cursor() {
    let mut surface = SessionBuilder::new(5_000.0)
        .event("ui", 1_050)
        .event("http", 3_000)
        .surface();

    surface.dispatch(ControlCommand::Seek(1_500.0)).unwrap();
    let updates = surface.subscribe();
    surface.dispatch(ControlCommand::NextBreadcrumb).unwrap();

    assert_eq!(surface.state().current_time_ms, 1_500.0);
    assert!(updates.try_recv().is_err());
}

#[test]
fn test_full_playback_then_restart() {
    let mut surface = SessionBuilder::new(1_000.0).surface();
    let updates = surface.subscribe();

    surface.dispatch(ControlCommand::TogglePlayPause).unwrap();
    for _ in 0..100 {
        surface.tick(16.0);
    }

    let state = surface.state();
    assert!(state.is_finished);
    assert!(!state.is_playing);
    assert_eq!(state.current_time_ms, 1_000.0);
    assert_eq!(surface.play_button(), PlayButton::Restart);

    let last = updates.try_iter().last().unwrap();
    assert_eq!(last, state);

    surface.dispatch(ControlCommand::TogglePlayPause).unwrap();
    let state = surface.state();
    assert_eq!(state.current_time_ms, 0.0);
    assert!(state.is_playing);
}

#[test]
fn test_speed_change_keeps_playing() {
    let mut surface = SessionBuilder::new(60_000.0).surface();
    surface.dispatch(ControlCommand::TogglePlayPause).unwrap();
    surface.dispatch(ControlCommand::SetSpeed(2.0)).unwrap();
    surface.tick(100.0);

    assert!(surface.state().is_playing);
    assert_float_eq(surface.state().current_time_ms, 200.0, 1e-9);
}

#[test]
fn test_skip_inactive_jumps_idle_gap() {
    let mut surface = SessionBuilder::new(60_000.0)
        .event("init", SESSION_START_MS)
        .event("ui", SESSION_START_MS + 30_000)
        .surface();

    surface.dispatch(ControlCommand::SetSkipInactive(true)).unwrap();
    surface.dispatch(ControlCommand::TogglePlayPause).unwrap();

    assert!(surface.tick(16.0));
    assert_float_eq(surface.state().current_time_ms, 29_016.0, 1e-9);

    // Next activity is now within the threshold.
    assert!(!surface.tick(16.0));
}

#[test]
fn test_fullscreen_toggle() {
    let mut surface = SessionBuilder::new(1_000.0).surface();
    assert!(!surface.is_fullscreen());

    surface.dispatch(ControlCommand::ToggleFullscreen).unwrap();
    assert!(surface.is_fullscreen());

    surface.dispatch(ControlCommand::ToggleFullscreen).unwrap();
    assert!(!surface.is_fullscreen());
}

#[test]
fn test_compact_layout_hides_seek_controls() {
    let mut surface = SessionBuilder::new(1_000.0).surface();
    surface.mount(320.0);

    let visible = surface.visible_controls();
    assert_eq!(
        visible,
        vec![
            Control::PlayPause,
            Control::Speed,
            Control::SkipInactive,
            Control::Fullscreen
        ]
    );
}
