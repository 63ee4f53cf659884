//! Integration tests for mapgrab-input
//!
//! These tests require access to /dev/uinput and are marked #[ignore].
//! Run with: sudo cargo test -- --ignored

use mapgrab_input::{DragOptions, Error, MouseButton, ScreenSize, VirtualPointer};
use std::time::Duration;

const SCREEN: ScreenSize = ScreenSize {
    width: 1920,
    height: 1080,
};

#[test]
#[ignore = "requires /dev/uinput access (run with sudo)"]
fn create_device() {
    let pointer = VirtualPointer::new(SCREEN);
    assert!(pointer.is_ok(), "should create device: {:?}", pointer.err());
}

#[test]
#[ignore = "requires /dev/uinput access (run with sudo)"]
fn move_to_tracks_position() {
    let mut pointer = VirtualPointer::new(SCREEN).expect("failed to create device");
    pointer.move_to(640, 360).expect("should move pointer");
    assert_eq!(pointer.position(), (640, 360));
}

#[test]
#[ignore = "requires /dev/uinput access (run with sudo)"]
fn move_outside_screen_is_rejected() {
    let mut pointer = VirtualPointer::new(SCREEN).expect("failed to create device");
    let result = pointer.move_to(1920, 10);
    assert!(matches!(result, Err(Error::OutOfBounds { x: 1920, .. })));
    assert_eq!(pointer.position(), (0, 0), "position should be unchanged");
}

#[test]
#[ignore = "requires /dev/uinput access (run with sudo)"]
fn drag_releases_button_and_ends_at_target() {
    let mut pointer = VirtualPointer::new(SCREEN).expect("failed to create device");
    let options = DragOptions {
        waypoints: 5,
        step_delay: Duration::from_millis(1),
        hold_delay: Duration::from_millis(1),
        ..DragOptions::default()
    };
    pointer
        .drag((900, 500), -300, 120, &options)
        .expect("should drag");
    assert_eq!(pointer.position(), (600, 620));
    assert!(!pointer.is_button_held(MouseButton::Left));
}

#[test]
#[ignore = "requires /dev/uinput access (run with sudo)"]
fn button_hold_state() {
    let mut pointer = VirtualPointer::new(SCREEN).expect("failed to create device");
    pointer
        .mouse_down(MouseButton::Left)
        .expect("should press button down");
    assert!(pointer.is_button_held(MouseButton::Left));

    pointer.release_all().expect("should release all");
    assert!(!pointer.is_button_held(MouseButton::Left));
}

#[test]
#[ignore = "requires /dev/uinput access (run with sudo)"]
fn scroll() {
    let mut pointer = VirtualPointer::new(SCREEN).expect("failed to create device");
    let result = pointer.scroll(-3);
    assert!(result.is_ok(), "should scroll: {:?}", result.err());
}
