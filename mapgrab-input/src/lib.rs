//! mapgrab-input: a uinput virtual pointer for driving a pannable map surface
//!
//! The device reports absolute coordinates, so every position handed to
//! [`VirtualPointer`] lands on exactly that screen pixel regardless of the
//! desktop's pointer acceleration settings.

mod device;
pub mod error;
mod interpolation;
pub mod mouse;

use evdev::uinput::VirtualDevice;
use evdev::{AbsoluteAxisType, EventType, InputEvent, RelativeAxisType};
use std::collections::HashSet;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace};

pub use error::{Error, Result};
pub use interpolation::{generate_waypoints, Curve};
pub use mouse::MouseButton;

/// Size of the screen the absolute axes are mapped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

/// How a drag gesture is performed
#[derive(Debug, Clone, Copy)]
pub struct DragOptions {
    pub button: MouseButton,
    /// Number of intermediate positions between press and release
    pub waypoints: usize,
    pub curve: Curve,
    /// Pause between consecutive waypoints
    pub step_delay: Duration,
    /// Pause after pressing and before releasing the button
    pub hold_delay: Duration,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            button: MouseButton::Left,
            waypoints: 20,
            curve: Curve::EaseInOut,
            step_delay: Duration::from_millis(10),
            hold_delay: Duration::from_millis(50),
        }
    }
}

/// Virtual absolute pointer for mouse automation
pub struct VirtualPointer {
    device: VirtualDevice,
    screen: ScreenSize,
    position: (i32, i32),
    held_buttons: HashSet<MouseButton>,
}

impl VirtualPointer {
    /// Create a new virtual pointer covering `screen`
    ///
    /// Note: This takes ~1 second as the kernel needs time to recognize the device.
    /// Requires access to /dev/uinput (typically root or input group membership).
    pub fn new(screen: ScreenSize) -> Result<Self> {
        let device = device::create_device(screen)?;
        debug!(width = screen.width, height = screen.height, "virtual pointer created");
        Ok(Self {
            device,
            screen,
            position: (0, 0),
            held_buttons: HashSet::new(),
        })
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Last position the pointer was moved to
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    /// Move the pointer to an absolute screen position
    pub fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        if !self.screen.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.screen.width,
                height: self.screen.height,
            });
        }
        let events = [
            InputEvent::new_now(EventType::ABSOLUTE, AbsoluteAxisType::ABS_X.0, x),
            InputEvent::new_now(EventType::ABSOLUTE, AbsoluteAxisType::ABS_Y.0, y),
            InputEvent::new_now(EventType::SYNCHRONIZATION, 0, 0), // SYN_REPORT
        ];
        self.emit(&events)?;
        self.position = (x, y);
        Ok(())
    }

    /// Press a mouse button down
    pub fn mouse_down(&mut self, button: MouseButton) -> Result<()> {
        self.held_buttons.insert(button);
        self.emit_button(button, 1)
    }

    /// Release a mouse button
    pub fn mouse_up(&mut self, button: MouseButton) -> Result<()> {
        self.held_buttons.remove(&button);
        self.emit_button(button, 0)
    }

    /// Check if a mouse button is currently held down
    pub fn is_button_held(&self, button: MouseButton) -> bool {
        self.held_buttons.contains(&button)
    }

    /// Release every held mouse button
    pub fn release_all(&mut self) -> Result<()> {
        let buttons: Vec<MouseButton> = self.held_buttons.iter().copied().collect();
        for button in buttons {
            self.mouse_up(button)?;
        }
        Ok(())
    }

    /// Press at `from`, travel to `from + (dx, dy)` and release
    ///
    /// Blocks until the button has been released. Both endpoints must lie on
    /// the screen.
    pub fn drag(&mut self, from: (i32, i32), dx: i32, dy: i32, options: &DragOptions) -> Result<()> {
        let to = (from.0 + dx, from.1 + dy);
        if !self.screen.contains(to.0, to.1) {
            return Err(Error::OutOfBounds {
                x: to.0,
                y: to.1,
                width: self.screen.width,
                height: self.screen.height,
            });
        }
        debug!(?from, dx, dy, "drag");

        self.move_to(from.0, from.1)?;
        self.mouse_down(options.button)?;
        thread::sleep(options.hold_delay);

        for (wx, wy) in generate_waypoints(dx, dy, options.waypoints, options.curve) {
            trace!(x = from.0 + wx, y = from.1 + wy, "drag waypoint");
            self.move_to(from.0 + wx, from.1 + wy)?;
            thread::sleep(options.step_delay);
        }

        thread::sleep(options.hold_delay);
        self.mouse_up(options.button)
    }

    /// Scroll the mouse wheel
    ///
    /// Positive values scroll up, negative scroll down. The whole amount is
    /// sent as a single event.
    pub fn scroll(&mut self, amount: i32) -> Result<()> {
        let events = [
            InputEvent::new_now(EventType::RELATIVE, RelativeAxisType::REL_WHEEL.0, amount),
            InputEvent::new_now(EventType::SYNCHRONIZATION, 0, 0), // SYN_REPORT
        ];
        self.emit(&events)
    }

    fn emit_button(&mut self, button: MouseButton, value: i32) -> Result<()> {
        let events = [
            InputEvent::new_now(EventType::KEY, button.to_key().code(), value),
            InputEvent::new_now(EventType::SYNCHRONIZATION, 0, 0), // SYN_REPORT
        ];
        self.emit(&events)
    }

    fn emit(&mut self, events: &[InputEvent]) -> Result<()> {
        self.device.emit(events).map_err(Error::EmitFailed)
    }
}

impl Drop for VirtualPointer {
    fn drop(&mut self) {
        // Best-effort cleanup - Drop can't return Result
        let _ = self.release_all();
    }
}
