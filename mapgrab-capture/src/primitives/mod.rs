//! Low-level primitives for screen interaction.
//!
//! This module contains the geometry types and the external tool calls used
//! to find the map window and to capture tiles from it.

pub mod command;
pub mod screen;
pub mod screenshot;

pub use screen::{
    activate_window, find_window, get_screen_dimensions, list_windows, Region, ScreenDimensions,
    Window,
};
pub use screenshot::{build_import_args, capture_region_to_file};
