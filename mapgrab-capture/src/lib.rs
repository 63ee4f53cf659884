//! mapgrab-capture: desktop geometry and screen capture primitives for X11
//!
//! This crate provides the side-effecting edges of a map capture run:
//! - Window lookup, activation and geometry via `xdotool`
//! - Display size queries
//! - Fixed-size region screenshots via ImageMagick `import`

pub mod error;
pub mod primitives;

// Re-export common types at crate root
pub use error::{Error, Result};
pub use primitives::{
    activate_window, build_import_args, capture_region_to_file, find_window,
    get_screen_dimensions, list_windows, Region, ScreenDimensions, Window,
};
