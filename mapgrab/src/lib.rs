//! mapgrab: capture a pannable map that is larger than the screen
//!
//! The map is walked as a grid of fixed-size tiles in snake order. Between
//! captures the map is dragged by the configured shift, the cumulative
//! displacement is tracked, and every tile's placement is written into a
//! standalone shell script that stitches the mosaic with ImageMagick.
//!
//! The live surface is abstracted behind [`PanExecutor`], [`ZoomExecutor`]
//! and [`TileCapturer`]; [`DesktopSurface`] implements them for an X11
//! window driven through uinput.

pub mod capture;
pub mod config;
pub mod desktop;
pub mod engine;
pub mod error;
pub mod offset;
pub mod pan;
pub mod script;
pub mod traversal;
pub mod zoom;

pub use capture::{tile_file_name, CaptureStage, TileCapturer, TileRecord};
pub use config::{Config, GridConfig, SettingsReport};
pub use desktop::DesktopSurface;
pub use engine::{preview, run, MapSurface, PlannedStep, RunSummary};
pub use error::{Error, Result};
pub use offset::{Axis, OffsetTracker};
pub use pan::{split_pan, PanExecutor, Panner};
pub use script::{output_file_name, CanvasSpec, CompositeScript, EmitterState};
pub use traversal::{GridTraversal, Step};
pub use zoom::{ZoomController, ZoomDirection, ZoomExecutor};
