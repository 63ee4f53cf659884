//! The live map surface: an X11 window driven by a virtual pointer.

use crate::capture::TileCapturer;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::offset::Axis;
use crate::pan::PanExecutor;
use crate::zoom::{ZoomDirection, ZoomExecutor};
use mapgrab_capture::Region;
use mapgrab_input::{Curve, DragOptions, MouseButton, ScreenSize, VirtualPointer};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Map window plus the pointer used to pan and zoom it
pub struct DesktopSurface {
    pointer: VirtualPointer,
    capture_region: Region,
    park: (i32, i32),
    drag: DragOptions,
    pan_settle: Duration,
    zoom_settle: Duration,
}

impl DesktopSurface {
    /// Locate and focus the map window and create the virtual pointer
    ///
    /// Fails with [`Error::EnvironmentNotFound`] before any gesture is sent
    /// when the window or the display cannot be found.
    pub fn connect(config: &Config) -> Result<Self> {
        let title = &config.window.title;
        let window = mapgrab_capture::find_window(title)
            .map_err(|e| Error::EnvironmentNotFound(format!("window search failed: {}", e)))?
            .ok_or_else(|| {
                Error::EnvironmentNotFound(format!("no visible window matches '{}'", title))
            })?;
        info!(id = %window.id, title = %window.title, region = ?window.region, "found map window");

        let dims = mapgrab_capture::get_screen_dimensions()
            .map_err(|e| Error::EnvironmentNotFound(format!("display size unknown: {}", e)))?;

        mapgrab_capture::activate_window(&window)?;

        let capture_region = capture_region(&window.region, config);
        let pointer = VirtualPointer::new(ScreenSize {
            width: dims.width,
            height: dims.height,
        })?;

        let timing = &config.timing;
        Ok(Self {
            pointer,
            capture_region,
            park: (config.window.park_x, config.window.park_y),
            drag: DragOptions {
                button: MouseButton::Left,
                waypoints: timing.drag_waypoints,
                curve: Curve::EaseInOut,
                step_delay: Duration::from_millis(timing.drag_step_ms),
                ..DragOptions::default()
            },
            pan_settle: timing.pan_settle(),
            zoom_settle: timing.zoom_settle(),
        })
    }

    pub fn capture_region(&self) -> Region {
        self.capture_region
    }
}

/// The fixed-size tile area inside the window
pub fn capture_region(window: &Region, config: &Config) -> Region {
    Region::new(
        window.x + config.window.capture_inset_x,
        window.y + config.window.capture_inset_y,
        config.grid.tile_width,
        config.grid.tile_height,
    )
}

/// Start and end of a drag of `distance` along `axis`
///
/// The drag is centred on the capture area, then shifted inward when an end
/// would fall off `screen`. The distance is never changed.
pub fn drag_endpoints(
    region: &Region,
    screen: ScreenSize,
    axis: Axis,
    distance: i32,
) -> ((i32, i32), (i32, i32)) {
    let (cx, cy) = region.center();
    match axis {
        Axis::X => {
            let (from, to) = fit_span(cx, distance, screen.width);
            ((from, cy), (to, cy))
        }
        Axis::Y => {
            let (from, to) = fit_span(cy, distance, screen.height);
            ((cx, from), (cx, to))
        }
    }
}

fn fit_span(centre: i32, distance: i32, extent: u32) -> (i32, i32) {
    let from = centre - distance / 2;
    let to = from + distance;
    let last = i32::try_from(extent).unwrap_or(i32::MAX) - 1;
    let (lo, hi) = (from.min(to), from.max(to));
    let shift = if hi > last {
        last - hi
    } else if lo < 0 {
        -lo
    } else {
        0
    };
    (from + shift, to + shift)
}

impl PanExecutor for DesktopSurface {
    fn drag(&mut self, axis: Axis, distance: i32) -> Result<()> {
        let (from, to) =
            drag_endpoints(&self.capture_region, self.pointer.screen(), axis, distance);
        self.pointer
            .drag(from, to.0 - from.0, to.1 - from.1, &self.drag)?;
        thread::sleep(self.pan_settle);
        Ok(())
    }
}

impl ZoomExecutor for DesktopSurface {
    fn zoom(&mut self, steps: u32, direction: ZoomDirection) -> Result<()> {
        let (cx, cy) = self.capture_region.center();
        self.pointer.move_to(cx, cy)?;
        let amount = i32::try_from(steps).unwrap_or(i32::MAX);
        let amount = match direction {
            ZoomDirection::In => amount,
            ZoomDirection::Out => -amount,
        };
        debug!(amount, "zoom wheel");
        self.pointer.scroll(amount)?;
        thread::sleep(self.zoom_settle);
        Ok(())
    }
}

impl TileCapturer for DesktopSurface {
    fn park_pointer(&mut self) -> Result<()> {
        self.pointer.move_to(self.park.0, self.park.1)?;
        Ok(())
    }

    fn capture_tile(&mut self, path: &Path) -> Result<()> {
        mapgrab_capture::capture_region_to_file(&self.capture_region, path)?;
        Ok(())
    }
}
