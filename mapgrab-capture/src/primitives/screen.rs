//! Screen and window management primitives.
//!
//! This module provides the [`Region`] and [`Window`] types, as well as functions
//! to list, find and activate windows and to get the display size, targeting
//! X11 desktops through `xdotool`.

use super::command;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const XDOTOOL: &str = "xdotool";

/// Screen dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenDimensions {
    pub width: u32,
    pub height: u32,
}

/// A rectangular region on the screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the region
    pub fn center(&self) -> (i32, i32) {
        (
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// ImageMagick/X11 geometry string, e.g. `1030x620+12+80`
    pub fn geometry(&self) -> String {
        format!("{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

/// A window on the screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: String,
    pub title: String,
    pub region: Region,
}

/// Query the display size via `xdotool getdisplaygeometry`
pub fn get_screen_dimensions() -> Result<ScreenDimensions> {
    let out = command::run(XDOTOOL, &["getdisplaygeometry"])?;
    parse_display_geometry(&out)
}

/// Parse `xdotool getdisplaygeometry` output (`"1920 1080"`)
pub fn parse_display_geometry(output: &str) -> Result<ScreenDimensions> {
    let parse_err = || Error::ParseFailed {
        what: "display geometry",
        input: output.trim().to_string(),
    };
    let mut parts = output.split_whitespace();
    let width = parts
        .next()
        .and_then(|w| w.parse().ok())
        .ok_or_else(parse_err)?;
    let height = parts
        .next()
        .and_then(|h| h.parse().ok())
        .ok_or_else(parse_err)?;
    Ok(ScreenDimensions { width, height })
}

/// Parse `xdotool getwindowgeometry --shell` output into a region
pub fn parse_window_geometry(output: &str) -> Result<Region> {
    let mut x = None;
    let mut y = None;
    let mut width = None;
    let mut height = None;

    for line in output.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        match key {
            "X" => x = value.parse::<i32>().ok(),
            "Y" => y = value.parse::<i32>().ok(),
            "WIDTH" => width = value.parse::<u32>().ok(),
            "HEIGHT" => height = value.parse::<u32>().ok(),
            _ => {}
        }
    }

    match (x, y, width, height) {
        (Some(x), Some(y), Some(width), Some(height)) => Ok(Region::new(x, y, width, height)),
        _ => Err(Error::ParseFailed {
            what: "window geometry",
            input: output.trim().to_string(),
        }),
    }
}

/// List visible windows whose title matches `pattern`
///
/// `pattern` is handed to `xdotool search --name`, which treats it as a
/// case-insensitive regular expression.
pub fn list_windows(pattern: &str) -> Result<Vec<Window>> {
    let ids = match command::run(XDOTOOL, &["search", "--onlyvisible", "--name", pattern]) {
        Ok(out) => out,
        // xdotool exits 1 without output when nothing matches
        Err(Error::CommandFailed { stderr, .. }) if stderr.is_empty() => String::new(),
        Err(e) => return Err(e),
    };

    let mut windows = Vec::new();
    for id in ids.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let title = command::run(XDOTOOL, &["getwindowname", id])?
            .trim()
            .to_string();
        let geometry = command::run(XDOTOOL, &["getwindowgeometry", "--shell", id])?;
        let region = parse_window_geometry(&geometry)?;
        debug!(id, %title, ?region, "window candidate");
        windows.push(Window {
            id: id.to_string(),
            title,
            region,
        });
    }
    Ok(windows)
}

/// Find the first visible window whose title matches `name`
pub fn find_window(name: &str) -> Result<Option<Window>> {
    Ok(list_windows(name)?.into_iter().next())
}

/// Raise and focus a window, waiting until the window manager reports it active
pub fn activate_window(window: &Window) -> Result<()> {
    info!(id = %window.id, title = %window.title, "activating window");
    command::run(XDOTOOL, &["windowactivate", "--sync", window.id.as_str()])?;
    Ok(())
}
