use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Main configuration for mapgrab
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub zoom: ZoomSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Grid geometry of one capture run
///
/// Shifts are signed pan distances per grid step: a positive `x_shift`
/// drags the map to the right, which reveals content to the left. The
/// defaults walk right and down across the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub columns: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub x_shift: i32,
    pub y_shift: i32,
    pub zoom_steps: u32,
    pub origin_offset_x: i32,
    pub origin_offset_y: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 7,
            columns: 5,
            tile_width: 1030,
            tile_height: 620,
            x_shift: -1005,
            y_shift: -510,
            zoom_steps: 0,
            origin_offset_x: 0,
            origin_offset_y: 0,
        }
    }
}

impl GridConfig {
    /// Width of the stitched mosaic
    pub fn total_width(&self) -> u32 {
        span(self.tile_width, self.columns, self.x_shift)
    }

    /// Height of the stitched mosaic
    pub fn total_height(&self) -> u32 {
        span(self.tile_height, self.rows, self.y_shift)
    }

    pub fn cell_count(&self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }

    pub fn report(&self) -> SettingsReport {
        SettingsReport {
            grid: *self,
            total_width: self.total_width(),
            total_height: self.total_height(),
        }
    }
}

fn span(tile: u32, count: u32, shift: i32) -> u32 {
    tile.saturating_add(count.saturating_sub(1).saturating_mul(shift.unsigned_abs()))
}

/// Read-only dump of the effective grid plus the derived canvas size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsReport {
    pub grid: GridConfig,
    pub total_width: u32,
    pub total_height: u32,
}

impl fmt::Display for SettingsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.grid;
        writeln!(f, "rows:          {}", g.rows)?;
        writeln!(f, "columns:       {}", g.columns)?;
        writeln!(f, "tile:          {}x{}", g.tile_width, g.tile_height)?;
        writeln!(f, "x shift:       {}", g.x_shift)?;
        writeln!(f, "y shift:       {}", g.y_shift)?;
        writeln!(f, "zoom steps:    {}", g.zoom_steps)?;
        writeln!(f, "origin offset: {},{}", g.origin_offset_x, g.origin_offset_y)?;
        write!(f, "total size:    {}x{}", self.total_width, self.total_height)
    }
}

/// Where the map lives on screen
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Title pattern handed to the window search
    pub title: String,
    /// Top-left corner of the capture area relative to the window
    pub capture_inset_x: i32,
    pub capture_inset_y: i32,
    /// Absolute screen position the pointer is parked at before each capture
    pub park_x: i32,
    pub park_y: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "map".to_string(),
            capture_inset_x: 0,
            capture_inset_y: 0,
            park_x: 0,
            park_y: 0,
        }
    }
}

/// Settle delays between UI actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingSettings {
    pub pan_settle_ms: u64,
    pub capture_settle_ms: u64,
    pub zoom_settle_ms: u64,
    pub drag_waypoints: usize,
    pub drag_step_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            pan_settle_ms: 300,
            capture_settle_ms: 200,
            zoom_settle_ms: 500,
            drag_waypoints: 20,
            drag_step_ms: 10,
        }
    }
}

impl TimingSettings {
    pub fn pan_settle(&self) -> Duration {
        Duration::from_millis(self.pan_settle_ms)
    }

    pub fn capture_settle(&self) -> Duration {
        Duration::from_millis(self.capture_settle_ms)
    }

    pub fn zoom_settle(&self) -> Duration {
        Duration::from_millis(self.zoom_settle_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ZoomSettings {
    /// Zoom-out steps presumed to reach the minimum zoom from any level
    pub baseline_out_steps: u32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            baseline_out_steps: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving the tiles and the composite script
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config/mapgrab/config.toml")
    }

    /// Load config from the default path, returning defaults if it is
    /// missing or unusable
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents).map_err(|source| Error::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reject configurations a run cannot start with
    pub fn validate(&self) -> Result<()> {
        let g = &self.grid;
        for (name, value) in [
            ("rows", g.rows),
            ("columns", g.columns),
            ("tile width", g.tile_width),
            ("tile height", g.tile_height),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be positive", name)));
            }
        }
        if self.window.title.trim().is_empty() {
            return Err(Error::InvalidConfig("window title must not be empty".into()));
        }
        if !self.output.dir.is_dir() {
            return Err(Error::InvalidConfig(format!(
                "output directory {} does not exist",
                self.output.dir.display()
            )));
        }
        Ok(())
    }
}
