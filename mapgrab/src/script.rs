//! Composite script emission.
//!
//! The emitted POSIX shell script drives ImageMagick `convert` to paint
//! every tile onto a transparent canvas in capture order, writes the mosaic
//! and then removes the tiles and itself. It depends on nothing but the tile
//! files next to it, so it can be run at any later time.

use crate::capture::{TileRecord, TILE_EXTENSION, TILE_PREFIX};
use crate::config::GridConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub const SCRIPT_NAME: &str = "compose-map.sh";

/// Size of the blank canvas and where the first tile lands on it
///
/// The anchor is added to every placement. Walking right/down (negative
/// shifts) yields non-negative placements and a zero anchor; positive shifts
/// yield negative placements, which the anchor moves back onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub total_width: u32,
    pub total_height: u32,
    pub anchor_x: i32,
    pub anchor_y: i32,
}

impl CanvasSpec {
    pub fn for_grid(grid: &GridConfig) -> Self {
        Self {
            total_width: grid.total_width(),
            total_height: grid.total_height(),
            anchor_x: anchor(grid.columns, grid.x_shift),
            anchor_y: anchor(grid.rows, grid.y_shift),
        }
    }
}

fn anchor(count: u32, shift: i32) -> i32 {
    let steps = i32::try_from(count.saturating_sub(1)).unwrap_or(i32::MAX);
    steps.saturating_mul(shift).max(0)
}

/// Name of the stitched mosaic for a run started at `started_at`
pub fn output_file_name(started_at: DateTime<Utc>) -> String {
    format!("map-{}.png", started_at.format("%Y%m%d-%H%M%S"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    Empty,
    Accumulating,
    Finalized,
}

/// Writes a composite script one instruction at a time
///
/// Every instruction is flushed as soon as it is written so that an
/// interrupted run leaves its partial script on disk.
pub struct CompositeScript<W: Write> {
    out: W,
    state: EmitterState,
    canvas: Option<CanvasSpec>,
    tiles: u32,
}

impl CompositeScript<BufWriter<File>> {
    /// Create (or truncate) the script file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "creating composite script");
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CompositeScript<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: EmitterState::Empty,
            canvas: None,
            tiles: 0,
        }
    }

    pub fn state(&self) -> EmitterState {
        self.state
    }

    pub fn tile_count(&self) -> u32 {
        self.tiles
    }

    /// Write the header declaring a blank canvas
    pub fn begin(&mut self, canvas: CanvasSpec) -> Result<()> {
        self.expect_state("begin", EmitterState::Empty)?;
        writeln!(self.out, "#!/bin/sh")?;
        writeln!(self.out, "set -e")?;
        writeln!(self.out, "cd \"$(dirname \"$0\")\"")?;
        writeln!(
            self.out,
            "convert -size {}x{} xc:none \\",
            canvas.total_width, canvas.total_height
        )?;
        self.out.flush()?;
        self.canvas = Some(canvas);
        self.state = EmitterState::Accumulating;
        Ok(())
    }

    /// Append one overlay instruction; later tiles paint over earlier ones
    pub fn add_tile(&mut self, record: &TileRecord) -> Result<()> {
        self.expect_state("add a tile", EmitterState::Accumulating)?;
        let (anchor_x, anchor_y) = self
            .canvas
            .map_or((0, 0), |c| (c.anchor_x, c.anchor_y));
        let dx = record.placement_x.saturating_add(anchor_x);
        let dy = record.placement_y.saturating_add(anchor_y);
        writeln!(
            self.out,
            "  {} -geometry {:+}{:+} -composite \\",
            record.file_name, dx, dy
        )?;
        self.out.flush()?;
        self.tiles += 1;
        Ok(())
    }

    /// Write the output instruction and the cleanup footer
    pub fn end(&mut self, output_name: &str) -> Result<()> {
        self.expect_state("end", EmitterState::Accumulating)?;
        writeln!(self.out, "  {}", output_name)?;
        writeln!(self.out, "rm -f {}*.{}", TILE_PREFIX, TILE_EXTENSION)?;
        // $0 may be relative to the directory the script was started from
        writeln!(self.out, "rm -f \"$(basename \"$0\")\"")?;
        writeln!(self.out, "exit 0")?;
        self.out.flush()?;
        self.state = EmitterState::Finalized;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn expect_state(&self, operation: &'static str, expected: EmitterState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::ScriptState {
                operation,
                state: self.state,
            })
        }
    }
}

/// Give the script owner/group/other execute permission
#[cfg(unix)]
pub fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
