use crate::error::Result;
use crate::offset::OffsetTracker;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::info;

pub const TILE_PREFIX: &str = "scr-";
pub const TILE_EXTENSION: &str = "png";

/// Takes screenshots of the fixed-size capture area
pub trait TileCapturer {
    /// Move the pointer to its parking position outside the capture area
    fn park_pointer(&mut self) -> Result<()>;

    /// Save the capture area to `path`, blocking until the file is written
    fn capture_tile(&mut self, path: &Path) -> Result<()>;
}

/// Placement of one captured tile on the final canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    /// 1-based capture order
    pub index: u32,
    pub file_name: String,
    pub placement_x: i32,
    pub placement_y: i32,
}

/// File name of the tile captured `index`-th, e.g. `scr-07.png`
pub fn tile_file_name(index: u32) -> String {
    format!("{}{:02}.{}", TILE_PREFIX, index, TILE_EXTENSION)
}

/// Captures tiles into a working directory
#[derive(Debug, Clone)]
pub struct CaptureStage {
    dir: PathBuf,
    settle: Duration,
}

impl CaptureStage {
    /// `settle` is waited after parking the pointer and before capturing
    pub fn new(dir: impl Into<PathBuf>, settle: Duration) -> Self {
        Self {
            dir: dir.into(),
            settle,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn capture<C>(
        &self,
        capturer: &mut C,
        index: u32,
        tracker: &OffsetTracker,
    ) -> Result<TileRecord>
    where
        C: TileCapturer + ?Sized,
    {
        let file_name = tile_file_name(index);

        capturer.park_pointer()?;
        thread::sleep(self.settle);
        capturer.capture_tile(&self.dir.join(&file_name))?;

        let (placement_x, placement_y) = tracker.snapshot();
        info!(index, file = %file_name, placement_x, placement_y, "tile captured");
        Ok(TileRecord {
            index,
            file_name,
            placement_x,
            placement_y,
        })
    }
}
