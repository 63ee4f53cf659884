//! Run orchestration: zoom, origin, snake traversal, script emission.

use crate::capture::{tile_file_name, CaptureStage, TileCapturer, TileRecord};
use crate::config::{Config, GridConfig};
use crate::error::Result;
use crate::offset::{Axis, OffsetTracker};
use crate::pan::{PanExecutor, Panner};
use crate::script::{mark_executable, output_file_name, CanvasSpec, CompositeScript, SCRIPT_NAME};
use crate::traversal::{GridTraversal, Step};
use crate::zoom::{ZoomController, ZoomExecutor};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything a run needs from the live map surface
pub trait MapSurface: PanExecutor + ZoomExecutor + TileCapturer {}

impl<T> MapSurface for T where T: PanExecutor + ZoomExecutor + TileCapturer + ?Sized {}

/// Outcome of a completed capture run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub tiles: Vec<TileRecord>,
    pub canvas: CanvasSpec,
    pub script_path: PathBuf,
    pub output_name: String,
}

/// Capture the whole grid and leave an executable composite script behind
///
/// Any failure aborts the run immediately; tiles and the partial script
/// written so far stay in the output directory.
pub fn run<S>(surface: &mut S, config: &Config, started_at: DateTime<Utc>) -> Result<RunSummary>
where
    S: MapSurface + ?Sized,
{
    let grid = &config.grid;
    let panner = Panner::for_grid(grid);
    let mut tracker = OffsetTracker::new();

    ZoomController::new(config.zoom.baseline_out_steps).establish(surface, grid.zoom_steps)?;
    establish_origin(surface, &panner, &mut tracker, grid)?;

    let canvas = CanvasSpec::for_grid(grid);
    let script_path = config.output.dir.join(SCRIPT_NAME);
    let mut script = CompositeScript::create(&script_path)?;
    script.begin(canvas)?;

    let stage = CaptureStage::new(&config.output.dir, config.timing.capture_settle());
    let tiles = traverse(surface, grid, &panner, &stage, &mut tracker, &mut script)?;

    let output_name = output_file_name(started_at);
    script.end(&output_name)?;
    drop(script);
    mark_executable(&script_path)?;

    info!(
        tiles = tiles.len(),
        width = canvas.total_width,
        height = canvas.total_height,
        script = %script_path.display(),
        "capture run complete"
    );
    Ok(RunSummary {
        tiles,
        canvas,
        script_path,
        output_name,
    })
}

/// Pan to the configured origin and make it the zero of the offset tracker
pub fn establish_origin<P>(
    executor: &mut P,
    panner: &Panner,
    tracker: &mut OffsetTracker,
    grid: &GridConfig,
) -> Result<()>
where
    P: PanExecutor + ?Sized,
{
    info!(
        x = grid.origin_offset_x,
        y = grid.origin_offset_y,
        "moving to origin"
    );
    panner.pan(executor, tracker, Axis::X, grid.origin_offset_x)?;
    panner.pan(executor, tracker, Axis::Y, grid.origin_offset_y)?;
    tracker.reset();
    Ok(())
}

/// Walk the grid in snake order, capturing every cell and recording it in
/// `script`
pub fn traverse<S, W>(
    surface: &mut S,
    grid: &GridConfig,
    panner: &Panner,
    stage: &CaptureStage,
    tracker: &mut OffsetTracker,
    script: &mut CompositeScript<W>,
) -> Result<Vec<TileRecord>>
where
    S: MapSurface + ?Sized,
    W: Write,
{
    let mut tiles = Vec::with_capacity(grid.cell_count() as usize);
    for step in GridTraversal::new(grid) {
        match step {
            Step::Capture { row, column } => {
                let index = tiles.len() as u32 + 1;
                debug!(row, column, index, "capture step");
                let record = stage.capture(surface, index, tracker)?;
                script.add_tile(&record)?;
                tiles.push(record);
            }
            Step::Pan { axis, distance } => panner.pan(surface, tracker, axis, distance)?,
        }
    }
    Ok(tiles)
}

/// A traversal step annotated with what a run would do for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: Step,
    /// Drag gestures a pan is split into (empty for captures)
    pub gestures: Vec<i32>,
    /// Record a capture would produce (None for pans)
    pub tile: Option<TileRecord>,
}

/// Dry run of the traversal: no surface is touched
pub fn preview(grid: &GridConfig) -> Vec<PlannedStep> {
    let panner = Panner::for_grid(grid);
    let mut tracker = OffsetTracker::new();
    let mut index = 0;

    GridTraversal::new(grid)
        .map(|step| match step {
            Step::Capture { .. } => {
                index += 1;
                let (placement_x, placement_y) = tracker.snapshot();
                PlannedStep {
                    step,
                    gestures: Vec::new(),
                    tile: Some(TileRecord {
                        index,
                        file_name: tile_file_name(index),
                        placement_x,
                        placement_y,
                    }),
                }
            }
            Step::Pan { axis, distance } => {
                let gestures = panner.gestures(axis, distance);
                for &part in &gestures {
                    tracker.apply_pan(axis, part);
                }
                PlannedStep {
                    step,
                    gestures,
                    tile: None,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_places_two_columns() {
        let grid = GridConfig {
            rows: 1,
            columns: 2,
            tile_width: 200,
            x_shift: 100,
            ..GridConfig::default()
        };
        let placements: Vec<(i32, i32)> = preview(&grid)
            .into_iter()
            .filter_map(|p| p.tile)
            .map(|t| (t.placement_x, t.placement_y))
            .collect();
        assert_eq!(placements, vec![(0, 0), (-100, 0)]);
    }

    #[test]
    fn preview_splits_long_pans() {
        let grid = GridConfig {
            rows: 2,
            columns: 1,
            tile_height: 300,
            y_shift: -700,
            ..GridConfig::default()
        };
        let plan = preview(&grid);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[1].gestures, vec![-300, -300, -100]);
        let last = plan[2].tile.as_ref().unwrap();
        assert_eq!((last.index, last.placement_y), (2, 700));
    }
}
