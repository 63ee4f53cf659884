//! Boustrophedon grid traversal.
//!
//! Rows are walked alternately left-to-right and right-to-left so that the
//! start of each row sits directly below the end of the previous one and no
//! full-width return pan is ever needed.

use crate::config::GridConfig;
use crate::offset::Axis;
use std::iter::FusedIterator;

/// One action of a traversal plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Capture the cell currently in view. `column` is the cell's position
    /// in the grid, not the order it was reached within its row.
    Capture { row: u32, column: u32 },
    /// Pan by a signed distance; the sign gives the direction
    Pan { axis: Axis, distance: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Capture,
    Move,
    Done,
}

/// Ordered plan covering every grid cell exactly once
///
/// Consumed by iterating; a fresh plan is built for every run.
#[derive(Debug, Clone)]
pub struct GridTraversal {
    rows: u32,
    columns: u32,
    x_shift: i32,
    y_shift: i32,
    row: u32,
    col: u32,
    forward: bool,
    next: Next,
    remaining: usize,
}

impl GridTraversal {
    pub fn new(grid: &GridConfig) -> Self {
        let empty = grid.rows == 0 || grid.columns == 0;
        Self {
            rows: grid.rows,
            columns: grid.columns,
            x_shift: grid.x_shift,
            y_shift: grid.y_shift,
            row: 0,
            col: 0,
            forward: true,
            next: if empty { Next::Done } else { Next::Capture },
            remaining: if empty {
                0
            } else {
                step_count(grid.rows, grid.columns)
            },
        }
    }

    fn x_distance(&self) -> i32 {
        if self.forward {
            self.x_shift
        } else {
            self.x_shift.saturating_neg()
        }
    }
}

/// `R*C` captures plus `R*(C-1) + (R-1)` pans
fn step_count(rows: u32, columns: u32) -> usize {
    let cells = rows as usize * columns as usize;
    2 * cells - 1
}

impl Iterator for GridTraversal {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let step = match self.next {
            Next::Done => return None,
            Next::Capture => {
                self.next = Next::Move;
                let column = if self.forward {
                    self.col
                } else {
                    self.columns - 1 - self.col
                };
                Step::Capture {
                    row: self.row,
                    column,
                }
            }
            Next::Move => {
                if self.col + 1 < self.columns {
                    self.col += 1;
                    self.next = Next::Capture;
                    Step::Pan {
                        axis: Axis::X,
                        distance: self.x_distance(),
                    }
                } else if self.row + 1 < self.rows {
                    self.row += 1;
                    self.col = 0;
                    self.forward = !self.forward;
                    self.next = Next::Capture;
                    Step::Pan {
                        axis: Axis::Y,
                        distance: self.y_shift,
                    }
                } else {
                    self.next = Next::Done;
                    return None;
                }
            }
        };
        self.remaining -= 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridTraversal {}

impl FusedIterator for GridTraversal {}
