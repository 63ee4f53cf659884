//! Bounded panning.
//!
//! A drag gesture is only trusted up to the size of the capture area along
//! its axis, so longer pans are issued as several shorter drags. The offset
//! tracker is updated after every individual drag.

use crate::config::GridConfig;
use crate::error::Result;
use crate::offset::{Axis, OffsetTracker};
use tracing::debug;

/// Performs single drag gestures on the live surface
pub trait PanExecutor {
    /// Drag the map by `distance` pixels along `axis` and block until the
    /// surface has settled. Positive moves the content right or down.
    fn drag(&mut self, axis: Axis, distance: i32) -> Result<()>;
}

/// Split `total` into sub-distances of at most `max_step` magnitude
///
/// Every part carries the sign of `total` and the parts sum to `total`.
/// A zero `total` yields no parts; a zero `max_step` leaves the pan unsplit.
pub fn split_pan(total: i32, max_step: u32) -> Vec<i32> {
    if total == 0 {
        return Vec::new();
    }
    if max_step == 0 {
        return vec![total];
    }

    let mut remaining = total.unsigned_abs();
    let mut parts = Vec::with_capacity((remaining / max_step + 1) as usize);
    while remaining > 0 {
        let step = remaining.min(max_step);
        // a step of 2^31 only comes from i32::MIN, which wrapping_neg maps to itself
        let part = if total < 0 {
            (step as i32).wrapping_neg()
        } else {
            step as i32
        };
        parts.push(part);
        remaining -= step;
    }
    parts
}

/// Issues pans through a [`PanExecutor`], splitting them at the per-axis bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panner {
    max_x: u32,
    max_y: u32,
}

impl Panner {
    pub fn new(max_x: u32, max_y: u32) -> Self {
        Self { max_x, max_y }
    }

    /// Bound drags by the tile (capture area) size
    pub fn for_grid(grid: &GridConfig) -> Self {
        Self::new(grid.tile_width, grid.tile_height)
    }

    pub fn bound(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }

    pub fn gestures(&self, axis: Axis, distance: i32) -> Vec<i32> {
        split_pan(distance, self.bound(axis))
    }

    /// Pan by `distance`, one blocking drag per sub-distance
    pub fn pan<P>(
        &self,
        executor: &mut P,
        tracker: &mut OffsetTracker,
        axis: Axis,
        distance: i32,
    ) -> Result<()>
    where
        P: PanExecutor + ?Sized,
    {
        for part in self.gestures(axis, distance) {
            debug!(%axis, part, total = distance, "pan gesture");
            executor.drag(axis, part)?;
            tracker.apply_pan(axis, part);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_pan_is_one_gesture() {
        assert_eq!(split_pan(-1005, 1030), vec![-1005]);
    }

    #[test]
    fn long_pan_is_split_with_remainder_last() {
        assert_eq!(split_pan(2500, 1030), vec![1030, 1030, 440]);
        assert_eq!(split_pan(-2500, 1030), vec![-1030, -1030, -440]);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() {
        assert_eq!(split_pan(1240, 620), vec![620, 620]);
    }

    #[test]
    fn zero_pan_has_no_gestures() {
        assert!(split_pan(0, 620).is_empty());
    }

    #[test]
    fn unbounded_pan_is_kept_whole() {
        assert_eq!(split_pan(-7000, 0), vec![-7000]);
    }

    #[test]
    fn extreme_distance_is_conserved() {
        let parts = split_pan(i32::MIN, u32::MAX);
        assert_eq!(parts, vec![i32::MIN]);
        let parts = split_pan(i32::MAX, 1 << 30);
        assert_eq!(parts.iter().map(|&p| p as i64).sum::<i64>(), i32::MAX as i64);
    }

    struct Recorder(Vec<(Axis, i32)>);

    impl PanExecutor for Recorder {
        fn drag(&mut self, axis: Axis, distance: i32) -> Result<()> {
            self.0.push((axis, distance));
            Ok(())
        }
    }

    #[test]
    fn panner_uses_axis_bound_and_tracks_each_gesture() {
        let panner = Panner::new(1000, 500);
        let mut exec = Recorder(Vec::new());
        let mut tracker = OffsetTracker::new();

        panner.pan(&mut exec, &mut tracker, Axis::Y, 1200).unwrap();
        panner.pan(&mut exec, &mut tracker, Axis::X, -1200).unwrap();

        assert_eq!(
            exec.0,
            vec![
                (Axis::Y, 500),
                (Axis::Y, 500),
                (Axis::Y, 200),
                (Axis::X, -1000),
                (Axis::X, -200),
            ]
        );
        assert_eq!(tracker.snapshot(), (1200, -1200));
    }
}
