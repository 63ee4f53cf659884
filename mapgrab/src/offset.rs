use std::fmt;

/// Pan axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Cumulative displacement of the map content since the last reset
///
/// A pan of `d` pixels moves the content by `d`, so whatever the viewport
/// shows afterwards sits at `-d` in the coordinates of the reset position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffsetTracker {
    x: i32,
    y: i32,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
    }

    pub fn apply_pan(&mut self, axis: Axis, distance: i32) {
        match axis {
            Axis::X => self.x = self.x.saturating_sub(distance),
            Axis::Y => self.y = self.y.saturating_sub(distance),
        }
    }

    pub fn snapshot(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pans_move_offset_inversely() {
        let mut tracker = OffsetTracker::new();
        tracker.apply_pan(Axis::X, 100);
        tracker.apply_pan(Axis::Y, -40);
        assert_eq!(tracker.snapshot(), (-100, 40));
    }

    #[test]
    fn offset_is_negated_sum() {
        let mut tracker = OffsetTracker::new();
        let pans = [1005, -300, 77, -1005, 12];
        for d in pans {
            tracker.apply_pan(Axis::X, d);
        }
        assert_eq!(tracker.snapshot().0, -pans.iter().sum::<i32>());
        assert_eq!(tracker.snapshot().1, 0);
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut tracker = OffsetTracker::new();
        tracker.apply_pan(Axis::X, 5);
        tracker.apply_pan(Axis::Y, 5);
        tracker.reset();
        assert_eq!(tracker.snapshot(), (0, 0));
    }

    #[test]
    fn extreme_pans_saturate() {
        let mut tracker = OffsetTracker::new();
        tracker.apply_pan(Axis::X, i32::MIN);
        tracker.apply_pan(Axis::Y, i32::MAX);
        tracker.apply_pan(Axis::Y, 1);
        assert_eq!(tracker.snapshot(), (i32::MAX, i32::MIN));
    }
}
