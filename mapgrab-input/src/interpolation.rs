/// Interpolation curve types for drag gestures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Curve {
    /// Linear interpolation (constant velocity)
    #[default]
    Linear,
    /// Cubic ease-in-out (smooth acceleration and deceleration)
    EaseInOut,
}

/// Calculate interpolated value based on curve type
///
/// # Arguments
/// * `t` - Progress from 0.0 to 1.0
/// * `curve` - The interpolation curve to use
///
/// # Returns
/// Interpolated value from 0.0 to 1.0
fn interpolate(t: f64, curve: Curve) -> f64 {
    match curve {
        Curve::Linear => t,
        Curve::EaseInOut => {
            if t < 0.5 {
                4.0 * t * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
    }
}

/// Generate waypoints as cumulative offsets from the drag start
///
/// Returns `steps` positions along the trajectory (not deltas). The final
/// waypoint is always exactly `(dx, dy)`; a zero `steps` still yields that
/// single final waypoint.
pub fn generate_waypoints(dx: i32, dy: i32, steps: usize, curve: Curve) -> Vec<(i32, i32)> {
    let steps = steps.max(1);
    let mut waypoints = Vec::with_capacity(steps);

    for i in 0..steps {
        let t = (i + 1) as f64 / steps as f64;
        let progress = interpolate(t, curve);
        let pos_x = (dx as f64 * progress).round() as i32;
        let pos_y = (dy as f64 * progress).round() as i32;
        waypoints.push((pos_x, pos_y));
    }

    // Rounding must never leave the drag short of its target
    if let Some(last) = waypoints.last_mut() {
        *last = (dx, dy);
    }

    waypoints
}
