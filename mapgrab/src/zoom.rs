use crate::error::Result;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Issues batched zoom gestures on the live surface
pub trait ZoomExecutor {
    /// Send `steps` zoom commands as one gesture and block until the surface
    /// has settled. Never called with zero steps.
    fn zoom(&mut self, steps: u32, direction: ZoomDirection) -> Result<()>;
}

/// Brings the surface from an unknown zoom level to a known one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomController {
    baseline_out_steps: u32,
}

impl ZoomController {
    /// `baseline_out_steps` must be enough to reach minimum zoom from any level
    pub fn new(baseline_out_steps: u32) -> Self {
        Self { baseline_out_steps }
    }

    pub fn zoom_to<Z>(&self, executor: &mut Z, steps: u32, direction: ZoomDirection) -> Result<()>
    where
        Z: ZoomExecutor + ?Sized,
    {
        if steps == 0 {
            return Ok(());
        }
        executor.zoom(steps, direction)
    }

    /// Zoom all the way out, then in by `target_steps`
    pub fn establish<Z>(&self, executor: &mut Z, target_steps: u32) -> Result<()>
    where
        Z: ZoomExecutor + ?Sized,
    {
        info!(
            baseline = self.baseline_out_steps,
            target = target_steps,
            "establishing zoom level"
        );
        self.zoom_to(executor, self.baseline_out_steps, ZoomDirection::Out)?;
        self.zoom_to(executor, target_steps, ZoomDirection::In)
    }
}
