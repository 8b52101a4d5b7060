//! Fixed timestep driver

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we accept before dropping time (e.g. after a stall)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Turns variable frame times into a whole number of `SIM_DT` steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        debug_assert!(step > 0.0);
        Self {
            step,
            accumulator: 0.0,
            max_substeps,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many steps to run.
    /// Capped at `max_substeps` to prevent a spiral of death; leftover
    /// time past the cap is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    /// Fraction of a step left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}
