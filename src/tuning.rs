//! Game balance parameters
//!
//! Every value defaults to the compile-time constants in [`crate::consts`].
//! Hosts and tests may override fields in-process; nothing is read from disk.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Tick period in seconds
    pub step_time: f64,
    /// Time budget at the start of a run
    pub start_seconds: f64,
    /// Logical region size (width, height)
    pub region: Vec2,
    /// Half-range of the level 1 sweep, in steps
    pub level1_steps: i32,
    /// Move gate reload
    pub move_every: u32,
    /// Resize gate reload
    pub resize_every: u32,
    /// Color inversion gate reload range (inclusive)
    pub inversion_reload: (u32, u32),
    /// Random move band, as fractions of the free half-range
    pub move_band: (f32, f32),
    /// Random resize band, as fractions of the region width
    pub resize_band: (f32, f32),
    /// Overdue ticks replayed per pump before rebasing the schedule
    pub max_catch_up_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            step_time: STEP_TIME,
            start_seconds: START_SECONDS,
            region: Vec2::new(REGION_WIDTH, REGION_HEIGHT),
            level1_steps: LEVEL1_STEPS,
            move_every: MOVE_EVERY,
            resize_every: RESIZE_EVERY,
            inversion_reload: (INVERSION_RELOAD_MIN, INVERSION_RELOAD_MAX),
            move_band: (MOVE_BAND_MIN, MOVE_BAND_MAX),
            resize_band: (RESIZE_BAND_MIN, RESIZE_BAND_MAX),
            max_catch_up_ticks: MAX_CATCH_UP_TICKS,
        }
    }
}

impl Tuning {
    /// Side of the fixed level 1 target square
    pub fn level1_size(&self) -> f32 {
        self.region.x * LEVEL1_SIZE_FRACTION
    }

    /// Horizontal distance covered by one level 1 step
    pub fn level1_step(&self) -> f32 {
        (self.region.x - self.level1_size()) / (2.0 * self.level1_steps as f32)
    }
}
