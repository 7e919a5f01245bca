//! Catch - a timed reaction game
//!
//! A target shrinks, jumps around and flips colors across four escalating
//! levels; the player has to tap it before the shared time budget runs out.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level scripts, tick, level resolution)
//! - `scheduler`: Clocks and the cancellable repeating tick task
//! - `engine`: Stateful game engine driving `sim` from the scheduler
//! - `events`: Event stream delivered to the presentation layer
//! - `tuning`: Game balance parameters
//! - `hud`: Pure helpers for whoever draws the game

pub mod engine;
pub mod events;
pub mod hud;
pub mod scheduler;
pub mod sim;
pub mod tuning;

pub use engine::{Engine, GameSnapshot};
pub use events::{EventBus, GameEvent, ListenerId};
pub use scheduler::{Clock, ManualClock, SystemClock};
pub use sim::{GameState, Level, Outcome};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Tick period in seconds (20 Hz)
    pub const STEP_TIME: f64 = 0.05;
    /// Time budget for a whole run, shared by every level
    pub const START_SECONDS: f64 = 7.0;
    /// Number of playable levels
    pub const LEVEL_COUNT: u32 = 4;

    /// Logical play region; coordinates are normalized to (-1, 1)
    pub const REGION_WIDTH: f32 = 2.0;
    pub const REGION_HEIGHT: f32 = 2.0;

    /// Level 1 target side, as a fraction of the region width
    pub const LEVEL1_SIZE_FRACTION: f32 = 1.0 / 5.0;
    /// Level 1 sweeps this many steps from the center to either edge
    pub const LEVEL1_STEPS: i32 = 10;

    /// Gate reloads: the effect fires every `n + 1` ticks
    pub const MOVE_EVERY: u32 = 5;
    pub const RESIZE_EVERY: u32 = 2;
    /// Color inversion reloads to a random value in this range (inclusive)
    pub const INVERSION_RELOAD_MIN: u32 = 3;
    pub const INVERSION_RELOAD_MAX: u32 = 20;

    /// Random moves land in this fraction band of the free half-range
    pub const MOVE_BAND_MIN: f32 = 0.5;
    pub const MOVE_BAND_MAX: f32 = 0.75;
    /// Random sizes, as fractions of the region width
    pub const RESIZE_BAND_MIN: f32 = 1.0 / 40.0;
    pub const RESIZE_BAND_MAX: f32 = 1.0 / 5.0;

    /// Most overdue ticks replayed in one pump before the schedule is rebased
    pub const MAX_CATCH_UP_TICKS: u32 = 200;
}
