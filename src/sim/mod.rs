//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in through `TickInput`, never from a clock
//! - Seeded RNG only
//! - No scheduling, rendering or platform dependencies

pub mod level;
pub mod state;
pub mod tick;

pub use level::{Level, gate_open};
pub use state::{GameState, IDLE_LEVEL, Outcome, PerturbationCounters, SweepCursor};
pub use tick::{Resolution, TickInput, TickResult, enter_level, resolve_level, tick};
