//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here, including the seeded RNG, so
//! a run is reproducible from its seed and the times it was ticked at.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Level value before the first `start`
pub const IDLE_LEVEL: u32 = 0;

/// Terminal result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every level was caught in time
    Win,
    /// A level ran out of time without a tap
    Lose,
}

/// Down-counters gating how often the random effects fire
///
/// A counter at zero lets its effect fire and is reloaded; any other value is
/// decremented and the effect is skipped for that tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerturbationCounters {
    pub move_counter: u32,
    pub resize_counter: u32,
    pub color_counter: u32,
}

/// Position of the level 1 sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepCursor {
    /// +1 moving right, -1 moving left
    pub direction: i32,
    /// Signed step count from the center
    pub index: i32,
}

impl Default for SweepCursor {
    fn default() -> Self {
        Self {
            direction: 1,
            index: 0,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// 0 = not started, 1..=N playing, N + 1 = all levels cleared
    pub level: u32,
    /// Time budget left, carried from level to level
    pub remaining_seconds: f64,
    /// Target center, normalized to (-1, 1)
    pub position: Vec2,
    /// Target footprint in normalized units
    pub size: Vec2,
    /// Set once per run, cleared only by a reset
    pub outcome: Option<Outcome>,
    /// Edge-triggered tap flag, cleared by level resolution
    pub button_pressed: bool,
    /// Clock time the current level attempt started at
    pub last_time: f64,
    pub counters: PerturbationCounters,
    pub sweep: SweepCursor,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh, not-yet-started state
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            level: IDLE_LEVEL,
            remaining_seconds: tuning.start_seconds,
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            outcome: None,
            button_pressed: false,
            last_time: 0.0,
            counters: PerturbationCounters::default(),
            sweep: SweepCursor::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Return every field to its initial value
    ///
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.level = IDLE_LEVEL;
        self.remaining_seconds = tuning.start_seconds;
        self.position = Vec2::ZERO;
        self.size = Vec2::ZERO;
        self.outcome = None;
        self.button_pressed = false;
        self.last_time = 0.0;
        self.counters = PerturbationCounters::default();
        self.sweep = SweepCursor::default();
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// True while a level is being played
    pub fn is_playing(&self, level_count: u32) -> bool {
        self.outcome.is_none() && (1..=level_count).contains(&self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7, &Tuning::default());
        assert_eq!(state.level, IDLE_LEVEL);
        assert_eq!(state.remaining_seconds, 7.0);
        assert_eq!(state.position, Vec2::ZERO);
        assert_eq!(state.size, Vec2::ZERO);
        assert!(state.outcome.is_none());
        assert!(!state.is_playing(4));
    }

    #[test]
    fn test_reset_clears_run() {
        let tuning = Tuning::default();
        let mut state = GameState::new(7, &tuning);
        state.level = 3;
        state.remaining_seconds = 1.25;
        state.position = Vec2::new(0.5, -0.5);
        state.size = Vec2::new(0.1, 0.2);
        state.outcome = Some(Outcome::Lose);
        state.button_pressed = true;
        state.counters = PerturbationCounters {
            move_counter: 4,
            resize_counter: 1,
            color_counter: 12,
        };
        state.sweep = SweepCursor {
            direction: -1,
            index: 6,
        };

        state.reset(&tuning);

        assert_eq!(state.level, IDLE_LEVEL);
        assert_eq!(state.remaining_seconds, 7.0);
        assert_eq!(state.position, Vec2::ZERO);
        assert_eq!(state.size, Vec2::ZERO);
        assert!(state.outcome.is_none());
        assert!(!state.button_pressed);
        assert_eq!(state.counters, PerturbationCounters::default());
        assert_eq!(state.sweep, SweepCursor::default());
        assert_eq!(state.seed, 7);
    }
}
