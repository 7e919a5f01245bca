//! Level scripts
//!
//! Level 1 is a fixed sweep; levels 2-4 stack random moves, resizes and color
//! inversions on top of each other. Each script runs once per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, SweepCursor};
use crate::events::GameEvent;
use crate::tuning::Tuning;

/// Behavior of one playable level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// Fixed-size square bouncing left and right
    Sweep,
    /// Random jumps
    Scatter,
    /// Random jumps and random sizes
    ScatterResize,
    /// Random jumps, random sizes and color inversion pulses
    ScatterResizeInvert,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::Sweep,
        Level::Scatter,
        Level::ScatterResize,
        Level::ScatterResizeInvert,
    ];

    /// Look up a level by its 1-based number
    pub fn from_number(level: u32) -> Option<Self> {
        let index = usize::try_from(level).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn number(self) -> u32 {
        match self {
            Level::Sweep => 1,
            Level::Scatter => 2,
            Level::ScatterResize => 3,
            Level::ScatterResizeInvert => 4,
        }
    }

    /// Set up the target when the level begins
    pub fn enter(self, state: &mut GameState, tuning: &Tuning) {
        if self == Level::Sweep {
            let side = tuning.level1_size();
            state.position = Vec2::ZERO;
            state.size = Vec2::splat(side);
            state.sweep = SweepCursor::default();
        }
    }

    /// Advance the level's script by one tick
    pub fn step(self, state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        match self {
            Level::Sweep => sweep(state, tuning),
            Level::Scatter => random_move(state, tuning),
            Level::ScatterResize => {
                random_resize(state, tuning);
                random_move(state, tuning);
            }
            Level::ScatterResizeInvert => {
                color_inversion(state, tuning, events);
                random_resize(state, tuning);
                random_move(state, tuning);
            }
        }
    }
}

/// Gate check for a perturbation counter
///
/// Returns true when the effect should fire; the caller must then reload the
/// counter. Otherwise the counter is decremented.
pub fn gate_open(counter: &mut u32) -> bool {
    if *counter > 0 {
        *counter -= 1;
        false
    } else {
        true
    }
}

fn sweep(state: &mut GameState, tuning: &Tuning) {
    let cursor = &mut state.sweep;
    if tuning.level1_steps <= cursor.index.abs() {
        cursor.direction = -cursor.direction;
    }
    cursor.index += cursor.direction;
    state.position.x += tuning.level1_step() * cursor.direction as f32;
}

fn random_move(state: &mut GameState, tuning: &Tuning) {
    if !gate_open(&mut state.counters.move_counter) {
        return;
    }
    state.counters.move_counter = tuning.move_every;

    // Free half-range once the target's own half-size is subtracted
    let range = (tuning.region - state.size) / 2.0;
    let (lo, hi) = tuning.move_band;
    let rng = state.rng();

    let mut x = sample_band(rng, range.x * lo, range.x * hi);
    let mut y = sample_band(rng, range.y * lo, range.y * hi);
    if rng.random_bool(0.5) {
        x = -x;
    }
    if rng.random_bool(0.5) {
        y = -y;
    }
    state.position = Vec2::new(x, y);
}

fn random_resize(state: &mut GameState, tuning: &Tuning) {
    if !gate_open(&mut state.counters.resize_counter) {
        return;
    }
    state.counters.resize_counter = tuning.resize_every;

    let (lo, hi) = tuning.resize_band;
    let width = tuning.region.x;
    let rng = state.rng();
    let w = sample_band(rng, width * lo, width * hi);
    let h = sample_band(rng, width * lo, width * hi);
    state.size = Vec2::new(w, h);
}

fn color_inversion(state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if !gate_open(&mut state.counters.color_counter) {
        return;
    }
    let (lo, hi) = tuning.inversion_reload;
    state.counters.color_counter = state.rng().random_range(lo.min(hi)..=lo.max(hi));

    events.push(GameEvent::ColorChanged { inverted: true });
}

fn sample_band(rng: &mut impl Rng, a: f32, b: f32) -> f32 {
    rng.random_range(a.min(b)..=a.max(b))
}
