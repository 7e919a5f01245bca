//! Fixed-period simulation tick and level resolution
//!
//! `tick` runs once per scheduled period while a level is active. When it
//! reports a terminal tick the caller stops the schedule and runs
//! `resolve_level` afterwards, exactly once.

use super::level::Level;
use super::state::{GameState, Outcome};
use crate::consts::LEVEL_COUNT;
use crate::events::GameEvent;
use crate::tuning::Tuning;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Clock time the tick is evaluated at (seconds)
    pub now: f64,
}

/// What a tick observed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    /// The level ends after this tick
    pub terminal: bool,
    /// Budget estimate reported to listeners (may be negative)
    pub remaining: f64,
}

/// How level resolution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Play continues with this level number
    NextLevel(u32),
    /// The run is over
    Finished(Outcome),
}

/// Enter the level stored in `state.level`, starting its attempt at `now`
///
/// Returns `None` when `state.level` is not a playable level.
pub fn enter_level(state: &mut GameState, tuning: &Tuning, now: f64) -> Option<Level> {
    let level = Level::from_number(state.level)?;
    level.enter(state, tuning);
    state.last_time = now;
    Some(level)
}

/// Advance the active level by one tick
///
/// Emits the time update, then runs the level script. Both happen on the
/// terminal tick too; termination only stops future ticks. A state with no
/// active level (idle, finished) reports a terminal tick with no effects.
pub fn tick(
    state: &mut GameState,
    tuning: &Tuning,
    input: &TickInput,
    events: &mut Vec<GameEvent>,
) -> TickResult {
    let level = match Level::from_number(state.level) {
        Some(level) if state.outcome.is_none() => level,
        _ => {
            return TickResult {
                terminal: true,
                remaining: state.remaining_seconds,
            };
        }
    };

    let elapsed = input.now - state.last_time;
    let terminal = state.button_pressed || state.remaining_seconds <= elapsed;
    let remaining = state.remaining_seconds - elapsed;

    events.push(GameEvent::TimeUpdate { remaining });
    level.step(state, tuning, events);

    TickResult {
        terminal,
        remaining,
    }
}

/// Settle the level attempt that just ended at `now`
///
/// Charges the elapsed time to the budget and consumes the tap. Without a tap
/// the run is lost; with one the level advances, and clearing the last level
/// wins. Entering the next level is left to the caller.
pub fn resolve_level(
    state: &mut GameState,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> Resolution {
    state.remaining_seconds -= now - state.last_time;
    state.last_time = now;
    let pressed = std::mem::take(&mut state.button_pressed);

    if !pressed {
        return finish(state, Outcome::Lose, events);
    }

    state.level += 1;
    events.push(GameEvent::LevelChanged { level: state.level });
    if state.level > LEVEL_COUNT {
        return finish(state, Outcome::Win, events);
    }
    Resolution::NextLevel(state.level)
}

fn finish(state: &mut GameState, outcome: Outcome, events: &mut Vec<GameEvent>) -> Resolution {
    state.outcome = Some(outcome);
    events.push(GameEvent::Finished { outcome });
    Resolution::Finished(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn started(seed: u64) -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(seed, &tuning);
        state.level = 1;
        enter_level(&mut state, &tuning, 10.0);
        (state, tuning)
    }

    fn at(now: f64) -> TickInput {
        TickInput { now }
    }

    #[test]
    fn test_enter_level_records_start() {
        let (state, _) = started(1);
        assert_eq!(state.last_time, 10.0);
        assert_eq!(state.position, Vec2::ZERO);
        assert!((state.size.x - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_enter_level_rejects_idle() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        assert_eq!(enter_level(&mut state, &tuning, 1.0), None);
        state.level = 5;
        assert_eq!(enter_level(&mut state, &tuning, 1.0), None);
    }

    #[test]
    fn test_time_update_counts_down() {
        let (mut state, tuning) = started(1);
        let mut events = Vec::new();

        for n in 1..=10 {
            let result = tick(&mut state, &tuning, &at(10.0 + n as f64 * 0.05), &mut events);
            assert!(!result.terminal);
            assert!((result.remaining - (7.0 - n as f64 * 0.05)).abs() < 1e-9);
        }

        let updates: Vec<f64> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::TimeUpdate { remaining } => Some(*remaining),
                _ => None,
            })
            .collect();
        assert_eq!(updates.len(), 10);
        assert!((updates[9] - 6.5).abs() < 1e-9);
        // Budget is only charged on resolution
        assert_eq!(state.remaining_seconds, 7.0);
    }

    #[test]
    fn test_press_makes_tick_terminal_but_still_steps() {
        let (mut state, tuning) = started(1);
        let mut events = Vec::new();
        state.button_pressed = true;

        let result = tick(&mut state, &tuning, &at(10.05), &mut events);

        assert!(result.terminal);
        assert_eq!(events.len(), 1);
        assert!(state.position.x > 0.0);
    }

    #[test]
    fn test_timeout_tick_reports_negative_remaining() {
        let (mut state, tuning) = started(1);
        let mut events = Vec::new();

        let result = tick(&mut state, &tuning, &at(17.02), &mut events);

        assert!(result.terminal);
        assert!(result.remaining < 0.0);
        assert_eq!(events, vec![GameEvent::TimeUpdate { remaining: result.remaining }]);
    }

    #[test]
    fn test_exact_budget_is_terminal() {
        let (mut state, tuning) = started(1);
        let mut events = Vec::new();
        let result = tick(&mut state, &tuning, &at(17.0), &mut events);
        assert!(result.terminal);
    }

    #[test]
    fn test_tick_without_level_is_inert() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        let mut events = Vec::new();
        let result = tick(&mut state, &tuning, &at(1.0), &mut events);
        assert!(result.terminal);
        assert!(events.is_empty());
        assert_eq!(state.position, Vec2::ZERO);
    }

    #[test]
    fn test_resolve_without_press_loses() {
        let (mut state, _) = started(1);
        let mut events = Vec::new();

        let resolution = resolve_level(&mut state, 17.1, &mut events);

        assert_eq!(resolution, Resolution::Finished(Outcome::Lose));
        assert_eq!(state.outcome, Some(Outcome::Lose));
        assert_eq!(state.level, 1);
        assert!((state.remaining_seconds + 0.1).abs() < 1e-9);
        assert_eq!(events, vec![GameEvent::Finished { outcome: Outcome::Lose }]);
    }

    #[test]
    fn test_resolve_with_press_advances_and_charges_time() {
        let (mut state, _) = started(1);
        let mut events = Vec::new();
        state.button_pressed = true;

        let resolution = resolve_level(&mut state, 11.5, &mut events);

        assert_eq!(resolution, Resolution::NextLevel(2));
        assert_eq!(state.level, 2);
        assert!(!state.button_pressed);
        assert!(state.outcome.is_none());
        assert!((state.remaining_seconds - 5.5).abs() < 1e-9);
        assert_eq!(state.last_time, 11.5);
    }

    #[test]
    fn test_resolve_last_level_wins() {
        let (mut state, _) = started(1);
        let mut events = Vec::new();
        state.level = 4;
        state.button_pressed = true;

        let resolution = resolve_level(&mut state, 11.0, &mut events);

        assert_eq!(resolution, Resolution::Finished(Outcome::Win));
        assert_eq!(state.level, 5);
        assert!(!state.button_pressed);
        assert_eq!(
            events,
            vec![
                GameEvent::LevelChanged { level: 5 },
                GameEvent::Finished { outcome: Outcome::Win },
            ]
        );
    }
}
