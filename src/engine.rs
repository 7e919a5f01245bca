//! Stateful game engine
//!
//! Owns the simulation state, the scheduler and the event bus. The host calls
//! commands and `pump` from one thread; every mutation happens inside those
//! calls, so no locking is needed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;
use crate::events::{EventBus, GameEvent, ListenerId};
use crate::scheduler::{Clock, FollowUp, Scheduler, SystemClock};
use crate::sim::{self, GameState, Outcome, Resolution, TickInput};
use crate::tuning::Tuning;

/// Read-only view of the published state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub level: u32,
    pub remaining_seconds: f64,
    pub position: Vec2,
    pub size: Vec2,
    pub outcome: Option<Outcome>,
}

/// The game engine
#[derive(Debug)]
pub struct Engine<C: Clock = SystemClock> {
    clock: C,
    tuning: Tuning,
    state: GameState,
    scheduler: Scheduler,
    bus: EventBus,
    pending: Vec<GameEvent>,
}

impl Engine<SystemClock> {
    /// Engine on the wall clock with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_clock(SystemClock::new(), seed, Tuning::default())
    }
}

impl<C: Clock> Engine<C> {
    pub fn with_clock(clock: C, seed: u64, tuning: Tuning) -> Self {
        let state = GameState::new(seed, &tuning);
        Self {
            clock,
            tuning,
            state,
            scheduler: Scheduler::new(),
            bus: EventBus::new(),
            pending: Vec::new(),
        }
    }

    /// Advance to the next level and start playing it
    ///
    /// From the idle state this begins level 1. Called mid-game it skips to
    /// the following level without charging the time spent so far.
    ///
    /// Deliberately guarded, although starting has no precondition in the
    /// game rules: an unguarded start would step past the last level script.
    /// It refuses (returns false) once an outcome is set or when no level is
    /// left to skip to; `restart` is needed first.
    pub fn start(&mut self) -> bool {
        if let Some(outcome) = self.state.outcome {
            log::warn!("start() ignored: run already finished ({outcome:?}), restart first");
            return false;
        }
        if self.state.level >= LEVEL_COUNT {
            log::warn!("start() ignored: already on the last level");
            return false;
        }

        let now = self.clock.now();
        self.state.level += 1;
        self.pending.push(GameEvent::LevelChanged {
            level: self.state.level,
        });
        self.play(now);
        self.flush();
        true
    }

    /// Cancel the current run and return to the pre-start state
    pub fn restart(&mut self) {
        self.scheduler.cancel_all();
        self.state.reset(&self.tuning);
        log::info!("Game reset");

        self.pending.push(GameEvent::ColorChanged { inverted: false });
        self.pending.push(GameEvent::LevelChanged {
            level: self.state.level,
        });
        self.flush();
    }

    /// Record a tap on the target
    ///
    /// Ticks already due are run first, so a tap never counts for a tick
    /// scheduled before it arrived. Only counts while a level is being
    /// played; otherwise it is ignored.
    pub fn report_button_press(&mut self) -> bool {
        self.pump();
        if !self.state.is_playing(LEVEL_COUNT) {
            log::debug!(
                "Button press ignored (level {}, outcome {:?})",
                self.state.level,
                self.state.outcome
            );
            return false;
        }
        self.state.button_pressed = true;
        true
    }

    /// Run every tick and follow-up due at the clock's current time
    ///
    /// Returns the number of ticks run.
    pub fn pump(&mut self) -> u32 {
        let now = self.clock.now();

        let overdue = self.scheduler.overdue(now);
        if overdue > u64::from(self.tuning.max_catch_up_ticks) {
            log::warn!("{overdue} ticks overdue, skipping ahead");
            self.scheduler.rebase(now);
        }

        let mut ticks = 0;
        loop {
            while let Some(task) = self.scheduler.next_follow_up() {
                self.run_follow_up(task);
            }
            let Some(at) = self.scheduler.due_tick(now) else {
                break;
            };

            let result = sim::tick(
                &mut self.state,
                &self.tuning,
                &TickInput { now: at },
                &mut self.pending,
            );
            ticks += 1;
            if result.terminal {
                self.scheduler.cancel_repeating();
                self.scheduler.enqueue(FollowUp::ResolveLevel { at });
            }
            self.flush();
        }
        self.flush();
        ticks
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            level: self.state.level,
            remaining_seconds: self.state.remaining_seconds,
            position: self.state.position,
            size: self.state.size,
            outcome: self.state.outcome,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// True while a level's tick loop is scheduled
    pub fn is_running(&self) -> bool {
        self.scheduler.repeating().is_some()
    }

    /// Enter `state.level` at `now` and schedule its ticks
    fn play(&mut self, now: f64) {
        match sim::enter_level(&mut self.state, &self.tuning, now) {
            Some(level) => {
                log::info!(
                    "Level {} ({level:?}) started, {:.2}s left",
                    self.state.level,
                    self.state.remaining_seconds
                );
                self.scheduler
                    .schedule_repeating(now, self.tuning.step_time);
            }
            None => {
                log::warn!("No playable level {}", self.state.level);
                self.scheduler.cancel_repeating();
            }
        }
    }

    fn run_follow_up(&mut self, task: FollowUp) {
        match task {
            FollowUp::ResolveLevel { at } => {
                match sim::resolve_level(&mut self.state, at, &mut self.pending) {
                    Resolution::NextLevel(_) => self.play(at),
                    Resolution::Finished(outcome) => {
                        log::info!(
                            "Game over: {outcome:?} on level {} with {:.2}s left",
                            self.state.level,
                            self.state.remaining_seconds
                        );
                    }
                }
                self.flush();
            }
        }
    }

    fn flush(&mut self) {
        for event in self.pending.drain(..) {
            self.bus.emit(&event);
        }
    }
}
