//! Clocks and task scheduling
//!
//! The scheduler holds at most one repeating tick task and a FIFO of
//! follow-up tasks. Follow-ups always drain before the next tick is handed
//! out, so level resolution runs after the tick that requested it and before
//! the first tick of the next level.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

/// Slack when comparing due times, so exact multiples of the period fire
const DUE_EPSILON: f64 = 1e-9;

/// Shortest accepted tick period; anything smaller (or NaN) is raised to it
pub const MIN_PERIOD: f64 = 1e-3;

/// Source of the current time in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Monotonic wall clock, measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock advanced by hand; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Fixed-period task; the n-th firing is due at `anchor + n * period`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatingTask {
    pub period: f64,
    anchor: f64,
    fired: u64,
}

impl RepeatingTask {
    /// Periods below [`MIN_PERIOD`] are clamped up to it
    pub fn new(anchor: f64, period: f64) -> Self {
        let period = if period >= MIN_PERIOD {
            period
        } else {
            log::warn!("Tick period {period} too short, using {MIN_PERIOD}");
            MIN_PERIOD
        };
        Self {
            period,
            anchor,
            fired: 0,
        }
    }

    pub fn next_due(&self) -> f64 {
        self.anchor + (self.fired + 1) as f64 * self.period
    }

    /// Number of firings due at `now`
    pub fn overdue(&self, now: f64) -> u64 {
        let behind = now - self.next_due() + DUE_EPSILON;
        if behind < 0.0 {
            0
        } else {
            ((behind / self.period) as u64).saturating_add(1)
        }
    }
}

/// Work queued to run after the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowUp {
    /// Settle the level whose terminal tick ran at `at`
    ResolveLevel { at: f64 },
}

/// Single scheduling context for the engine
#[derive(Debug, Default)]
pub struct Scheduler {
    repeating: Option<RepeatingTask>,
    follow_ups: VecDeque<FollowUp>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period` after `anchor`, replacing any running task
    pub fn schedule_repeating(&mut self, anchor: f64, period: f64) {
        self.repeating = Some(RepeatingTask::new(anchor, period));
    }

    pub fn cancel_repeating(&mut self) {
        self.repeating = None;
    }

    pub fn enqueue(&mut self, task: FollowUp) {
        self.follow_ups.push_back(task);
    }

    /// Drop the repeating task and every pending follow-up
    pub fn cancel_all(&mut self) {
        self.repeating = None;
        self.follow_ups.clear();
    }

    pub fn next_follow_up(&mut self) -> Option<FollowUp> {
        self.follow_ups.pop_front()
    }

    /// Hand out the next tick time if it is due at `now`
    ///
    /// Returns `None` while follow-ups are pending.
    pub fn due_tick(&mut self, now: f64) -> Option<f64> {
        if !self.follow_ups.is_empty() {
            return None;
        }
        let task = self.repeating.as_mut()?;
        let due = task.next_due();
        if due > now + DUE_EPSILON {
            return None;
        }
        task.fired += 1;
        Some(due)
    }

    /// Ticks of the repeating task due at `now`
    pub fn overdue(&self, now: f64) -> u64 {
        self.repeating.map_or(0, |task| task.overdue(now))
    }

    /// Skip missed ticks: the next one becomes due at `now`
    pub fn rebase(&mut self, now: f64) {
        if let Some(task) = self.repeating.as_mut() {
            *task = RepeatingTask::new(now - task.period, task.period);
        }
    }

    pub fn repeating(&self) -> Option<&RepeatingTask> {
        self.repeating.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.repeating.is_none() && self.follow_ups.is_empty()
    }
}
