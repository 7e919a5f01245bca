//! Presentation helpers
//!
//! Pure functions for whatever draws the game: the countdown label, mapping
//! normalized target coordinates onto a viewport, and the card color swap.
//! No game logic lives here.

use glam::Vec2;

use crate::events::GameEvent;
use crate::sim::Outcome;

/// Whole seconds shown in the header; negative budgets clamp to zero
pub fn display_seconds(remaining: f64) -> u32 {
    remaining.max(0.0).ceil() as u32
}

/// Game-over banner text
pub fn banner(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "You Win!",
        Outcome::Lose => "You Lose!",
    }
}

/// Target rectangle in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub center: Vec2,
    pub extent: Vec2,
}

impl ViewportRect {
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.extent / 2.0;
        let d = (point - self.center).abs();
        d.x <= half.x && d.y <= half.y
    }
}

/// Map a normalized position/size onto a viewport of `viewport` pixels
///
/// (-1, -1) is the top-left corner and (1, 1) the bottom-right.
pub fn to_viewport(position: Vec2, size: Vec2, viewport: Vec2) -> ViewportRect {
    let half = viewport / 2.0;
    ViewportRect {
        center: half * (Vec2::ONE + position),
        extent: half * size,
    }
}

/// Card colors, swapped by inversion pulses
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardColors<T> {
    pub text: T,
    pub card: T,
    defaults: (T, T),
}

impl<T: Copy> CardColors<T> {
    pub fn new(text: T, card: T) -> Self {
        Self {
            text,
            card,
            defaults: (text, card),
        }
    }

    /// React to a color event; other events are ignored
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ColorChanged { inverted: true } => {
                std::mem::swap(&mut self.text, &mut self.card);
            }
            GameEvent::ColorChanged { inverted: false } => {
                (self.text, self.card) = self.defaults;
            }
            _ => {}
        }
    }
}
