//! Host-driven clocks. Games never schedule callbacks; they accumulate the
//! `dt` they are given and step on fixed boundaries.

use serde::{Deserialize, Serialize};

/// Nominal animation frame length (60 Hz).
pub const FRAME_SECS: f32 = 1.0 / 60.0;
/// Upper bound on steps taken for one `advance` call, so a long stall
/// (backgrounded tab) does not replay minutes of simulation.
pub const MAX_STEPS_PER_ADVANCE: u32 = 30;

/// Fixed-step accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> Self {
        Self {
            step: step.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// A 60 Hz frame clock.
    pub fn frames() -> Self {
        Self::new(FRAME_SECS)
    }

    /// Add `dt` seconds and return how many whole steps elapsed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_STEPS_PER_ADVANCE {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_ADVANCE {
            self.accumulator = 0.0;
        }
        steps
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// One-shot countdown. Fires exactly once when it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
    fired: bool,
}

impl Countdown {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs.max(0.0),
            fired: false,
        }
    }

    /// Advance by `dt`. Returns `true` only on the tick that crosses zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        if dt.is_finite() && dt > 0.0 {
            self.remaining -= dt;
        }
        if self.remaining <= 0.0 {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
