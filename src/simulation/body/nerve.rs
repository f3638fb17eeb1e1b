//! Signal generators that drive organ motion.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// The signal source of an organ.
///
/// Each tick a nerve turns its input (the parent organ's signal) into an
/// output in roughly `[-1, 1]` that bends the organ around its angle at rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Nerve {
    /// Free-running sine wave, ignores its input.
    Oscillator {
        /// Cycles per tick.
        frequency: f64,
        /// Current position in the cycle, in `[0, 1)`.
        phase: f64,
    },
    /// Repeats its input after a fixed delay, scaled by a gain.
    Reflex {
        /// Output multiplier.
        gain: f64,
        /// Ticks between an input and its echo.
        delay: usize,
        /// Inputs waiting to be echoed.
        history: VecDeque<f64>,
    },
}

impl Nerve {
    /// Creates an oscillator starting at phase zero.
    pub fn oscillator(frequency: f64) -> Self {
        Self::Oscillator {
            frequency,
            phase: 0.0,
        }
    }

    /// Creates a reflex with an empty history.
    pub fn reflex(delay: usize, gain: f64) -> Self {
        Self::Reflex {
            gain,
            delay,
            history: VecDeque::with_capacity(delay + 1),
        }
    }

    /// Advances the nerve by one tick and returns its output.
    pub fn tick(&mut self, input: f64) -> f64 {
        match self {
            Self::Oscillator { frequency, phase } => {
                let output = (*phase * TAU).sin();
                *phase = (*phase + *frequency).rem_euclid(1.0);
                output
            }
            Self::Reflex {
                gain,
                delay,
                history,
            } => {
                history.push_back(input);
                if history.len() > *delay {
                    history.pop_front().map_or(0.0, |signal| signal * *gain)
                } else {
                    0.0
                }
            }
        }
    }
}
