//! Cooperative pausing of the simulation loop.
//!
//! A controller thread requests a pause, the simulation thread honors it at
//! the next tick boundary, and the controller can wait until that happens.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
struct PauseState {
    requested: AtomicBool,
    paused: AtomicBool,
}

/// Shared handle to an ecosystem's pause state.
#[derive(Debug, Clone, Default)]
pub struct PauseHandle {
    state: Arc<PauseState>,
}

impl PauseHandle {
    /// Creates a handle for a running simulation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the simulation to pause at the next tick boundary.
    pub fn request_pause(&self) {
        self.state.requested.store(true, Ordering::Release);
    }

    /// Asks the simulation to resume at the next tick boundary.
    pub fn request_resume(&self) {
        self.state.requested.store(false, Ordering::Release);
    }

    /// Flips the requested state.
    pub fn toggle(&self) {
        self.state.requested.fetch_xor(true, Ordering::AcqRel);
    }

    /// Returns `true` if a pause is requested.
    pub fn is_pause_requested(&self) -> bool {
        self.state.requested.load(Ordering::Acquire)
    }

    /// Returns `true` once the simulation has honored a pause request.
    pub fn is_paused(&self) -> bool {
        self.state.paused.load(Ordering::Acquire)
    }

    /// Blocks until the simulation is paused or `timeout` expires.
    ///
    /// # Returns
    ///
    /// `true` if the simulation paused in time.
    pub fn wait_until_paused(&self, timeout: Duration) -> bool {
        self.wait_for(true, timeout)
    }

    /// Blocks until the simulation is running or `timeout` expires.
    pub fn wait_until_running(&self, timeout: Duration) -> bool {
        self.wait_for(false, timeout)
    }

    /// Applies the requested state. Called by the simulation between ticks.
    pub(crate) fn sync(&self) -> bool {
        let paused = self.is_pause_requested();
        self.state.paused.store(paused, Ordering::Release);
        paused
    }

    fn wait_for(&self, paused: bool, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_paused() != paused {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(POLL_INTERVAL);
        }
        true
    }
}
