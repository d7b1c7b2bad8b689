//! Pauses between engine calls.
//!
//! The turn loop asks its pacer to wait before every AI move so a front end
//! can show the opponent "thinking". Engines themselves never wait.

use std::time::Duration;

/// Waits between AI moves.
pub trait Pacer: Send + Sync {
    /// Block for up to `delay`.
    fn pause(&self, delay: Duration);
}

/// Never waits. The default for sessions and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&self, _delay: Duration) {}
}

/// Sleeps the calling thread for the full delay.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
