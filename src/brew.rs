//! The brew cycle — the machine's one genuinely concurrent behaviour.
//!
//! Turning the boiler on launches a single background task that owns a
//! periodic ticker and counts down a fixed number of ticks:
//!
//! ```text
//!   Idle ──boiler ON──▶ Running ──5 closed-valve ticks──▶ Completed ─┐
//!            ▲             │                                         │
//!            │             └──guard cleared (boiler OFF / reset)──▶ Aborted
//!            └───────────────────────────────────────────────────────┘
//! ```
//!
//! Per tick the task wakes, re-checks the guard at the loop head (a
//! cleared guard aborts the cycle — cancellation latency is at most one
//! tick, never instantaneous), and observes the relief valve. An open
//! valve restarts the countdown: the machine keeps brewing while venting.
//! Only a completed cycle marks the pot full and the boiler drained.
//!
//! The countdown arithmetic lives in [`BrewCycle`], a pure type the tests
//! can drive synchronously; the async wrapper around it owns the ticker
//! and the one suspension point.

use std::sync::Arc;

use embassy_time::{Duration, Ticker};
use log::{debug, info, warn};

use crate::hardware::Shared;

// ───────────────────────────────────────────────────────────────
// Pure countdown logic
// ───────────────────────────────────────────────────────────────

/// Tick countdown for one brew attempt.
///
/// `observe_tick` is called once per timer firing with the valve state
/// sampled *after* waking: an open valve zeroes the count before the
/// current tick is counted, so a cycle with the valve open on its 4th
/// tick completes on its 8th (3 elapsed + the reset tick + 4 fresh).
#[derive(Debug, Clone)]
pub struct BrewCycle {
    ticks: u32,
    target: u32,
}

impl BrewCycle {
    pub fn new(target: u32) -> Self {
        Self { ticks: 0, target }
    }

    /// Account one timer firing. An open relief valve restarts the count.
    pub fn observe_tick(&mut self, valve_open: bool) {
        if valve_open {
            self.ticks = 0;
        }
        self.ticks += 1;
    }

    /// True once enough consecutive closed-valve ticks have elapsed.
    pub fn is_complete(&self) -> bool {
        self.ticks >= self.target
    }

    /// Ticks counted since the last valve-open observation (inclusive).
    pub fn ticks_counted(&self) -> u32 {
        self.ticks
    }
}

// ───────────────────────────────────────────────────────────────
// Background task
// ───────────────────────────────────────────────────────────────

/// Terminal state of one brew attempt.
enum Outcome {
    Completed,
    Aborted,
}

/// Spawn the brew task on its own thread. The caller has already won the
/// entry guard; if the thread cannot start, the guard is released so the
/// machine is not wedged.
pub(crate) fn spawn(shared: Arc<Shared>) {
    let task_shared = Arc::clone(&shared);
    let spawned = std::thread::Builder::new()
        .name("brew-cycle".into())
        .spawn(move || futures_lite::future::block_on(run(task_shared)));
    if let Err(e) = spawned {
        warn!("brew cycle thread failed to start: {}", e);
        shared.abort_brew();
    }
}

/// One brew attempt. Owns the ticker for its whole lifetime; every exit
/// path drops it and leaves the guard cleared.
async fn run(shared: Arc<Shared>) {
    let mut ticker = Ticker::every(Duration::from_millis(shared.config.brew_tick_interval_ms));
    let mut cycle = BrewCycle::new(shared.config.brew_ticks_to_complete);
    debug!(
        "brew cycle started: {} ticks of {} ms",
        shared.config.brew_ticks_to_complete, shared.config.brew_tick_interval_ms
    );

    let outcome = loop {
        if !shared.is_brewing() {
            break Outcome::Aborted;
        }
        if cycle.is_complete() {
            break Outcome::Completed;
        }
        // The task's only suspension point. Cancellation is not observed
        // until this wait finishes.
        ticker.next().await;
        cycle.observe_tick(shared.relief_valve_open());
    };

    match outcome {
        Outcome::Completed => {
            shared.finish_brew();
            info!("brew cycle complete: pot is full, boiler drained");
        }
        Outcome::Aborted => {
            // Whoever aborted already cleared the guard; re-clearing here
            // could stamp on a cycle started right after the abort.
            debug!(
                "brew cycle aborted after {} counted ticks",
                cycle.ticks_counted()
            );
        }
    }
}
