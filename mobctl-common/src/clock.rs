//! Time sources for the decision engine
//!
//! The engine's warm-up gate needs the elapsed time since the system
//! started. That dependency is injected through the [`TimeSource`] trait
//! rather than read from ambient global state, so simulated runs can drive
//! a tick counter and live runs can use the monotonic clock.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Simulation tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationTick(u64);

impl SimulationTick {
    /// Creates a new simulation tick
    pub fn new(tick: u64) -> Self {
        Self(tick)
    }

    /// Creates the initial tick (tick 0)
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the tick value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if this is the initial tick
    pub fn is_initial(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SimulationTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}

impl From<u64> for SimulationTick {
    fn from(tick: u64) -> Self {
        Self::new(tick)
    }
}

impl From<SimulationTick> for u64 {
    fn from(tick: SimulationTick) -> u64 {
        tick.0
    }
}

/// Source of elapsed time since system start.
///
/// Implementations must be cheap to query; the evaluator consults the
/// source on every measurement report.
pub trait TimeSource: Send + Sync {
    /// Elapsed time since this source started.
    fn elapsed(&self) -> Duration;
}

/// Tick-driven clock for simulated runs.
///
/// The tick counter is advanced externally (by the surrounding scheduler or
/// by a test); elapsed time is the tick count times the tick duration. The
/// counter is atomic so the clock can be shared read-only with the engine
/// while the driver advances it.
#[derive(Debug)]
pub struct SimulationClock {
    current_tick: AtomicU64,
    tick_duration_ms: u64,
}

impl SimulationClock {
    /// Default tick duration (100 ms, 10 ticks per second).
    pub const DEFAULT_TICK_DURATION_MS: u64 = 100;

    /// Creates a clock with a tick duration given in milliseconds.
    pub fn with_tick_millis(tick_duration_ms: u64) -> Self {
        Self {
            current_tick: AtomicU64::new(0),
            tick_duration_ms,
        }
    }

    /// Returns the current tick
    pub fn current_tick(&self) -> SimulationTick {
        SimulationTick::new(self.current_tick.load(Ordering::Relaxed))
    }

    /// Returns the configured tick duration
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_duration_ms)
    }

    /// Advances the clock by one tick
    pub fn tick(&self) {
        self.current_tick.fetch_add(1, Ordering::Relaxed);
    }

    /// Advances the clock by N ticks
    pub fn advance(&self, ticks: u64) {
        self.current_tick.fetch_add(ticks, Ordering::Relaxed);
    }

    /// Resets the clock to tick 0
    pub fn reset(&self) {
        self.current_tick.store(0, Ordering::Relaxed);
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::with_tick_millis(Self::DEFAULT_TICK_DURATION_MS)
    }
}

impl TimeSource for SimulationClock {
    fn elapsed(&self) -> Duration {
        let ticks = self.current_tick.load(Ordering::Relaxed);
        Duration::from_millis(self.tick_duration_ms.saturating_mul(ticks))
    }
}

/// Monotonic wall-clock source for live runs.
#[derive(Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    /// Creates a source anchored at the current instant.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
