//! Common types and utilities for mobctl
//!
//! This crate provides the shared identifier and quality types, error
//! definitions, logging setup, and time sources used across the mobctl
//! crates.

pub mod clock;
pub mod error;
pub mod logging;
pub mod types;

pub use clock::{MonotonicClock, SimulationClock, SimulationTick, TimeSource};
pub use error::Error;
pub use logging::{init_logging, init_logging_with_filter, LogLevel};
pub use types::*;
