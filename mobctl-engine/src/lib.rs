//! mobctl-engine - Mobility Controller Decision Engine
//!
//! This crate implements the decision core of a cellular mobility
//! controller: for each connected terminal it decides, report by report,
//! whether the terminal should be handed over from its serving cell to a
//! better-performing neighbour.
//!
//! Candidates are ranked on a weighted blend of three signals: the
//! reported radio quality (RSRQ), an experience score (QoE, MOS scale)
//! and a delivery-quality score (QoS, packet delivery ratio). A set of
//! guards (warm-up, unknown terminal, already-satisfied terminal) keeps
//! the engine from disturbing terminals prematurely.
//!
//! # Architecture
//!
//! ```text
//!  radio layer          telemetry            lifecycle layer
//!       │                   │                      │
//!       ▼                   ▼                      ▼
//!  MeasurementReport   QualityUpdate      ServingCellUpdate/Release
//!       └───────────────────┴──────────────────────┘
//!                           │
//!                     MobilityTask
//!                           │
//!                    MobilityEngine
//!                    ┌──────┴───────┐
//!             MeasurementStore  DecisionEvaluator
//!                           │
//!                           ▼
//!                    HandoverTrigger (control plane)
//! ```
//!
//! The engine can be driven directly through [`MobilityEngine`] for
//! synchronous embedders, or spawned as an async actor through
//! [`MobilityTask`] with a typed mailbox.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mobctl_common::MonotonicClock;
//! use mobctl_engine::{
//!     load_and_validate_mobility_config, MobilityTask, RecordingTrigger,
//!     spawn_mobility_task, DEFAULT_CHANNEL_CAPACITY,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mobctl_common::Error> {
//!     let config = load_and_validate_mobility_config("config/mobility.yaml")?;
//!     let trigger = Arc::new(RecordingTrigger::new());
//!     let clock = Arc::new(MonotonicClock::new());
//!     let task = MobilityTask::new(config, trigger, clock);
//!     let (handle, join) = spawn_mobility_task(task, DEFAULT_CHANNEL_CAPACITY);
//!
//!     // Feed reports and telemetry through `handle`...
//!     // handle.shutdown().await.unwrap();
//!     // join.await.unwrap();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod evaluator;
pub mod filter;
pub mod provider;
pub mod store;
pub mod task;

// Re-export configuration types
pub use config::{
    load_and_validate_mobility_config, load_mobility_config, load_mobility_config_from_str,
    validate_mobility_config, ConfigError, ConfigValidationError, MobilityConfig,
};

// Re-export engine types
pub use engine::{
    HandoverTrigger, MeasuredNeighbour, MeasurementReport, MobilityEngine, RecordingTrigger,
};

// Re-export evaluator types
pub use evaluator::{CandidateCell, DecisionEvaluator, HandoverDecision};

// Re-export measurement and quality types
pub use filter::{AcceptAllNeighbours, NeighbourFilter};
pub use provider::{InMemoryQualityProvider, QualitySampleProvider};
pub use store::{MeasurementStore, NeighbourMeasurement};

// Re-export task types
pub use task::{
    spawn_mobility_task, MobilityMessage, MobilityTask, Task, TaskHandle, TaskMessage,
    DEFAULT_CHANNEL_CAPACITY,
};
