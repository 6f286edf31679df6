//! Mobility Task
//!
//! Runs the [`MobilityEngine`] as an async actor behind a typed message
//! channel. The surrounding radio-control, telemetry and connection
//! lifecycle layers all feed the engine through the same mailbox, which
//! preserves the process-one-report-to-completion discipline without any
//! locking around the engine itself.

use std::sync::Arc;

use mobctl_common::{CellId, QualitySample, TerminalId, TimeSource};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::MobilityConfig;
use crate::engine::{HandoverTrigger, MeasurementReport, MobilityEngine};
use crate::filter::NeighbourFilter;
use crate::provider::InMemoryQualityProvider;

/// Default channel capacity for the mobility task mailbox.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Task message envelope wrapping typed messages with control signals.
#[derive(Debug)]
pub enum TaskMessage<T> {
    /// Regular message payload
    Message(T),
    /// Shutdown signal, the task should terminate gracefully
    Shutdown,
}

impl<T> TaskMessage<T> {
    /// Creates a new message envelope containing the given payload.
    pub fn message(msg: T) -> Self {
        TaskMessage::Message(msg)
    }

    /// Creates a shutdown signal.
    pub fn shutdown() -> Self {
        TaskMessage::Shutdown
    }

    /// Returns true if this is a shutdown signal.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, TaskMessage::Shutdown)
    }

    /// Returns the message payload if present, or None for shutdown.
    pub fn into_message(self) -> Option<T> {
        match self {
            TaskMessage::Message(msg) => Some(msg),
            TaskMessage::Shutdown => None,
        }
    }
}

/// Base trait for message-driven async tasks.
#[async_trait::async_trait]
pub trait Task: Send + 'static {
    /// The message type this task processes.
    type Message: Send;

    /// Runs the task's main loop, processing messages until shutdown.
    async fn run(&mut self, rx: mpsc::Receiver<TaskMessage<Self::Message>>);
}

/// Messages for the mobility task.
#[derive(Debug)]
pub enum MobilityMessage {
    /// Decoded measurement report from the radio layer
    Report(MeasurementReport),
    /// Serving-cell association update from the connection lifecycle layer
    ServingCellUpdate {
        /// The terminal whose association changed
        terminal: TerminalId,
        /// The new serving cell, [`CellId::NONE`] to clear
        cell: CellId,
    },
    /// Fresh terminal-scoped quality sample from the telemetry pipeline
    TerminalQualityUpdate {
        /// The sampled terminal
        terminal: TerminalId,
        /// The new sample
        sample: QualitySample,
    },
    /// Fresh cell-scoped aggregate quality sample from the telemetry
    /// pipeline
    CellQualityUpdate {
        /// The sampled cell
        cell: CellId,
        /// The new sample
        sample: QualitySample,
    },
    /// Terminal disconnected, release its tracked state
    TerminalReleased {
        /// The released terminal
        terminal: TerminalId,
    },
}

/// Handle for sending messages to a task.
#[derive(Debug)]
pub struct TaskHandle<T> {
    tx: mpsc::Sender<TaskMessage<T>>,
}

impl<T> Clone for TaskHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> TaskHandle<T> {
    /// Creates a new task handle from a sender.
    pub fn new(tx: mpsc::Sender<TaskMessage<T>>) -> Self {
        Self { tx }
    }

    /// Sends a message to the task.
    ///
    /// Returns an error if the task has been dropped.
    pub async fn send(&self, msg: T) -> Result<(), mpsc::error::SendError<TaskMessage<T>>> {
        self.tx.send(TaskMessage::Message(msg)).await
    }

    /// Sends a message to the task without waiting.
    ///
    /// Returns an error if the channel is full or the task has been dropped.
    pub fn try_send(&self, msg: T) -> Result<(), mpsc::error::TrySendError<TaskMessage<T>>> {
        self.tx.try_send(TaskMessage::Message(msg))
    }

    /// Sends a shutdown signal to the task.
    pub async fn shutdown(&self) -> Result<(), mpsc::error::SendError<TaskMessage<T>>> {
        self.tx.send(TaskMessage::Shutdown).await
    }

    /// Returns true if the task channel is closed.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The mobility engine wrapped as a message-driven task.
///
/// Owns the quality-sample cache so telemetry updates and decisions flow
/// through one mailbox and never race each other.
pub struct MobilityTask {
    engine: MobilityEngine,
    provider: Arc<InMemoryQualityProvider>,
}

impl MobilityTask {
    /// Creates a mobility task that admits every reported neighbour.
    pub fn new(
        config: MobilityConfig,
        trigger: Arc<dyn HandoverTrigger>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        let provider = Arc::new(InMemoryQualityProvider::new());
        let engine = MobilityEngine::new(config, provider.clone(), trigger, clock);
        Self { engine, provider }
    }

    /// Creates a mobility task with a custom neighbour admission filter.
    pub fn with_filter(
        config: MobilityConfig,
        filter: Box<dyn NeighbourFilter>,
        trigger: Arc<dyn HandoverTrigger>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        let provider = Arc::new(InMemoryQualityProvider::new());
        let engine =
            MobilityEngine::with_filter(config, filter, provider.clone(), trigger, clock);
        Self { engine, provider }
    }

    /// Returns the wrapped engine.
    pub fn engine(&self) -> &MobilityEngine {
        &self.engine
    }

    fn handle_message(&mut self, msg: MobilityMessage) {
        match msg {
            MobilityMessage::Report(report) => {
                self.engine.report_measurement(&report);
            }
            MobilityMessage::ServingCellUpdate { terminal, cell } => {
                self.engine.set_serving_cell(terminal, cell);
            }
            MobilityMessage::TerminalQualityUpdate { terminal, sample } => {
                self.provider.set_terminal_quality(terminal, sample);
            }
            MobilityMessage::CellQualityUpdate { cell, sample } => {
                self.provider.set_cell_quality(cell, sample);
            }
            MobilityMessage::TerminalReleased { terminal } => {
                self.engine.remove_terminal(terminal);
            }
        }
    }
}

#[async_trait::async_trait]
impl Task for MobilityTask {
    type Message = MobilityMessage;

    async fn run(&mut self, mut rx: mpsc::Receiver<TaskMessage<Self::Message>>) {
        info!("Mobility task started");

        loop {
            tokio::select! {
                Some(msg) = rx.recv() => {
                    match msg {
                        TaskMessage::Message(mobility_msg) => self.handle_message(mobility_msg),
                        TaskMessage::Shutdown => {
                            info!("Mobility task received shutdown signal");
                            break;
                        }
                    }
                }
                else => {
                    info!("Mobility task channel closed");
                    break;
                }
            }
        }

        info!(
            "Mobility task stopped with {} tracked terminal(s)",
            self.engine.store().terminal_count()
        );
    }
}

/// Spawns a mobility task onto the current runtime.
///
/// Returns the mailbox handle and the join handle of the spawned loop.
pub fn spawn_mobility_task(
    mut task: MobilityTask,
    channel_capacity: usize,
) -> (TaskHandle<MobilityMessage>, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(channel_capacity);
    let handle = TaskHandle::new(tx);
    let join = tokio::spawn(async move {
        task.run(rx).await;
    });
    (handle, join)
}
