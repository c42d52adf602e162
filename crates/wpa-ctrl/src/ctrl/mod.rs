//! Demultiplexing and correlation engine.
//!
//! # Architecture
//!
//! ```text
//!                   ┌──────────── solicited (cap 1) ───────────► Correlator ◄── callers
//! Transport ─► read_loop                                              │
//!     ▲             └── unsolicited ─► publish_loop ─► event queue    │
//!     └───────────────────────────── write (under lock) ──────────────┘
//! ```
//!
//! - **read_loop**: owns every receive, routes by priority bracket
//! - **publish_loop**: decodes events and offers them with a short timeout
//! - **Correlator**: one command in flight, one reply per command
//!
//! Both loops stop when the engine's cancellation token fires.

mod correlator;
mod demux;
mod publisher;

pub(crate) use correlator::expect_reply;

use crate::cancel::CancellationToken;
use crate::config::CtrlConfig;
use crate::error::Result;
use crate::models::WpaEvent;
use crate::transport::Transport;
use correlator::Correlator;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Sizing of the engine's externally visible event queue.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EngineOptions {
    pub event_capacity: usize,
    pub publish_grace: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            event_capacity: CtrlConfig::EVENT_QUEUE_CAPACITY,
            publish_grace: CtrlConfig::EVENT_PUBLISH_GRACE,
        }
    }
}

/// Running engine: the two background loops plus the command path.
pub(crate) struct CtrlEngine {
    transport: Arc<dyn Transport>,
    correlator: Correlator,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl CtrlEngine {
    /// Spawn the reader and publisher on the current runtime.
    ///
    /// Returns the engine and the receiving end of the event queue.
    pub(crate) fn start(
        transport: Arc<dyn Transport>,
        options: EngineOptions,
        cancel: CancellationToken,
    ) -> (Self, mpsc::Receiver<WpaEvent>) {
        let (solicited_tx, solicited_rx) = mpsc::channel(CtrlConfig::SOLICITED_QUEUE_CAPACITY);
        let (unsolicited_tx, unsolicited_rx) =
            mpsc::channel(CtrlConfig::UNSOLICITED_QUEUE_CAPACITY);
        let (events_tx, events_rx) = mpsc::channel(options.event_capacity);

        let reader = tokio::spawn(demux::read_loop(
            transport.clone(),
            solicited_tx,
            unsolicited_tx,
            cancel.clone(),
        ));
        let publisher = tokio::spawn(publisher::publish_loop(
            unsolicited_rx,
            events_tx,
            options.publish_grace,
            cancel.clone(),
        ));

        debug!(
            "Control engine started (event queue {}, grace {:?})",
            options.event_capacity, options.publish_grace
        );

        let engine = Self {
            correlator: Correlator::new(transport.clone(), solicited_rx, cancel.clone()),
            transport,
            cancel,
            tasks: vec![reader, publisher],
        };
        (engine, events_rx)
    }

    pub(crate) async fn execute(&self, command: &str, verb: &str) -> Result<Vec<u8>> {
        self.correlator.execute(command, verb).await
    }

    pub(crate) async fn run_ok(&self, command: &str, verb: &str) -> Result<()> {
        self.correlator.run_ok(command, verb).await
    }

    /// Stop both loops and shut the transport down.
    pub(crate) fn shutdown(&self) -> io::Result<()> {
        self.cancel.cancel();
        self.transport.close()
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for CtrlEngine {
    fn drop(&mut self) {
        self.cancel.cancel();
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
