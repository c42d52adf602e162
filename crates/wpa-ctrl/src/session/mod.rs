//! Session facade over a running control engine.
//!
//! A [`WpaSession`] owns one control socket connection. Every operation
//! renders a [`Command`], waits for its reply through the engine, and decodes
//! the reply into a typed result.

mod builder;

pub use builder::SessionBuilder;

use crate::cancel::CancellationToken;
use crate::config::REPLY_PONG;
use crate::ctrl::{expect_reply, CtrlEngine, EngineOptions};
use crate::error::{ParseError, Result};
use crate::models::{ConfiguredNetwork, ScanResult, StatusResult, WpaEvent};
use crate::protocol::{
    parse_list_networks, parse_scan_results, parse_status, Command, NetworkTarget, NetworkValue,
};
use crate::transport::Transport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Client session for one wpa_supplicant interface.
///
/// Commands may be issued from several tasks at once; they are written and
/// answered strictly one at a time.
pub struct WpaSession {
    engine: CtrlEngine,
    events: Option<mpsc::Receiver<WpaEvent>>,
    /// Whether the daemon accepted our `ATTACH` and has not seen a `DETACH`.
    attached: AtomicBool,
}

impl WpaSession {
    /// Create a builder for the control socket of `iface`.
    pub fn builder(iface: impl Into<String>) -> SessionBuilder {
        SessionBuilder::new(iface)
    }

    /// Connect to `<ctrl_dir>/<iface>` with default settings and attach for
    /// events.
    pub async fn connect(iface: impl Into<String>) -> Result<Self> {
        SessionBuilder::new(iface).connect().await
    }

    pub(crate) fn start(
        transport: Arc<dyn Transport>,
        options: EngineOptions,
        cancel: CancellationToken,
    ) -> Self {
        let (engine, events) = CtrlEngine::start(transport, options, cancel);
        Self {
            engine,
            events: Some(events),
            attached: AtomicBool::new(false),
        }
    }

    /// Take the event queue.
    ///
    /// Returns `None` after the first call. Events that arrive while the
    /// queue is full are dropped, so the receiver should be polled promptly.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<WpaEvent>> {
        self.events.take()
    }

    async fn execute(&self, command: &Command) -> Result<Vec<u8>> {
        self.engine.execute(&command.to_string(), command.verb()).await
    }

    async fn run_ok(&self, command: Command) -> Result<()> {
        self.engine
            .run_ok(&command.to_string(), command.verb())
            .await
    }

    /// Send an arbitrary command and return the raw reply text.
    pub async fn request(&self, raw: &str) -> Result<String> {
        let verb = raw.split_whitespace().next().unwrap_or_default();
        let reply = self.engine.execute(raw, verb).await?;
        Ok(String::from_utf8_lossy(&reply).into_owned())
    }

    pub async fn ping(&self) -> Result<()> {
        let reply = self.execute(&Command::Ping).await?;
        expect_reply(&reply, REPLY_PONG)
    }

    /// Ask the daemon to start pushing unsolicited events to this socket.
    pub async fn attach(&self) -> Result<()> {
        self.run_ok(Command::Attach).await?;
        self.attached.store(true, Ordering::SeqCst);
        Ok(())
    }

    pub async fn detach(&self) -> Result<()> {
        self.run_ok(Command::Detach).await?;
        self.attached.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Whether this session is currently attached for events.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// Create an empty network block and return its id.
    pub async fn add_network(&self) -> Result<u32> {
        let reply = self.execute(&Command::AddNetwork).await?;
        let text = String::from_utf8_lossy(&reply);
        text.trim_end_matches('\n')
            .parse::<u32>()
            .map_err(|e| ParseError::with_source(&*text, e).into())
    }

    pub async fn set_network(
        &self,
        id: u32,
        field: &str,
        value: impl Into<NetworkValue>,
    ) -> Result<()> {
        self.run_ok(Command::SetNetwork {
            id,
            field: field.to_string(),
            value: value.into(),
        })
        .await
    }

    /// Set a network field from a dynamically typed value.
    ///
    /// An unsupported value fails before anything is written to the socket.
    pub async fn set_network_json(
        &self,
        id: u32,
        field: &str,
        value: &serde_json::Value,
    ) -> Result<()> {
        let value = NetworkValue::from_json(field, value)?;
        self.set_network(id, field, value).await
    }

    pub async fn enable_network(&self, id: u32) -> Result<()> {
        self.run_ok(Command::EnableNetwork(NetworkTarget::Id(id)))
            .await
    }

    pub async fn enable_all_networks(&self) -> Result<()> {
        self.run_ok(Command::EnableNetwork(NetworkTarget::All)).await
    }

    /// Select `id` and disable every other configured network.
    pub async fn select_network(&self, id: u32) -> Result<()> {
        self.run_ok(Command::SelectNetwork(id)).await
    }

    pub async fn disable_network(&self, id: u32) -> Result<()> {
        self.run_ok(Command::DisableNetwork(NetworkTarget::Id(id)))
            .await
    }

    pub async fn remove_network(&self, id: u32) -> Result<()> {
        self.run_ok(Command::RemoveNetwork(NetworkTarget::Id(id)))
            .await
    }

    pub async fn remove_all_networks(&self) -> Result<()> {
        self.run_ok(Command::RemoveNetwork(NetworkTarget::All)).await
    }

    /// Persist the running configuration to the daemon's config file.
    pub async fn save_config(&self) -> Result<()> {
        self.run_ok(Command::SaveConfig).await
    }

    pub async fn reconfigure(&self) -> Result<()> {
        self.run_ok(Command::Reconfigure).await
    }

    pub async fn reassociate(&self) -> Result<()> {
        self.run_ok(Command::Reassociate).await
    }

    pub async fn reconnect(&self) -> Result<()> {
        self.run_ok(Command::Reconnect).await
    }

    /// Request a scan. Completion is reported by a `SCAN-RESULTS` event.
    pub async fn scan(&self) -> Result<()> {
        self.run_ok(Command::Scan).await
    }

    /// Fetch the current scan table.
    ///
    /// Malformed rows are skipped and reported alongside the rows that
    /// decoded. A failed request is reported as a single error and no rows.
    pub async fn scan_results(&self) -> (Vec<ScanResult>, Vec<ParseError>) {
        match self.execute(&Command::ScanResults).await {
            Ok(reply) => parse_scan_results(&String::from_utf8_lossy(&reply)),
            Err(e) => (Vec::new(), vec![ParseError::with_source("", e)]),
        }
    }

    pub async fn status(&self) -> Result<StatusResult> {
        let reply = self.execute(&Command::Status).await?;
        Ok(parse_status(&String::from_utf8_lossy(&reply)))
    }

    pub async fn list_networks(&self) -> Result<Vec<ConfiguredNetwork>> {
        let reply = self.execute(&Command::ListNetworks).await?;
        Ok(parse_list_networks(&String::from_utf8_lossy(&reply))?)
    }

    /// Whether the background loops have stopped.
    pub fn is_closed(&self) -> bool {
        self.engine.is_stopped()
    }

    /// Detach if attached, stop the engine, and release the socket.
    ///
    /// Cleanup runs even when `DETACH` fails; that failure is still returned.
    pub async fn close(self) -> Result<()> {
        let detached = if self.is_attached() && !self.engine.is_stopped() {
            self.detach().await
        } else {
            Ok(())
        };
        self.shutdown();
        debug!("Session closed");
        detached
    }

    fn shutdown(&self) {
        if let Err(e) = self.engine.shutdown() {
            warn!("Failed to close control socket: {}", e);
        }
    }
}
