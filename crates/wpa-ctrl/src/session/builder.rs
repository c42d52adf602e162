//! Builder for configuring a [`WpaSession`] connection.

use super::WpaSession;
use crate::cancel::CancellationToken;
use crate::config::CtrlConfig;
use crate::ctrl::EngineOptions;
use crate::error::{Result, WpaError};
use crate::transport::{allocate_local_path, Transport, UnixgramTransport};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builder for connecting to a wpa_supplicant control socket.
///
/// # Example
///
/// ```rust,ignore
/// use wpa_ctrl::WpaSession;
///
/// let session = WpaSession::builder("wlan0")
///     .ctrl_dir("/var/run/wpa_supplicant")
///     .event_capacity(64)
///     .connect()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    iface: String,
    ctrl_dir: PathBuf,
    local_path: Option<PathBuf>,
    remote_path: Option<PathBuf>,
    event_capacity: usize,
    publish_grace: Duration,
    cancel: Option<CancellationToken>,
    attach: bool,
}

impl SessionBuilder {
    /// Create a builder for the control socket of `iface`.
    pub fn new(iface: impl Into<String>) -> Self {
        Self {
            iface: iface.into(),
            ctrl_dir: PathBuf::from(CtrlConfig::DEFAULT_CTRL_DIR),
            local_path: None,
            remote_path: None,
            event_capacity: CtrlConfig::EVENT_QUEUE_CAPACITY,
            publish_grace: CtrlConfig::EVENT_PUBLISH_GRACE,
            cancel: None,
            attach: true,
        }
    }

    /// Directory holding the daemon's per-interface sockets.
    ///
    /// Default: `/run/wpa_supplicant`
    pub fn ctrl_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ctrl_dir = dir.into();
        self
    }

    /// Bind the client socket at this path instead of a fresh temporary one.
    pub fn local_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_path = Some(path.into());
        self
    }

    /// Connect to this daemon socket instead of `<ctrl_dir>/<iface>`.
    pub fn remote_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.remote_path = Some(path.into());
        self
    }

    /// Capacity of the event queue returned by [`WpaSession::take_events`].
    ///
    /// Default: 16
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// How long an event may wait for queue space before it is dropped.
    ///
    /// Default: 1ms
    pub fn publish_grace(mut self, grace: Duration) -> Self {
        self.publish_grace = grace;
        self
    }

    /// Stop this session when `token` is cancelled.
    ///
    /// The session runs on a child token, so closing the session does not
    /// cancel `token`.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Send `ATTACH` after connecting so the daemon starts pushing events.
    ///
    /// Default: `true`
    pub fn attach(mut self, enable: bool) -> Self {
        self.attach = enable;
        self
    }

    pub(crate) fn engine_options(&self) -> Result<EngineOptions> {
        if self.event_capacity == 0 {
            return Err(WpaError::Config {
                message: "event queue capacity must be at least 1".to_string(),
            });
        }
        Ok(EngineOptions {
            event_capacity: self.event_capacity,
            publish_grace: self.publish_grace,
        })
    }

    /// Connect over the daemon's Unix datagram socket.
    pub async fn connect(self) -> Result<WpaSession> {
        let options = self.engine_options()?;

        let remote = self
            .remote_path
            .clone()
            .unwrap_or_else(|| self.ctrl_dir.join(&self.iface));
        let local = match &self.local_path {
            Some(path) => path.clone(),
            None => allocate_local_path(&self.iface)
                .map_err(|e| WpaError::transport(e, "allocate local socket path"))?,
        };

        let transport = UnixgramTransport::connect(&local, &remote)?;
        info!("Connected to wpa_supplicant at {}", remote.display());

        self.start(Arc::new(transport), options).await
    }

    /// Run a session over an already established transport.
    pub async fn with_transport(self, transport: Arc<dyn Transport>) -> Result<WpaSession> {
        let options = self.engine_options()?;
        self.start(transport, options).await
    }

    async fn start(self, transport: Arc<dyn Transport>, options: EngineOptions) -> Result<WpaSession> {
        let cancel = self.cancel.unwrap_or_default().child_token();
        let session = WpaSession::start(transport, options, cancel);

        if self.attach {
            if let Err(e) = session.attach().await {
                session.shutdown();
                return Err(e);
            }
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = SessionBuilder::new("wlan0");
        assert_eq!(builder.ctrl_dir, PathBuf::from("/run/wpa_supplicant"));
        assert!(builder.attach);
        assert!(builder.local_path.is_none());

        let options = builder.engine_options().unwrap();
        assert_eq!(options.event_capacity, CtrlConfig::EVENT_QUEUE_CAPACITY);
        assert_eq!(options.publish_grace, CtrlConfig::EVENT_PUBLISH_GRACE);
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = SessionBuilder::new("wlan0").event_capacity(0).engine_options();
        assert!(matches!(result, Err(WpaError::Config { .. })));
    }

    #[tokio::test]
    async fn test_connect_missing_daemon_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = SessionBuilder::new("wlan9")
            .ctrl_dir(dir.path())
            .local_path(dir.path().join("client"))
            .connect()
            .await;

        assert!(matches!(result, Err(WpaError::Transport { .. })));
        assert!(!dir.path().join("client").exists());
    }
}
