//! Centralized configuration for the control-socket client.
//!
//! Constants describing the daemon's socket conventions and the sizing of the
//! engine's internal queues.

use std::time::Duration;

/// Control-interface configuration.
pub struct CtrlConfig;

impl CtrlConfig {
    /// Directory where wpa_supplicant creates one socket per interface.
    pub const DEFAULT_CTRL_DIR: &'static str = "/run/wpa_supplicant";
    /// Prefix for the client's temporary local socket name.
    pub const LOCAL_SOCKET_PREFIX: &'static str = "wpa_";

    /// Receive buffer per datagram. A full `SCAN_RESULTS` reply for a busy
    /// neighbourhood fits comfortably.
    pub const RECV_BUFFER_SIZE: usize = 8192;
    /// Ancillary (control message) buffer per datagram.
    pub const RECV_ANCILLARY_SIZE: usize = 256;

    /// Priority assigned to solicited replies, which carry no bracket.
    pub const DEFAULT_SOLICITED_PRIORITY: u8 = 2;
    /// Highest priority digit accepted in a `<N>` bracket.
    pub const MAX_PRIORITY: u8 = 4;

    /// Capacity of the solicited-reply path. One command is outstanding at a
    /// time, so one slot is enough.
    pub const SOLICITED_QUEUE_CAPACITY: usize = 1;
    /// Capacity of the unsolicited path between reader and publisher.
    pub const UNSOLICITED_QUEUE_CAPACITY: usize = 16;
    /// Default capacity of the externally consumed event queue.
    pub const EVENT_QUEUE_CAPACITY: usize = 16;
    /// How long the publisher waits for queue space before dropping an event.
    pub const EVENT_PUBLISH_GRACE: Duration = Duration::from_millis(1);
}

/// Literal reply to a successful simple command.
pub const REPLY_OK: &str = "OK\n";
/// Literal reply to `PING`.
pub const REPLY_PONG: &str = "PONG\n";
/// Network field whose string value is written without quotes.
pub const KEY_MGMT_FIELD: &str = "key_mgmt";
