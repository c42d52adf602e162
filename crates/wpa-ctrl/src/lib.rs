//! wpa-ctrl - Client for the wpa_supplicant control interface.
//!
//! Talks to a running wpa_supplicant over its per-interface Unix datagram
//! socket. Commands and their replies share the socket with unsolicited
//! events; a background reader separates the two, commands are answered one
//! at a time, and events are delivered on a bounded queue.
//!
//! # Example
//!
//! ```rust,ignore
//! use wpa_ctrl::WpaSession;
//!
//! #[tokio::main]
//! async fn main() -> wpa_ctrl::Result<()> {
//!     let mut session = WpaSession::connect("wlan0").await?;
//!     let mut events = session.take_events().expect("first take");
//!
//!     session.scan().await?;
//!     while let Some(event) = events.recv().await {
//!         if event.is("SCAN-RESULTS") {
//!             break;
//!         }
//!     }
//!
//!     let (results, errors) = session.scan_results().await;
//!     println!("{} networks, {} unreadable rows", results.len(), errors.len());
//!
//!     session.close().await
//! }
//! ```

#[cfg(not(unix))]
compile_error!("wpa-ctrl requires Unix datagram sockets");

pub mod cancel;
pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod transport;

mod ctrl;
mod session;

pub use cancel::CancellationToken;
pub use config::CtrlConfig;
pub use error::{ParseError, Result, WpaError};
pub use models::{
    Cipher, ConfiguredNetwork, KeyMgmt, MacAddr, MacParseError, ScanResult, Security, StatusResult,
    WpaEvent,
};
pub use protocol::{
    decode_event, parse_list_networks, parse_scan_results, parse_status, Command, NetworkTarget,
    NetworkValue,
};
pub use session::{SessionBuilder, WpaSession};
pub use transport::{Datagram, Transport, UnixgramTransport};
