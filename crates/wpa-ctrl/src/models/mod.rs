//! Typed records decoded from wpa_supplicant replies and events.
//!
//! All records are value snapshots: they are produced fresh on every request
//! and hold no reference back to the session that produced them.

mod event;
mod mac;
mod network;
mod scan;
mod security;
mod status;

pub use event::WpaEvent;
pub use mac::{MacAddr, MacParseError};
pub use network::ConfiguredNetwork;
pub use scan::ScanResult;
pub use security::{Cipher, KeyMgmt, Security};
pub use status::StatusResult;
