//! wpa_supplicant control-protocol text formats.
//!
//! Everything here is pure: commands are rendered to the exact wire text, and
//! replies and unsolicited lines are decoded from text already taken off the
//! socket.
//!
//! ```text
//! command  -> "SET_NETWORK 0 ssid \"home\""
//! reply    -> "OK\n" | "<id>\n" | tabular block | key=value block
//! event    -> "<3>CTRL-EVENT-CONNECTED - Connection to aa:bb:.. completed"
//! ```

pub mod command;
pub mod event;
pub mod networks;
pub mod scan;
pub mod status;
mod table;

pub use command::{Command, NetworkTarget, NetworkValue};
pub use event::decode_event;
pub use networks::parse_list_networks;
pub use scan::parse_scan_results;
pub use status::parse_status;
