use super::{MacAddr, Security};
use serde::Serialize;

/// A BSS observed in the most recent completed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub bssid: MacAddr,
    pub ssid: String,
    /// Channel frequency in MHz.
    pub frequency: i32,
    /// Received signal strength in dB.
    pub rssi: i32,
    /// Capability flags exactly as the daemon prints them, e.g. `WPA2-PSK-CCMP`.
    pub flags: Vec<String>,
}

impl ScanResult {
    /// Key-management and cipher suites decoded from [`flags`](Self::flags).
    pub fn security(&self) -> Security {
        Security::from_flags(self.flags.as_slice())
    }
}
