use serde::Serialize;

/// Subset of the `STATUS` key=value dump.
///
/// Sparse: a key the daemon did not report leaves its field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusResult {
    pub wpa_state: String,
    pub key_mgmt: String,
    pub ip_addr: String,
    pub ssid: String,
    pub address: String,
    pub bssid: String,
    pub freq: String,
}

impl StatusResult {
    pub fn is_connected(&self) -> bool {
        self.wpa_state == "COMPLETED"
    }
}
