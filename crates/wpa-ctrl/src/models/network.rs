use serde::Serialize;

/// A configured network, as listed by `LIST_NETWORKS`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfiguredNetwork {
    /// Daemon-assigned identifier, kept verbatim.
    pub network_id: String,
    pub ssid: String,
    /// Either a hardware address or the daemon's wildcard token (`any`).
    pub bssid: String,
    pub flags: Vec<String>,
}

impl ConfiguredNetwork {
    /// Whether the daemon marks this network as the one in use.
    pub fn is_current(&self) -> bool {
        self.flags.iter().any(|f| f == "CURRENT")
    }

    pub fn is_disabled(&self) -> bool {
        self.flags.iter().any(|f| f == "DISABLED")
    }
}
