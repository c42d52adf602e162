//! Control command rendering.
//!
//! [`Command`] renders to the exact text the daemon expects. Values for
//! `SET_NETWORK` are resolved into a [`NetworkValue`] before any bytes are
//! sent, so an unsupported value is rejected without touching the socket.

use crate::config::KEY_MGMT_FIELD;
use crate::error::{Result, WpaError};
use std::fmt;

/// Which configured network a command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkTarget {
    Id(u32),
    All,
}

impl fmt::Display for NetworkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkTarget::Id(id) => write!(f, "{}", id),
            NetworkTarget::All => f.write_str("all"),
        }
    }
}

impl From<u32> for NetworkTarget {
    fn from(id: u32) -> Self {
        NetworkTarget::Id(id)
    }
}

/// A `SET_NETWORK` value with its wire formatting already decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkValue {
    /// Written as decimal digits.
    Integer(i64),
    /// Written inside double quotes.
    Quoted(String),
    /// Written verbatim, e.g. `key_mgmt WPA-PSK`.
    Unquoted(String),
    /// Written as lowercase hex, used for SSIDs that are not valid text.
    Bytes(Vec<u8>),
}

impl NetworkValue {
    /// Resolve a text value for `field`: quoted, except for `key_mgmt`.
    pub fn text(field: &str, value: impl Into<String>) -> Self {
        if field == KEY_MGMT_FIELD {
            NetworkValue::Unquoted(value.into())
        } else {
            NetworkValue::Quoted(value.into())
        }
    }

    /// Resolve a dynamically typed value for `field`.
    ///
    /// Accepts integers, strings, and arrays of byte-sized integers. Anything
    /// else is an [`WpaError::UnsupportedValue`].
    pub fn from_json(field: &str, value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        let unsupported = |kind: &str| WpaError::UnsupportedValue {
            field: field.to_string(),
            kind: kind.to_string(),
        };

        match value {
            Value::String(s) => Ok(Self::text(field, s.as_str())),
            Value::Number(n) => n.as_i64().map(NetworkValue::Integer).ok_or_else(|| {
                unsupported(if n.is_f64() { "float" } else { "unsigned 64-bit integer" })
            }),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| unsupported("array of non-byte values"))
                })
                .collect::<Result<Vec<u8>>>()
                .map(NetworkValue::Bytes),
            Value::Null => Err(unsupported("null")),
            Value::Bool(_) => Err(unsupported("bool")),
            Value::Object(_) => Err(unsupported("object")),
        }
    }
}

impl fmt::Display for NetworkValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkValue::Integer(v) => write!(f, "{}", v),
            NetworkValue::Quoted(v) => write!(f, "\"{}\"", v),
            NetworkValue::Unquoted(v) => f.write_str(v),
            NetworkValue::Bytes(v) => f.write_str(&hex::encode(v)),
        }
    }
}

impl From<i64> for NetworkValue {
    fn from(v: i64) -> Self {
        NetworkValue::Integer(v)
    }
}

impl From<Vec<u8>> for NetworkValue {
    fn from(v: Vec<u8>) -> Self {
        NetworkValue::Bytes(v)
    }
}

impl From<&[u8]> for NetworkValue {
    fn from(v: &[u8]) -> Self {
        NetworkValue::Bytes(v.to_vec())
    }
}

/// A control command understood by wpa_supplicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Attach,
    Detach,
    AddNetwork,
    SetNetwork {
        id: u32,
        field: String,
        value: NetworkValue,
    },
    EnableNetwork(NetworkTarget),
    DisableNetwork(NetworkTarget),
    SelectNetwork(u32),
    RemoveNetwork(NetworkTarget),
    SaveConfig,
    Reconfigure,
    Reassociate,
    Reconnect,
    Scan,
    ScanResults,
    Status,
    ListNetworks,
}

impl Command {
    /// The command keyword, safe to log. Arguments are left out because
    /// `SET_NETWORK` may carry a passphrase.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Ping => "PING",
            Command::Attach => "ATTACH",
            Command::Detach => "DETACH",
            Command::AddNetwork => "ADD_NETWORK",
            Command::SetNetwork { .. } => "SET_NETWORK",
            Command::EnableNetwork(_) => "ENABLE_NETWORK",
            Command::DisableNetwork(_) => "DISABLE_NETWORK",
            Command::SelectNetwork(_) => "SELECT_NETWORK",
            Command::RemoveNetwork(_) => "REMOVE_NETWORK",
            Command::SaveConfig => "SAVE_CONFIG",
            Command::Reconfigure => "RECONFIGURE",
            Command::Reassociate => "REASSOCIATE",
            Command::Reconnect => "RECONNECT",
            Command::Scan => "SCAN",
            Command::ScanResults => "SCAN_RESULTS",
            Command::Status => "STATUS",
            Command::ListNetworks => "LIST_NETWORKS",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = self.verb();
        match self {
            Command::SetNetwork { id, field, value } => {
                write!(f, "{} {} {} {}", verb, id, field, value)
            }
            Command::EnableNetwork(target)
            | Command::DisableNetwork(target)
            | Command::RemoveNetwork(target) => write!(f, "{} {}", verb, target),
            Command::SelectNetwork(id) => write!(f, "{} {}", verb, id),
            _ => f.write_str(verb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(field: &str, value: NetworkValue) -> String {
        Command::SetNetwork {
            id: 0,
            field: field.to_string(),
            value,
        }
        .to_string()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::Ping.to_string(), "PING");
        assert_eq!(Command::ScanResults.to_string(), "SCAN_RESULTS");
        assert_eq!(Command::ListNetworks.to_string(), "LIST_NETWORKS");
        assert_eq!(Command::SaveConfig.to_string(), "SAVE_CONFIG");
    }

    #[test]
    fn test_targeted_commands() {
        assert_eq!(
            Command::EnableNetwork(NetworkTarget::Id(3)).to_string(),
            "ENABLE_NETWORK 3"
        );
        assert_eq!(
            Command::EnableNetwork(NetworkTarget::All).to_string(),
            "ENABLE_NETWORK all"
        );
        assert_eq!(
            Command::RemoveNetwork(NetworkTarget::All).to_string(),
            "REMOVE_NETWORK all"
        );
        assert_eq!(
            Command::DisableNetwork(12u32.into()).to_string(),
            "DISABLE_NETWORK 12"
        );
        assert_eq!(Command::SelectNetwork(1).to_string(), "SELECT_NETWORK 1");
    }

    #[test]
    fn test_set_network_string_is_quoted() {
        assert_eq!(
            set("ssid", NetworkValue::text("ssid", "Home")),
            "SET_NETWORK 0 ssid \"Home\""
        );
        assert_eq!(
            set("psk", NetworkValue::text("psk", "hunter22")),
            "SET_NETWORK 0 psk \"hunter22\""
        );
    }

    #[test]
    fn test_set_network_key_mgmt_is_unquoted() {
        assert_eq!(
            set("key_mgmt", NetworkValue::text("key_mgmt", "WPA-PSK")),
            "SET_NETWORK 0 key_mgmt WPA-PSK"
        );
    }

    #[test]
    fn test_set_network_integer() {
        assert_eq!(set("mode", 2i64.into()), "SET_NETWORK 0 mode 2");
        assert_eq!(set("priority", (-1i64).into()), "SET_NETWORK 0 priority -1");
    }

    #[test]
    fn test_set_network_bytes_are_lowercase_hex() {
        let ssid: &[u8] = &[0xe4, 0xb8, 0xad, 0x00, 0xff];
        let line = set("ssid", ssid.into());
        assert_eq!(line, "SET_NETWORK 0 ssid e4b8ad00ff");

        let encoded = line.rsplit(' ').next().unwrap();
        assert_eq!(encoded.len(), ssid.len() * 2);
    }

    #[test]
    fn test_from_json_resolves_types() {
        assert_eq!(
            NetworkValue::from_json("ssid", &json!("Home")).unwrap(),
            NetworkValue::Quoted("Home".to_string())
        );
        assert_eq!(
            NetworkValue::from_json("key_mgmt", &json!("NONE")).unwrap(),
            NetworkValue::Unquoted("NONE".to_string())
        );
        assert_eq!(
            NetworkValue::from_json("mode", &json!(2)).unwrap(),
            NetworkValue::Integer(2)
        );
        assert_eq!(
            NetworkValue::from_json("ssid", &json!([104, 105])).unwrap(),
            NetworkValue::Bytes(vec![104, 105])
        );
    }

    #[test]
    fn test_from_json_rejects_unsupported() {
        for value in [
            json!(true),
            json!(null),
            json!(1.5),
            json!({"a": 1}),
            json!([1, 256]),
            json!(["x"]),
        ] {
            match NetworkValue::from_json("ssid", &value) {
                Err(WpaError::UnsupportedValue { field, .. }) => assert_eq!(field, "ssid"),
                other => panic!("expected UnsupportedValue for {value}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_verb_hides_arguments() {
        let cmd = Command::SetNetwork {
            id: 4,
            field: "psk".to_string(),
            value: NetworkValue::text("psk", "secret"),
        };
        assert_eq!(cmd.verb(), "SET_NETWORK");
    }
}
