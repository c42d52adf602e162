//! `STATUS` decoder.

use crate::models::StatusResult;

/// Decode a `STATUS` reply.
///
/// Never fails: unknown keys and lines that are not exactly one `key=value`
/// pair are ignored, leaving the corresponding field empty.
pub fn parse_status(reply: &str) -> StatusResult {
    let mut status = StatusResult::default();

    for line in reply.lines() {
        let mut parts = line.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };

        let slot = match key {
            "wpa_state" => &mut status.wpa_state,
            "key_mgmt" => &mut status.key_mgmt,
            "ip_address" => &mut status.ip_addr,
            "ssid" => &mut status.ssid,
            "address" => &mut status.address,
            "bssid" => &mut status.bssid,
            "freq" => &mut status.freq,
            _ => continue,
        };
        *slot = value.to_string();
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_sparse() {
        let status = parse_status("wpa_state=COMPLETED\nssid=Home\nunknown_key=ignored");
        assert_eq!(
            status,
            StatusResult {
                wpa_state: "COMPLETED".to_string(),
                ssid: "Home".to_string(),
                ..Default::default()
            }
        );
        assert!(status.is_connected());
    }

    #[test]
    fn test_parse_status_full() {
        let reply = "bssid=00:11:22:33:44:55\n\
                     freq=2412\n\
                     ssid=Home\n\
                     id=0\n\
                     mode=station\n\
                     pairwise_cipher=CCMP\n\
                     group_cipher=CCMP\n\
                     key_mgmt=WPA2-PSK\n\
                     wpa_state=COMPLETED\n\
                     ip_address=192.168.1.20\n\
                     address=aa:bb:cc:dd:ee:ff\n";

        let status = parse_status(reply);
        assert_eq!(status.bssid, "00:11:22:33:44:55");
        assert_eq!(status.freq, "2412");
        assert_eq!(status.key_mgmt, "WPA2-PSK");
        assert_eq!(status.ip_addr, "192.168.1.20");
        assert_eq!(status.address, "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_parse_status_ignores_malformed_lines() {
        let status = parse_status("wpa_state\nssid=a=b\n=\nwpa_state=SCANNING\n");
        assert_eq!(status.wpa_state, "SCANNING");
        assert_eq!(status.ssid, "");
    }

    #[test]
    fn test_parse_status_empty() {
        assert_eq!(parse_status(""), StatusResult::default());
    }
}
