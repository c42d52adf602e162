//! `LIST_NETWORKS` decoder.

use super::table::{field, parse_flags, Header, FIELD_SEPARATOR};
use crate::error::ParseError;
use crate::models::ConfiguredNetwork;

/// Decode a `LIST_NETWORKS` reply.
///
/// Strict: the first body line with fewer fields than the header has columns
/// aborts the whole decode, and no partial list is returned. This differs
/// from [`parse_scan_results`](super::parse_scan_results), which skips bad
/// lines; callers should not rely on either policy being shared.
pub fn parse_list_networks(reply: &str) -> Result<Vec<ConfiguredNetwork>, ParseError> {
    let mut lines = reply.lines();
    let header = Header::parse(lines.next().ok_or_else(ParseError::empty)?);

    let id_col = header.position("network id");
    let ssid_col = header.position("ssid");
    let bssid_col = header.position("bssid");
    let flags_col = header.position("flags");

    lines
        .map(|line| {
            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            if fields.len() < header.len() {
                return Err(ParseError::new(line));
            }

            Ok(ConfiguredNetwork {
                network_id: field(&fields, id_col).to_string(),
                ssid: field(&fields, ssid_col).to_string(),
                bssid: field(&fields, bssid_col).to_string(),
                flags: flags_col
                    .map(|c| parse_flags(field(&fields, Some(c))))
                    .unwrap_or_default(),
            })
        })
        .collect()
}
