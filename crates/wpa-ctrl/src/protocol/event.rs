//! Unsolicited event line decoder.

use crate::models::WpaEvent;
use std::collections::HashMap;

/// Lines starting with this are control events with a tag.
const CONTROL_PREFIX: &str = "CTRL-";
/// Stripped from the first token to form the event tag.
const EVENT_PREFIX: &str = "CTRL-EVENT-";

/// Decode one unsolicited line (priority bracket already removed).
///
/// Total: every line becomes an event. Lines without a control prefix become
/// [`WpaEvent::MESSAGE`] events with no arguments. For tagged lines, each
/// further token with exactly one `=` becomes an argument; other tokens are
/// skipped.
pub fn decode_event(line: &str) -> WpaEvent {
    let mut tokens = line.split(' ');
    let first = tokens.next().unwrap_or_default();

    if !first.starts_with(CONTROL_PREFIX) {
        return WpaEvent {
            event: WpaEvent::MESSAGE.to_string(),
            arguments: None,
            line: line.to_string(),
        };
    }

    let arguments: HashMap<String, String> = tokens
        .filter_map(|token| {
            let mut kv = token.split('=');
            match (kv.next(), kv.next(), kv.next()) {
                (Some(key), Some(value), None) => Some((key.to_string(), value.to_string())),
                _ => None,
            }
        })
        .collect();

    WpaEvent {
        event: first
            .strip_prefix(EVENT_PREFIX)
            .unwrap_or(first)
            .to_string(),
        arguments: Some(arguments),
        line: line.to_string(),
    }
}
