use serde::Serialize;
use std::collections::HashMap;

/// One unsolicited line pushed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WpaEvent {
    /// Tag with the `CTRL-EVENT-` prefix removed, or `MESSAGE` for lines
    /// that carry no control tag.
    pub event: String,
    /// `key=value` tokens of a tagged line. `None` for `MESSAGE` events.
    pub arguments: Option<HashMap<String, String>>,
    /// The line exactly as received, priority bracket excluded.
    pub line: String,
}

impl WpaEvent {
    /// Tag used for lines without a recognizable control prefix.
    pub const MESSAGE: &'static str = "MESSAGE";

    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments
            .as_ref()
            .and_then(|args| args.get(key))
            .map(String::as_str)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.event == tag
    }
}
