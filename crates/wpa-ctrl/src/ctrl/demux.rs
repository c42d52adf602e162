//! Reader loop: classifies every inbound datagram as a solicited reply or an
//! unsolicited event and routes it to the matching path.
//!
//! Classification is purely syntactic. Unsolicited lines start with a
//! `<N>` priority bracket (N in 0..=4); anything else is taken to be the reply
//! to the command currently in flight. A reply that happened to begin with
//! such a bracket would be misrouted; the daemon never produces one.

use crate::cancel::CancellationToken;
use crate::config::CtrlConfig;
use crate::transport::Transport;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Unit moved between the reader and the two consumer paths.
#[derive(Debug)]
pub(crate) struct Message {
    /// Priority from the `<N>` bracket, or the solicited default. `None` for
    /// read failures.
    pub priority: Option<u8>,
    pub payload: io::Result<Vec<u8>>,
}

impl Message {
    fn failed(err: io::Error) -> Self {
        Self {
            priority: None,
            payload: Err(err),
        }
    }
}

/// Which consumer path a datagram belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Solicited,
    Unsolicited,
}

/// Classify one datagram, stripping the priority bracket from unsolicited
/// lines.
pub(crate) fn classify(mut data: Vec<u8>) -> (Route, Message) {
    let priority = match data.as_slice() {
        [b'<', d, b'>', ..] if d.is_ascii_digit() && d - b'0' <= CtrlConfig::MAX_PRIORITY => {
            Some(d - b'0')
        }
        _ => None,
    };

    if let Some(priority) = priority {
        data.drain(..3);
        return (
            Route::Unsolicited,
            Message {
                priority: Some(priority),
                payload: Ok(data),
            },
        );
    }

    (
        Route::Solicited,
        Message {
            priority: Some(CtrlConfig::DEFAULT_SOLICITED_PRIORITY),
            payload: Ok(data),
        },
    )
}

/// Read datagrams until cancelled, routing each to its path.
///
/// Read errors go to the solicited path: the command caller is the one party
/// guaranteed to be waiting, so the error surfaces there instead of being
/// lost.
pub(crate) async fn read_loop(
    transport: Arc<dyn Transport>,
    solicited: mpsc::Sender<Message>,
    unsolicited: mpsc::Sender<Message>,
    cancel: CancellationToken,
) {
    loop {
        let received = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            received = transport.recv() => received,
        };

        let (route, message) = match received {
            Ok(datagram) => {
                trace!(
                    bytes = datagram.data.len(),
                    ancillary = datagram.ancillary.len(),
                    "Datagram received"
                );
                classify(datagram.data)
            }
            Err(e) => {
                warn!("Control socket read failed: {}", e);
                (Route::Solicited, Message::failed(e))
            }
        };

        let path = match route {
            Route::Solicited => &solicited,
            Route::Unsolicited => &unsolicited,
        };

        let delivered = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sent = path.send(message) => sent.is_ok(),
        };
        if !delivered {
            debug!("{:?} path closed, stopping reader", route);
            break;
        }
    }

    debug!("Control socket reader stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(message: Message) -> Vec<u8> {
        message.payload.unwrap()
    }

    #[test]
    fn test_classify_unsolicited_strips_bracket() {
        let (route, message) = classify(b"<3>CTRL-EVENT-CONNECTED - ok".to_vec());
        assert_eq!(route, Route::Unsolicited);
        assert_eq!(message.priority, Some(3));
        assert_eq!(payload(message), b"CTRL-EVENT-CONNECTED - ok");
    }

    #[test]
    fn test_classify_all_priority_digits() {
        for digit in 0..=4u8 {
            let data = vec![b'<', b'0' + digit, b'>', b'x'];
            let (route, message) = classify(data);
            assert_eq!(route, Route::Unsolicited);
            assert_eq!(message.priority, Some(digit));
        }
    }

    #[test]
    fn test_classify_out_of_range_digit_is_solicited() {
        let (route, message) = classify(b"<5>text".to_vec());
        assert_eq!(route, Route::Solicited);
        assert_eq!(message.priority, Some(2));
        assert_eq!(payload(message), b"<5>text");
    }

    #[test]
    fn test_classify_plain_reply_is_solicited_unstripped() {
        let (route, message) = classify(b"OK\n".to_vec());
        assert_eq!(route, Route::Solicited);
        assert_eq!(message.priority, Some(CtrlConfig::DEFAULT_SOLICITED_PRIORITY));
        assert_eq!(payload(message), b"OK\n");
    }

    #[test]
    fn test_classify_short_and_near_miss_inputs() {
        for data in [&b""[..], b"<", b"<3", b"<a>x", b"<3]x", b"3>x"] {
            let (route, _) = classify(data.to_vec());
            assert_eq!(route, Route::Solicited, "{:?}", data);
        }
    }

    #[test]
    fn test_classify_bare_bracket_is_empty_event() {
        let (route, message) = classify(b"<2>".to_vec());
        assert_eq!(route, Route::Unsolicited);
        assert!(payload(message).is_empty());
    }
}
