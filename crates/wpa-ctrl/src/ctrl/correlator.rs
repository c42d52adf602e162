//! Command correlator: the synchronous request path.
//!
//! The protocol carries no request identifier, so a reply is matched to its
//! command purely by order. The solicited-reply receiver lives inside the
//! command mutex: the only way to receive a reply is to hold the lock, and
//! the lock is held from the write until exactly one reply has been taken.
//! Two commands can therefore never be outstanding at once.
//!
//! A caller may stop waiting (timeout, `select!`, aborted task) after its
//! command was written. The reply it was owed is counted and discarded by the
//! next caller before that caller writes anything.

use super::demux::Message;
use crate::cancel::CancellationToken;
use crate::config::REPLY_OK;
use crate::error::{ParseError, Result, WpaError};
use crate::transport::Transport;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// Reply side of the command path, only reachable under the command lock.
struct ReplyPath {
    replies: mpsc::Receiver<Message>,
    /// Replies to written commands whose callers stopped waiting.
    owed: usize,
}

pub(crate) struct Correlator {
    transport: Arc<dyn Transport>,
    path: Mutex<ReplyPath>,
    cancel: CancellationToken,
}

impl Correlator {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        replies: mpsc::Receiver<Message>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            transport,
            path: Mutex::new(ReplyPath { replies, owed: 0 }),
            cancel,
        }
    }

    /// Write `command` and wait for its reply.
    ///
    /// `verb` is what gets logged; the full command text may contain secrets.
    /// Nothing is written once the engine has stopped.
    pub(crate) async fn execute(&self, command: &str, verb: &str) -> Result<Vec<u8>> {
        let mut path = self.path.lock().await;

        // The counter only drops after a reply is actually taken, so a caller
        // abandoned while draining leaves the debt for the next one.
        while path.owed > 0 {
            if self.cancel.is_cancelled() {
                return Err(WpaError::Closed);
            }
            path.replies.recv().await.ok_or(WpaError::Closed)?;
            path.owed -= 1;
            debug!("Discarded reply owed to an abandoned command");
        }

        if self.cancel.is_cancelled() {
            return Err(WpaError::Closed);
        }

        debug!("Sending {}", verb);
        self.transport
            .send(command.as_bytes())
            .await
            .map_err(|e| WpaError::transport(e, format!("send {}", verb)))?;

        path.owed += 1;
        let message = path.replies.recv().await.ok_or(WpaError::Closed)?;
        path.owed -= 1;
        drop(path);

        message
            .payload
            .map_err(|e| WpaError::transport(e, format!("reply to {}", verb)))
    }

    /// Like [`execute`](Self::execute), but the reply must be exactly `OK\n`.
    pub(crate) async fn run_ok(&self, command: &str, verb: &str) -> Result<()> {
        let reply = self.execute(command, verb).await?;
        expect_reply(&reply, REPLY_OK)
    }
}

/// Check a reply against a fixed literal, keeping the unexpected line.
pub(crate) fn expect_reply(reply: &[u8], expected: &str) -> Result<()> {
    if reply == expected.as_bytes() {
        Ok(())
    } else {
        Err(ParseError::new(String::from_utf8_lossy(reply)).into())
    }
}
