//! Event publisher: decodes unsolicited lines and offers them to the
//! externally consumed event queue.
//!
//! Publishing never blocks for longer than the grace window. The reader that
//! feeds this loop also carries command replies, so a slow or absent consumer
//! loses events instead of stalling commands.

use super::demux::Message;
use crate::cancel::CancellationToken;
use crate::models::WpaEvent;
use crate::protocol::decode_event;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;
use tracing::{debug, trace, warn};

pub(crate) async fn publish_loop(
    mut unsolicited: mpsc::Receiver<Message>,
    events: mpsc::Sender<WpaEvent>,
    grace: Duration,
    cancel: CancellationToken,
) {
    let mut consumer_gone = false;

    loop {
        let message = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            message = unsolicited.recv() => match message {
                Some(message) => message,
                None => break,
            },
        };

        let Ok(data) = message.payload else {
            continue;
        };
        let line = String::from_utf8_lossy(&data);
        let event = decode_event(&line);
        trace!(priority = ?message.priority, event = %event.event, "Unsolicited event");

        match events.send_timeout(event, grace).await {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(event)) => {
                warn!("Event queue full, dropping {} event", event.event);
            }
            // Nobody holds the queue; keep draining so the reader never blocks.
            Err(SendTimeoutError::Closed(_)) => {
                if !consumer_gone {
                    debug!("Event receiver dropped, discarding further events");
                    consumer_gone = true;
                }
            }
        }
    }

    debug!("Event publisher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsolicited(line: &str) -> Message {
        Message {
            priority: Some(2),
            payload: Ok(line.as_bytes().to_vec()),
        }
    }

    #[tokio::test]
    async fn test_publishes_decoded_events_in_order() {
        let (tx, rx) = mpsc::channel(4);
        let (events_tx, mut events_rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(publish_loop(
            rx,
            events_tx,
            Duration::from_millis(50),
            cancel.clone(),
        ));

        tx.send(unsolicited("CTRL-EVENT-SCAN-STARTED ")).await.unwrap();
        tx.send(unsolicited("Trying to associate")).await.unwrap();

        assert_eq!(events_rx.recv().await.unwrap().event, "SCAN-STARTED");
        assert_eq!(events_rx.recv().await.unwrap().event, WpaEvent::MESSAGE);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_drops_events_when_consumer_is_slow() {
        let (tx, rx) = mpsc::channel(8);
        let (events_tx, mut events_rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(publish_loop(
            rx,
            events_tx,
            Duration::from_millis(1),
            cancel.clone(),
        ));

        for n in 0..5 {
            tx.send(unsolicited(&format!("CTRL-EVENT-N{n} "))).await.unwrap();
        }
        // Publisher must drain every line without waiting on the consumer.
        tokio::time::timeout(Duration::from_secs(1), async {
            while tx.capacity() < 8 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("publisher stalled on a full event queue");
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(events_rx.recv().await.unwrap().event, "N0");
        assert!(events_rx.try_recv().is_err());

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_keeps_draining_without_consumer() {
        let (tx, rx) = mpsc::channel(1);
        let (events_tx, events_rx) = mpsc::channel(1);
        drop(events_rx);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(publish_loop(
            rx,
            events_tx,
            Duration::from_millis(1),
            cancel.clone(),
        ));

        for _ in 0..10 {
            tokio::time::timeout(
                Duration::from_secs(1),
                tx.send(unsolicited("CTRL-EVENT-X ")),
            )
            .await
            .expect("publisher stopped draining")
            .unwrap();
        }

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_stops_when_unsolicited_path_closes() {
        let (tx, rx) = mpsc::channel(1);
        let (events_tx, _events_rx) = mpsc::channel(1);
        let task = tokio::spawn(publish_loop(
            rx,
            events_tx,
            Duration::from_millis(1),
            CancellationToken::new(),
        ));

        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("publisher should stop")
            .unwrap();
    }

    /// Log sink shared between the test and the subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_consumer_loss_is_logged_once() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (tx, rx) = mpsc::channel(8);
        let (events_tx, events_rx) = mpsc::channel(1);
        drop(events_rx);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(publish_loop(
            rx,
            events_tx,
            Duration::from_millis(1),
            cancel.clone(),
        ));

        for n in 0..4 {
            tx.send(unsolicited(&format!("CTRL-EVENT-N{n} "))).await.unwrap();
        }
        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("publisher should stop")
            .unwrap();

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.matches("Event receiver dropped").count(), 1, "{text}");
    }
}
