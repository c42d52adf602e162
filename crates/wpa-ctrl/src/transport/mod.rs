//! Byte-level datagram transport to the daemon.
//!
//! The engine talks to the daemon only through [`Transport`]. A single reader
//! calls [`Transport::recv`]; writes come from whichever caller currently
//! holds the command section. Implementations do no buffering or retrying of
//! their own.

mod unixgram;

pub use unixgram::{allocate_local_path, UnixgramTransport};

use std::io;

/// One received datagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Datagram {
    pub data: Vec<u8>,
    /// Raw control-message bytes delivered with the datagram, if any.
    pub ancillary: Vec<u8>,
}

impl Datagram {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ancillary: Vec::new(),
        }
    }
}

/// A duplex datagram channel to the daemon.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Send one datagram.
    async fn send(&self, data: &[u8]) -> io::Result<()>;

    /// Receive the next datagram. Only one receive is in flight at a time.
    async fn recv(&self) -> io::Result<Datagram>;

    /// Shut the channel down. Further sends and receives fail.
    fn close(&self) -> io::Result<()>;
}
