//! `AF_UNIX` `SOCK_DGRAM` transport, the daemon's local control interface.
//!
//! The client binds its own socket path so the daemon has an address to
//! reply to, then connects to the per-interface socket the daemon created.

// Receiving ancillary data needs `recvmsg(2)`, which tokio does not expose.
#![allow(unsafe_code)]

use super::{Datagram, Transport};
use crate::config::CtrlConfig;
use crate::error::{Result, WpaError};
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};
use tokio::io::Interest;
use tokio::net::UnixDatagram;
use tracing::{debug, warn};

/// Transport over a connected Unix datagram socket.
#[derive(Debug)]
pub struct UnixgramTransport {
    socket: UnixDatagram,
    /// Socket file we bound, removed again on close or drop.
    local: Option<PathBuf>,
}

impl UnixgramTransport {
    /// Bind `local` and connect to the daemon socket at `remote`.
    ///
    /// Must be called from within a tokio runtime. On failure the local
    /// socket file is removed again.
    pub fn connect(local: impl AsRef<Path>, remote: impl AsRef<Path>) -> Result<Self> {
        let local = local.as_ref();
        let remote = remote.as_ref();

        let socket = UnixDatagram::bind(local)
            .map_err(|e| WpaError::transport(e, format!("bind {}", local.display())))?;

        if let Err(e) = socket.connect(remote) {
            remove_socket_file(local);
            return Err(WpaError::transport(
                e,
                format!("connect {}", remote.display()),
            ));
        }

        debug!(
            "Control socket {} connected to {}",
            local.display(),
            remote.display()
        );

        Ok(Self {
            socket,
            local: Some(local.to_path_buf()),
        })
    }

    /// Wrap an already connected socket, e.g. one half of
    /// [`UnixDatagram::pair`].
    pub fn from_socket(socket: UnixDatagram) -> Self {
        Self {
            socket,
            local: None,
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        self.local.as_deref()
    }
}

#[async_trait::async_trait]
impl Transport for UnixgramTransport {
    async fn send(&self, data: &[u8]) -> io::Result<()> {
        self.socket.send(data).await.map(|_| ())
    }

    async fn recv(&self) -> io::Result<Datagram> {
        let mut data = vec![0u8; CtrlConfig::RECV_BUFFER_SIZE];
        let mut ancillary = vec![0u8; CtrlConfig::RECV_ANCILLARY_SIZE];
        let fd = self.socket.as_raw_fd();

        let received = self
            .socket
            .async_io(Interest::READABLE, || {
                recv_msg(fd, &mut data, &mut ancillary)
            })
            .await?;

        if received.truncated {
            warn!(
                "Datagram from wpa_supplicant truncated to {} bytes",
                received.len
            );
        }

        data.truncate(received.len);
        ancillary.truncate(received.ancillary_len);
        Ok(Datagram { data, ancillary })
    }

    fn close(&self) -> io::Result<()> {
        let shutdown = self.socket.shutdown(std::net::Shutdown::Both);
        if let Some(local) = &self.local {
            remove_socket_file(local);
        }
        match shutdown {
            // Already disconnected peers are not an error at close time.
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

impl Drop for UnixgramTransport {
    fn drop(&mut self) {
        if let Some(local) = &self.local {
            remove_socket_file(local);
        }
    }
}

/// Pick an unused path for the client's local socket.
///
/// The name follows the `wpa_<iface>_XXXXXX` convention in the system temp
/// directory. The placeholder file is deleted before returning so the path
/// can be bound.
pub fn allocate_local_path(iface: &str) -> io::Result<PathBuf> {
    let placeholder = tempfile::Builder::new()
        .prefix(&format!("{}{}_", CtrlConfig::LOCAL_SOCKET_PREFIX, iface))
        .tempfile()?;
    let path = placeholder.path().to_path_buf();
    placeholder.close()?;
    Ok(path)
}

fn remove_socket_file(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            warn!("Failed to remove socket file {}: {}", path.display(), e);
        }
    }
}

struct Received {
    len: usize,
    ancillary_len: usize,
    truncated: bool,
}

/// Non-blocking `recvmsg` into `data`, collecting control messages into
/// `ancillary`.
fn recv_msg(fd: RawFd, data: &mut [u8], ancillary: &mut [u8]) -> io::Result<Received> {
    let mut iov = libc::iovec {
        iov_base: data.as_mut_ptr().cast(),
        iov_len: data.len(),
    };

    // SAFETY: msghdr is a plain C struct; all-zero is a valid (empty) value.
    let mut hdr: libc::msghdr = unsafe { std::mem::zeroed() };
    hdr.msg_iov = &mut iov;
    hdr.msg_iovlen = 1;
    hdr.msg_control = ancillary.as_mut_ptr().cast();
    hdr.msg_controllen = ancillary.len() as _;

    // SAFETY: `hdr` points at `iov`, `data` and `ancillary`, which all outlive
    // the call, and every length matches its buffer.
    let n = unsafe { libc::recvmsg(fd, &mut hdr, 0) };
    if n < 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(Received {
        len: n as usize,
        ancillary_len: (hdr.msg_controllen as usize).min(ancillary.len()),
        truncated: hdr.msg_flags & libc::MSG_TRUNC != 0,
    })
}
