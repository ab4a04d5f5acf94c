//! Raw socket handles owned by the container.
//!
//! A [`RawSocket`] is the container's view of one upgraded duplex channel. Applications only
//! ever borrow or share it: the container decides when it is created and when it goes away.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;

use crate::frame::{CloseFrame, Payload};
use crate::handshake::HandshakeRequest;

/// Identity of one physical websocket connection.
///
/// Ids are unique for the lifetime of the process, so they can key per-connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SocketId(u64);

static NEXT_SOCKET_ID: AtomicU64 = AtomicU64::new(1);

impl SocketId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        Self(NEXT_SOCKET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl From<u64> for SocketId {
    #[inline]
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for SocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ws-{}", self.0)
    }
}

/// A raw websocket connection handle.
///
/// Implemented by the container. Not every socket a container hands out retains the HTTP
/// upgrade request it was created from, so [`RawSocket::handshake`] is a capability check
/// rather than a guaranteed accessor.
#[async_trait]
pub trait RawSocket: Send + Sync + fmt::Debug {
    /// Returns the identity of this connection.
    fn id(&self) -> SocketId;

    /// Returns the upgrade request this socket was created from, if the socket kept it.
    fn handshake(&self) -> Option<&HandshakeRequest>;

    /// Writes one complete message to the peer.
    async fn send(&self, payload: Payload) -> Result<(), SocketError>;

    /// Starts the closing handshake with the given frame.
    async fn close(&self, frame: CloseFrame) -> Result<(), SocketError>;
}

#[derive(Error, Debug)]
pub enum SocketError {
    #[error("socket {id} is already closed")]
    Closed { id: SocketId },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SocketError {
    pub fn closed(id: SocketId) -> Self {
        Self::Closed { id }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_ids_are_distinct() {
        let first = SocketId::next();
        let second = SocketId::next();

        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(SocketId::from(42).to_string(), "ws-42");
    }

    #[test]
    fn closed_error_names_the_socket() {
        let error = SocketError::closed(SocketId::from(7));
        assert_eq!(error.to_string(), "socket ws-7 is already closed");
    }
}
