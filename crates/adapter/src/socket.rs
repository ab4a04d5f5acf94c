use std::hash::{Hash, Hasher};
use std::sync::Arc;

use bytes::Bytes;
use micro_ws::{CloseCode, CloseFrame, HandshakeRequest, Payload, RawSocket, SocketId};

use crate::error::AdapterError;

/// The processor-facing handle of one websocket connection.
///
/// Wraps the container's [`RawSocket`] behind a stable identity. The wrapper only shares the
/// raw handle; the container keeps ownership of it, and dropping the wrapper neither closes
/// nor otherwise touches the underlying connection.
#[derive(Debug)]
pub struct CanonicalSocket {
    id: SocketId,
    raw: Arc<dyn RawSocket>,
}

impl CanonicalSocket {
    pub fn new(raw: Arc<dyn RawSocket>) -> Self {
        Self { id: raw.id(), raw }
    }

    #[inline]
    pub fn id(&self) -> SocketId {
        self.id
    }

    /// Returns the handshake request the raw socket retained, if any.
    pub fn handshake(&self) -> Option<&HandshakeRequest> {
        self.raw.handshake()
    }

    /// Returns true if this wrapper was created for `raw`.
    pub fn wraps(&self, raw: &dyn RawSocket) -> bool {
        self.id == raw.id()
    }

    pub async fn send_text(&self, text: impl Into<String> + Send) -> Result<(), AdapterError> {
        self.send(Payload::Text(text.into())).await
    }

    pub async fn send_binary(&self, bytes: impl Into<Bytes> + Send) -> Result<(), AdapterError> {
        self.send(Payload::Binary(bytes.into())).await
    }

    pub async fn send(&self, payload: Payload) -> Result<(), AdapterError> {
        self.raw.send(payload).await?;
        Ok(())
    }

    /// Asks the container to close the connection with `code`.
    pub async fn close(&self, code: CloseCode) -> Result<(), AdapterError> {
        self.raw.close(CloseFrame::new(code, String::new())).await?;
        Ok(())
    }
}

impl PartialEq for CanonicalSocket {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CanonicalSocket {}

impl Hash for CanonicalSocket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
