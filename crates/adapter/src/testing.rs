use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::Request as HttpRequest;
use micro_ws::{CloseCode, CloseFrame, HandshakeRequest, Payload, RawSocket, SocketError, SocketId};

/// An in-memory [`RawSocket`] that records what was written to it.
#[derive(Debug)]
pub(crate) struct MemorySocket {
    id: SocketId,
    handshake: Option<HandshakeRequest>,
    sent: Mutex<Vec<Payload>>,
    closed: Mutex<Option<CloseFrame>>,
}

impl MemorySocket {
    /// A socket upgraded from `uri`, mounted under the `/app` context path.
    pub(crate) fn upgraded(uri: &str, servlet_path: &str, path_info: Option<&str>) -> Arc<Self> {
        let handshake = HandshakeRequest::from(HttpRequest::get(uri).body(()).unwrap())
            .with_context_path("/app")
            .with_servlet_path(servlet_path)
            .with_path_info(path_info.map(str::to_owned));
        Arc::new(Self::new(Some(handshake)))
    }

    /// A socket that did not keep its handshake request.
    pub(crate) fn detached() -> Arc<Self> {
        Arc::new(Self::new(None))
    }

    fn new(handshake: Option<HandshakeRequest>) -> Self {
        Self { id: SocketId::next(), handshake, sent: Mutex::new(vec![]), closed: Mutex::new(None) }
    }

    pub(crate) fn sent(&self) -> Vec<Payload> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn close_code(&self) -> Option<CloseCode> {
        self.closed.lock().unwrap().as_ref().map(CloseFrame::code)
    }
}

#[async_trait]
impl RawSocket for MemorySocket {
    fn id(&self) -> SocketId {
        self.id
    }

    fn handshake(&self) -> Option<&HandshakeRequest> {
        self.handshake.as_ref()
    }

    async fn send(&self, payload: Payload) -> Result<(), SocketError> {
        if self.closed.lock().unwrap().is_some() {
            return Err(SocketError::closed(self.id));
        }
        self.sent.lock().unwrap().push(payload);
        Ok(())
    }

    async fn close(&self, frame: CloseFrame) -> Result<(), SocketError> {
        *self.closed.lock().unwrap() = Some(frame);
        Ok(())
    }
}
