//! Drives a [`LifecycleAdapter`] the way a container would, with an in-memory socket.
//!
//! Logs everything down to `TRACE`, including the adapter's per-callback events.

use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::Request as HttpRequest;
use micro_ws::{CloseCode, CloseFrame, DataFrame, HandshakeRequest, Payload, RawSocket, SocketError, SocketId, WebSocketApplication};
use micro_ws_adapter::{AdapterConfig, BoxError, CanonicalSocket, LifecycleAdapter, Request, Response, WebSocketProcessor};
use tokio::sync::mpsc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// A socket whose outgoing messages land in a channel.
#[derive(Debug)]
struct ChannelSocket {
    id: SocketId,
    handshake: HandshakeRequest,
    outgoing: mpsc::UnboundedSender<Payload>,
}

#[async_trait]
impl RawSocket for ChannelSocket {
    fn id(&self) -> SocketId {
        self.id
    }

    fn handshake(&self) -> Option<&HandshakeRequest> {
        Some(&self.handshake)
    }

    async fn send(&self, payload: Payload) -> Result<(), SocketError> {
        self.outgoing.send(payload).map_err(|_closed| SocketError::closed(self.id))
    }

    async fn close(&self, frame: CloseFrame) -> Result<(), SocketError> {
        info!(socket = %self.id, code = %frame.code(), "container closing socket");
        Ok(())
    }
}

/// Echoes text back with a prefix and binary back unchanged.
#[derive(Debug)]
struct EchoProcessor;

#[async_trait]
impl WebSocketProcessor for EchoProcessor {
    async fn open(&self, socket: &Arc<CanonicalSocket>, request: &Request, response: &Response) -> Result<(), BoxError> {
        info!(
            socket = %socket.id(),
            servlet_path = request.servlet_path(),
            path_info = ?request.path_info(),
            content_type = %response.content_type(),
            "open"
        );
        Ok(())
    }

    async fn handle_incoming(&self, socket: &Arc<CanonicalSocket>, payload: Payload) -> Result<(), BoxError> {
        match payload {
            Payload::Text(text) => socket.send_text(format!("echo: {text}")).await?,
            Payload::Binary(bytes) => socket.send_binary(bytes).await?,
        }
        Ok(())
    }

    async fn close(&self, socket: &Arc<CanonicalSocket>, code: CloseCode) -> Result<(), BoxError> {
        info!(socket = %socket.id(), %code, "close");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let adapter = LifecycleAdapter::builder().config(AdapterConfig::new("/app")).processor(EchoProcessor).build()?;

    // the container reports no path info for this request, the adapter recomputes it
    let handshake = HandshakeRequest::from(HttpRequest::get("/app/ws/room1").body(())?)
        .with_context_path("/app")
        .with_servlet_path("/ws");

    if !adapter.is_application_request(&handshake) {
        return Err("request is not for this application".into());
    }

    let (outgoing, mut received) = mpsc::unbounded_channel();
    let socket: Arc<dyn RawSocket> = Arc::new(ChannelSocket { id: SocketId::next(), handshake, outgoing });

    adapter.on_connect(Arc::clone(&socket)).await;
    adapter.on_message(&socket, Payload::from("hello")).await?;
    adapter.on_message(&socket, Payload::from(Bytes::from_static(b"\x00\x01"))).await?;
    adapter.on_ping(&socket, Bytes::from_static(b"are you there")).await;
    adapter.on_fragment(&socket, DataFrame::new("partial", false)).await;
    adapter.on_close(&socket, CloseFrame::new(CloseCode::GOING_AWAY, "bye")).await?;

    // dropped after close, the session is gone
    adapter.on_message(&socket, Payload::from("too late")).await?;

    drop(socket);
    while let Ok(payload) = received.try_recv() {
        info!(?payload, "peer received");
    }

    Ok(())
}
