use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::frame::{CloseFrame, DataFrame, Payload};
use crate::handshake::HandshakeRequest;
use crate::socket::RawSocket;

/// An application mounted on a websocket container.
///
/// The container asks every mounted application whether it owns an incoming upgrade request
/// and then drives the accepting application through the socket's lifetime. For a given
/// socket the container delivers callbacks one at a time, and `on_connect` always completes
/// before any other callback for that socket.
///
/// Only message and close delivery can fail. Everything else is the application's own
/// business and must not disturb the container's connection bookkeeping.
#[async_trait]
pub trait WebSocketApplication: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// Returns true if this application should handle the given upgrade request.
    fn is_application_request(&self, request: &HandshakeRequest) -> bool;

    /// Called once after the socket has been upgraded.
    async fn on_connect(&self, socket: Arc<dyn RawSocket>);

    /// Called for every complete text or binary message.
    async fn on_message(&self, socket: &Arc<dyn RawSocket>, payload: Payload) -> Result<(), Self::Error>;

    /// Called once when the peer or the container closes the socket.
    async fn on_close(&self, socket: &Arc<dyn RawSocket>, frame: CloseFrame) -> Result<(), Self::Error>;

    async fn on_ping(&self, socket: &Arc<dyn RawSocket>, data: Bytes);

    async fn on_pong(&self, socket: &Arc<dyn RawSocket>, data: Bytes);

    /// Called for each fragment of a fragmented message.
    async fn on_fragment(&self, socket: &Arc<dyn RawSocket>, frame: DataFrame);
}
