use std::sync::Arc;

use async_trait::async_trait;
use micro_ws::{CloseCode, Payload};

use crate::error::BoxError;
use crate::request::{Request, Response};
use crate::socket::CanonicalSocket;

/// The container-agnostic consumer of websocket connections.
///
/// The adapter calls [`open`](WebSocketProcessor::open) once per socket, then
/// [`handle_incoming`](WebSocketProcessor::handle_incoming) for every message in the order the
/// container delivered them, and finally [`close`](WebSocketProcessor::close) once. `close` is
/// only called for sockets whose `open` succeeded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebSocketProcessor: Send + Sync {
    async fn open(&self, socket: &Arc<CanonicalSocket>, request: &Request, response: &Response) -> Result<(), BoxError>;

    async fn handle_incoming(&self, socket: &Arc<CanonicalSocket>, payload: Payload) -> Result<(), BoxError>;

    async fn close(&self, socket: &Arc<CanonicalSocket>, code: CloseCode) -> Result<(), BoxError>;
}
