use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use micro_ws::{CloseCode, CloseFrame, DataFrame, HandshakeRequest, Payload, RawSocket, SocketId, WebSocketApplication};
use tokio::sync::RwLock;
use tracing::{Span, debug, info_span, trace, warn};

use crate::config::AdapterConfig;
use crate::error::{AdapterError, BuildError};
use crate::exchange::{DefaultExchangeBuilder, ExchangeBuilder};
use crate::filter::{ContextPathFilter, RequestFilter};
use crate::path;
use crate::processor::WebSocketProcessor;
use crate::request::{Request, Response};
use crate::socket::CanonicalSocket;

/// Everything the adapter keeps for one open socket.
#[derive(Debug)]
pub struct Session {
    socket: Arc<CanonicalSocket>,
    request: Request,
    response: Response,
}

impl Session {
    pub fn socket(&self) -> &Arc<CanonicalSocket> {
        &self.socket
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn response(&self) -> &Response {
        &self.response
    }
}

/// Bridges the container callbacks of [`WebSocketApplication`] to a [`WebSocketProcessor`].
///
/// Each socket moves through `unconnected -> open -> closed`. A socket is open once
/// [`on_connect`](WebSocketApplication::on_connect) built its request/response pair and the
/// processor accepted it; only open sockets have a [`Session`].
///
/// Setting a socket up never fails towards the container: any failure is logged and the
/// socket simply never gets a session, so its messages and its close are not forwarded.
/// Message and close delivery on the other hand return the processor's error to the caller.
pub struct LifecycleAdapter {
    filter: ContextPathFilter,
    processor: Box<dyn WebSocketProcessor>,
    exchange_builder: Box<dyn ExchangeBuilder>,
    sessions: RwLock<HashMap<SocketId, Slot>>,
    span: Span,
}

/// Registry entry of a socket the adapter has seen connect.
///
/// An entry lives from the first `on_connect` until `on_close`, whatever the outcome of the
/// setup, so the open transition runs at most once per socket.
#[derive(Debug)]
enum Slot {
    Opening,
    Open(Arc<Session>),
    Failed,
}

impl Slot {
    fn session(&self) -> Option<&Arc<Session>> {
        match self {
            Slot::Open(session) => Some(session),
            Slot::Opening | Slot::Failed => None,
        }
    }
}

impl LifecycleAdapter {
    pub fn builder() -> LifecycleAdapterBuilder {
        LifecycleAdapterBuilder::new()
    }

    pub fn context_path(&self) -> &str {
        self.filter.context_path()
    }

    /// Returns the session of `id` if the socket is open.
    pub async fn session(&self, id: SocketId) -> Option<Arc<Session>> {
        self.sessions.read().await.get(&id).and_then(Slot::session).map(Arc::clone)
    }

    pub async fn is_open(&self, id: SocketId) -> bool {
        self.sessions.read().await.get(&id).is_some_and(|slot| slot.session().is_some())
    }

    /// Returns the number of open sockets.
    pub async fn open_sockets(&self) -> usize {
        self.sessions.read().await.values().filter(|slot| slot.session().is_some()).count()
    }

    async fn open(&self, raw: Arc<dyn RawSocket>) -> Result<Session, AdapterError> {
        let socket = Arc::new(CanonicalSocket::new(raw));

        let handshake = socket.handshake().ok_or_else(|| AdapterError::unsupported_socket(socket.id()))?;

        let (mut request, response) = self.exchange_builder.build(handshake, &socket).map_err(AdapterError::build)?;

        // best effort, the request is left as built when the paths can't be corrected
        match path::normalize(&mut request) {
            Ok(outcome) => trace!(parent: &self.span, socket = %socket.id(), ?outcome, "normalize request path"),
            Err(e) => trace!(parent: &self.span, socket = %socket.id(), cause = %e, "skip request path normalization"),
        }

        self.processor.open(&socket, &request, &response).await.map_err(AdapterError::open)?;

        Ok(Session { socket, request, response })
    }
}

#[async_trait]
impl WebSocketApplication for LifecycleAdapter {
    type Error = AdapterError;

    fn is_application_request(&self, request: &HandshakeRequest) -> bool {
        self.filter.matches(request)
    }

    async fn on_connect(&self, socket: Arc<dyn RawSocket>) {
        let id = socket.id();
        {
            let mut sessions = self.sessions.write().await;
            if sessions.contains_key(&id) {
                warn!(parent: &self.span, socket = %id, "socket already connected, ignore connect");
                return;
            }
            sessions.insert(id, Slot::Opening);
        }

        let slot = match self.open(socket).await {
            Ok(session) => {
                debug!(parent: &self.span, socket = %id, "socket opened");
                Slot::Open(Arc::new(session))
            }
            Err(e) => {
                warn!(parent: &self.span, socket = %id, cause = %e, "failed to connect to web socket");
                Slot::Failed
            }
        };

        let closed = match self.sessions.write().await.get_mut(&id) {
            Some(entry) => {
                *entry = slot;
                None
            }
            None => slot.session().map(Arc::clone),
        };

        // the container closed the socket while it was being set up
        if let Some(session) = closed {
            debug!(parent: &self.span, socket = %id, "socket closed during setup");
            if let Err(e) = self.processor.close(session.socket(), CloseCode::NORMAL).await {
                warn!(parent: &self.span, socket = %id, cause = %e, "failed to close web socket");
            }
        }
    }

    async fn on_message(&self, socket: &Arc<dyn RawSocket>, payload: Payload) -> Result<(), AdapterError> {
        let id = socket.id();
        let Some(session) = self.session(id).await else {
            trace!(parent: &self.span, socket = %id, "no open session, drop message");
            return Ok(());
        };

        trace!(parent: &self.span, socket = %id, text = payload.is_text(), len = payload.len(), "on message");
        self.processor.handle_incoming(session.socket(), payload).await.map_err(AdapterError::processor)
    }

    async fn on_close(&self, socket: &Arc<dyn RawSocket>, frame: CloseFrame) -> Result<(), AdapterError> {
        let id = socket.id();
        trace!(parent: &self.span, socket = %id, code = %frame.code(), reason = frame.reason(), "on close");

        let slot = self.sessions.write().await.remove(&id);
        match slot {
            Some(Slot::Open(session)) => {
                debug!(parent: &self.span, socket = %id, "socket closed");
                self.processor.close(session.socket(), CloseCode::NORMAL).await.map_err(AdapterError::processor)
            }
            Some(Slot::Opening | Slot::Failed) | None => Ok(()),
        }
    }

    async fn on_ping(&self, socket: &Arc<dyn RawSocket>, data: Bytes) {
        trace!(parent: &self.span, socket = %socket.id(), len = data.len(), "on ping");
    }

    async fn on_pong(&self, socket: &Arc<dyn RawSocket>, data: Bytes) {
        trace!(parent: &self.span, socket = %socket.id(), len = data.len(), "on pong");
    }

    async fn on_fragment(&self, socket: &Arc<dyn RawSocket>, frame: DataFrame) {
        trace!(
            parent: &self.span,
            socket = %socket.id(),
            text = frame.payload().is_text(),
            last = frame.is_last(),
            "on fragment"
        );
    }
}

impl std::fmt::Debug for LifecycleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleAdapter").field("context_path", &self.context_path()).finish_non_exhaustive()
    }
}

pub struct LifecycleAdapterBuilder {
    config: AdapterConfig,
    processor: Option<Box<dyn WebSocketProcessor>>,
    exchange_builder: Option<Box<dyn ExchangeBuilder>>,
    span: Option<Span>,
}

impl LifecycleAdapterBuilder {
    fn new() -> Self {
        Self { config: AdapterConfig::default(), processor: None, exchange_builder: None, span: None }
    }

    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn context_path(mut self, context_path: impl Into<String>) -> Self {
        self.config = self.config.with_context_path(context_path);
        self
    }

    pub fn processor(mut self, processor: impl WebSocketProcessor + 'static) -> Self {
        self.processor = Some(Box::new(processor));
        self
    }

    /// Replaces the [`DefaultExchangeBuilder`].
    pub fn exchange_builder(mut self, exchange_builder: impl ExchangeBuilder + 'static) -> Self {
        self.exchange_builder = Some(Box::new(exchange_builder));
        self
    }

    /// Sets the span every diagnostic of the adapter is recorded under.
    ///
    /// Defaults to a `ws_adapter` span carrying the context path.
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn build(self) -> Result<LifecycleAdapter, BuildError> {
        let processor = self.processor.ok_or(BuildError::MissingProcessor)?;
        let exchange_builder = match self.exchange_builder {
            Some(exchange_builder) => exchange_builder,
            None => Box::new(DefaultExchangeBuilder::from_config(&self.config)?),
        };
        let span = self.span.unwrap_or_else(|| info_span!("ws_adapter", context_path = self.config.context_path()));

        Ok(LifecycleAdapter {
            filter: ContextPathFilter::new(self.config.context_path()),
            processor,
            exchange_builder,
            sessions: RwLock::new(HashMap::new()),
            span,
        })
    }
}

impl std::fmt::Debug for LifecycleAdapterBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleAdapterBuilder").field("config", &self.config).finish_non_exhaustive()
    }
}
