//! A websocket lifecycle adapter
//!
//! This crate mounts a container-agnostic [`WebSocketProcessor`] on a websocket container.
//! The container drives the [`micro_ws::WebSocketApplication`] callbacks; the
//! [`LifecycleAdapter`] turns them into processor calls:
//!
//! - `is_application_request` accepts upgrade requests under the configured context path
//! - `on_connect` wraps the raw socket, builds the canonical [`Request`]/[`Response`] pair,
//!   corrects the request paths and opens the processor
//! - `on_message` forwards every message to the processor, unchanged and in order
//! - `on_close` closes the processor with a normal close code
//! - `on_ping`, `on_pong` and `on_fragment` are only logged
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use micro_ws::{CloseCode, Payload};
//! use micro_ws_adapter::{AdapterConfig, BoxError, CanonicalSocket, LifecycleAdapter, Request, Response, WebSocketProcessor};
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl WebSocketProcessor for Echo {
//!     async fn open(&self, _socket: &Arc<CanonicalSocket>, _request: &Request, _response: &Response) -> Result<(), BoxError> {
//!         Ok(())
//!     }
//!
//!     async fn handle_incoming(&self, socket: &Arc<CanonicalSocket>, payload: Payload) -> Result<(), BoxError> {
//!         socket.send(payload).await?;
//!         Ok(())
//!     }
//!
//!     async fn close(&self, _socket: &Arc<CanonicalSocket>, _code: CloseCode) -> Result<(), BoxError> {
//!         Ok(())
//!     }
//! }
//!
//! let adapter = LifecycleAdapter::builder().config(AdapterConfig::new("/chat")).processor(Echo).build().unwrap();
//! assert_eq!(adapter.context_path(), "/chat");
//! ```
//!
//! # Error handling
//!
//! - Setting a socket up never fails towards the container. A socket that can't be set up is
//!   logged and never reaches the processor again.
//! - Path correction is best effort; a request it can't correct is used as built.
//! - Processor errors while delivering a message or a close are returned to the container
//!   as [`AdapterError::Processor`].
//!
//! # Logging
//!
//! All diagnostics are `tracing` events recorded under the span handed to
//! [`LifecycleAdapterBuilder::span`]. The crate never installs a subscriber.

mod adapter;
mod config;
mod error;
mod exchange;
mod filter;
mod processor;
mod request;
mod socket;

pub mod path;

#[cfg(test)]
mod testing;

pub use adapter::LifecycleAdapter;
pub use adapter::LifecycleAdapterBuilder;
pub use adapter::Session;
pub use config::AdapterConfig;
pub use error::AdapterError;
pub use error::BoxError;
pub use error::BuildError;
pub use error::NormalizeError;
pub use exchange::DefaultExchangeBuilder;
pub use exchange::ExchangeBuilder;
pub use filter::ContextPathFilter;
pub use filter::RequestFilter;
pub use processor::WebSocketProcessor;
pub use request::Request;
pub use request::Response;
pub use socket::CanonicalSocket;
