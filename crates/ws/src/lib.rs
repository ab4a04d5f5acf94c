//! The websocket container contract
//!
//! This crate describes what a websocket container hands to the applications mounted on it:
//! raw socket handles, the upgrade request each socket was created from, the message units
//! delivered on a socket, and the callback surface an application implements.
//!
//! It contains no transport code. Framing, masking, control frame replies and socket
//! bookkeeping are the container's job; this crate only fixes the types that cross the
//! boundary between the container and an application.
//!
//! # Architecture
//!
//! - [`socket`]: raw socket handles and their identity
//!   - [`RawSocket`]: a connection handle owned by the container
//!   - [`SocketId`]: stable identity of one connection
//! - [`handshake`]: the upgrade request
//!   - [`HandshakeRequest`]: request line, headers and the container's routing information
//! - [`frame`]: message units
//!   - [`Payload`], [`DataFrame`], [`CloseFrame`], [`CloseCode`]
//! - [`WebSocketApplication`]: the callbacks a container drives
//!
//! # Callback ordering
//!
//! For a single socket the container delivers callbacks sequentially and never overlaps
//! them. `on_connect` completes before any message or close callback for the same socket.
//! Callbacks for different sockets may run concurrently.

mod application;
pub mod frame;
pub mod handshake;
pub mod socket;

pub use application::WebSocketApplication;
pub use frame::{CloseCode, CloseFrame, DataFrame, Payload};
pub use handshake::HandshakeRequest;
pub use socket::{RawSocket, SocketError, SocketId};
