use std::error::Error;

use micro_ws::{SocketError, SocketId};
use thiserror::Error;

/// Errors crossing the processor and exchange builder seams.
pub type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("socket {id} does not carry its handshake request")]
    UnsupportedSocket { id: SocketId },

    #[error("build request/response error: {source}")]
    Build { source: BoxError },

    #[error("processor open error: {source}")]
    Open { source: BoxError },

    #[error("processor error: {source}")]
    Processor { source: BoxError },

    #[error("socket error: {source}")]
    Socket {
        #[from]
        source: SocketError,
    },
}

impl AdapterError {
    pub fn unsupported_socket(id: SocketId) -> Self {
        Self::UnsupportedSocket { id }
    }

    pub fn build<E: Into<BoxError>>(e: E) -> Self {
        Self::Build { source: e.into() }
    }

    pub fn open<E: Into<BoxError>>(e: E) -> Self {
        Self::Open { source: e.into() }
    }

    pub fn processor<E: Into<BoxError>>(e: E) -> Self {
        Self::Processor { source: e.into() }
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("processor must be set")]
    MissingProcessor,

    #[error("invalid default content type '{value}': {source}")]
    InvalidContentType { value: String, source: mime::FromStrError },
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("servlet path '{servlet_path}' not found in request uri '{request_uri}'")]
    ServletPathNotFound { servlet_path: String, request_uri: String },
}

impl NormalizeError {
    pub fn servlet_path_not_found<S: ToString, U: ToString>(servlet_path: S, request_uri: U) -> Self {
        Self::ServletPathNotFound { servlet_path: servlet_path.to_string(), request_uri: request_uri.to_string() }
    }
}
