//! Building the canonical request/response pair from a handshake.

use std::sync::Arc;

use http::header::CONTENT_TYPE;
use mime::Mime;
use micro_ws::HandshakeRequest;

use crate::config::AdapterConfig;
use crate::error::{BoxError, BuildError};
use crate::request::{Request, Response};
use crate::socket::CanonicalSocket;

/// Produces the canonical [`Request`]/[`Response`] pair for a freshly opened socket.
#[cfg_attr(test, mockall::automock)]
pub trait ExchangeBuilder: Send + Sync {
    fn build(&self, handshake: &HandshakeRequest, socket: &Arc<CanonicalSocket>) -> Result<(Request, Response), BoxError>;
}

/// Copies the handshake into a [`Request`] and negotiates the response content type.
///
/// The response uses the request's own `Content-Type` when it is a valid mime type, and the
/// configured default otherwise.
#[derive(Debug, Clone)]
pub struct DefaultExchangeBuilder {
    default_content_type: Mime,
}

impl DefaultExchangeBuilder {
    pub fn new(default_content_type: Mime) -> Self {
        Self { default_content_type }
    }

    pub fn from_config(config: &AdapterConfig) -> Result<Self, BuildError> {
        let value = config.default_content_type();
        let default_content_type = value
            .parse::<Mime>()
            .map_err(|source| BuildError::InvalidContentType { value: value.to_owned(), source })?;
        Ok(Self::new(default_content_type))
    }

    fn negotiate(&self, handshake: &HandshakeRequest) -> Mime {
        handshake
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Mime>().ok())
            .unwrap_or_else(|| self.default_content_type.clone())
    }
}

impl Default for DefaultExchangeBuilder {
    fn default() -> Self {
        Self::new(mime::TEXT_PLAIN_UTF_8)
    }
}

impl ExchangeBuilder for DefaultExchangeBuilder {
    fn build(&self, handshake: &HandshakeRequest, socket: &Arc<CanonicalSocket>) -> Result<(Request, Response), BoxError> {
        let request = Request::from_handshake(handshake);
        let response = Response::new(socket.id(), self.negotiate(handshake));
        Ok((request, response))
    }
}

#[cfg(test)]
mod tests {
    use http::Request as HttpRequest;
    use micro_ws::RawSocket;

    use super::*;
    use crate::testing::MemorySocket;

    fn socket() -> Arc<CanonicalSocket> {
        Arc::new(CanonicalSocket::new(MemorySocket::detached() as Arc<dyn RawSocket>))
    }

    #[test]
    fn uses_request_content_type() {
        let handshake =
            HandshakeRequest::from(HttpRequest::get("/app/ws").header(CONTENT_TYPE, "application/json").body(()).unwrap());
        let socket = socket();

        let (request, response) = DefaultExchangeBuilder::default().build(&handshake, &socket).unwrap();

        assert_eq!(request.request_uri(), "/app/ws");
        assert_eq!(response.content_type(), &mime::APPLICATION_JSON);
        assert_eq!(response.socket(), socket.id());
    }

    #[test]
    fn falls_back_to_default_content_type() {
        let handshake = HandshakeRequest::from(HttpRequest::get("/app/ws").header(CONTENT_TYPE, "not a mime").body(()).unwrap());

        let (_, response) = DefaultExchangeBuilder::new(mime::TEXT_HTML).build(&handshake, &socket()).unwrap();

        assert_eq!(response.content_type(), &mime::TEXT_HTML);
    }

    #[test]
    fn from_config_parses_default() {
        let config = AdapterConfig::new("/app").with_default_content_type("application/octet-stream");
        let builder = DefaultExchangeBuilder::from_config(&config).unwrap();
        let handshake = HandshakeRequest::from(HttpRequest::get("/app/ws").body(()).unwrap());

        let (_, response) = builder.build(&handshake, &socket()).unwrap();

        assert_eq!(response.content_type(), &mime::APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn from_config_rejects_invalid_default() {
        let config = AdapterConfig::new("/app").with_default_content_type("nonsense");

        let error = DefaultExchangeBuilder::from_config(&config).unwrap_err();

        assert!(matches!(error, BuildError::InvalidContentType { ref value, .. } if value == "nonsense"));
    }
}
