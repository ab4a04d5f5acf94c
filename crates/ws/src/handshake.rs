//! The HTTP upgrade request a websocket was created from.
//!
//! Besides the plain request line and headers, the container reports how it routed the
//! request: the context path of the application that owns it, the servlet path it matched
//! and the remaining path info. Containers are known to report the last two inconsistently,
//! so consumers should treat them as hints.

use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri, Version};

/// A container-native websocket handshake request.
///
/// Wraps a bodyless `http::Request<()>` together with the routing information the container
/// computed for it.
#[derive(Debug)]
pub struct HandshakeRequest {
    inner: Request<()>,
    context_path: String,
    servlet_path: String,
    path_info: Option<String>,
}

impl AsRef<Request<()>> for HandshakeRequest {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl HandshakeRequest {
    /// Creates a handshake request with empty routing information.
    pub fn new(inner: Request<()>) -> Self {
        Self { inner, context_path: String::new(), servlet_path: String::new(), path_info: None }
    }

    /// Sets the context path of the application the container mounted this request under.
    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    /// Sets the servlet path the container matched.
    pub fn with_servlet_path(mut self, servlet_path: impl Into<String>) -> Self {
        self.servlet_path = servlet_path.into();
        self
    }

    /// Sets the path info the container reported, `None` when it reported nothing.
    pub fn with_path_info(mut self, path_info: Option<String>) -> Self {
        self.path_info = path_info;
        self
    }

    /// Consumes the request and returns the inner `Request<()>`.
    pub fn into_inner(self) -> Request<()> {
        self.inner
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// Returns the request URI, the path component without the query string.
    pub fn request_uri(&self) -> &str {
        self.inner.uri().path()
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn servlet_path(&self) -> &str {
        &self.servlet_path
    }

    /// Returns the path info as reported; `None` and `Some("")` are different reports.
    pub fn path_info(&self) -> Option<&str> {
        self.path_info.as_deref()
    }
}

impl From<Parts> for HandshakeRequest {
    #[inline]
    fn from(parts: Parts) -> Self {
        Self::new(Request::from_parts(parts, ()))
    }
}

impl From<Request<()>> for HandshakeRequest {
    #[inline]
    fn from(inner: Request<()>) -> Self {
        Self::new(inner)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;
    use http::header::{SEC_WEBSOCKET_KEY, UPGRADE};

    use super::*;

    fn upgrade_request(uri: &str) -> Request<()> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(UPGRADE, "websocket")
            .header(SEC_WEBSOCKET_KEY, "dGhlIHNhbXBsZSBub25jZQ==")
            .body(())
            .unwrap()
    }

    #[test]
    fn request_uri_drops_query() {
        let request = HandshakeRequest::from(upgrade_request("/app/ws/room1?token=abc"));

        assert_eq!(request.request_uri(), "/app/ws/room1");
        assert_eq!(request.uri().query(), Some("token=abc"));
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.headers().get(UPGRADE), Some(&HeaderValue::from_static("websocket")));
    }

    #[test]
    fn routing_defaults_are_empty() {
        let request = HandshakeRequest::from(upgrade_request("/"));

        assert_eq!(request.context_path(), "");
        assert_eq!(request.servlet_path(), "");
        assert_eq!(request.path_info(), None);
    }

    #[test]
    fn empty_path_info_is_not_absent() {
        let request = HandshakeRequest::from(upgrade_request("/app/ws"))
            .with_context_path("/app")
            .with_servlet_path("/ws")
            .with_path_info(Some(String::new()));

        assert_eq!(request.context_path(), "/app");
        assert_eq!(request.servlet_path(), "/ws");
        assert_eq!(request.path_info(), Some(""));
    }

    #[test]
    fn from_parts_keeps_headers() {
        let (parts, ()) = upgrade_request("/chat").into_parts();
        let request = HandshakeRequest::from(parts);

        assert_eq!(request.headers().len(), 2);
        assert_eq!(request.into_inner().uri().path(), "/chat");
    }
}
