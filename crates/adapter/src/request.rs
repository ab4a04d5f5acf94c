//! The canonical request/response pair handed to the processor.
//!
//! Both are built once per socket, when the socket opens, and live until it closes.

use http::{HeaderMap, Method, StatusCode, Uri, Version};
use mime::Mime;
use micro_ws::{HandshakeRequest, SocketId};

/// A container-agnostic view of the websocket handshake request.
///
/// The routing fields start out as the container reported them and may be corrected by
/// [`crate::path::normalize`] before the processor sees the request.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    context_path: String,
    servlet_path: String,
    path_info: Option<String>,
}

impl Request {
    /// Copies the request line, headers and routing information out of a handshake request.
    pub fn from_handshake(handshake: &HandshakeRequest) -> Self {
        Self {
            method: handshake.method().clone(),
            uri: handshake.uri().clone(),
            version: handshake.version(),
            headers: handshake.headers().clone(),
            context_path: handshake.context_path().to_owned(),
            servlet_path: handshake.servlet_path().to_owned(),
            path_info: handshake.path_info().map(str::to_owned),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// The path component of the request uri.
    pub fn request_uri(&self) -> &str {
        self.uri.path()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn servlet_path(&self) -> &str {
        &self.servlet_path
    }

    pub fn path_info(&self) -> Option<&str> {
        self.path_info.as_deref()
    }

    pub fn set_servlet_path(&mut self, servlet_path: impl Into<String>) {
        self.servlet_path = servlet_path.into();
    }

    pub fn set_path_info(&mut self, path_info: Option<String>) {
        self.path_info = path_info;
    }
}

/// The response paired with a [`Request`].
///
/// For a websocket the status line is already on the wire by the time the processor runs,
/// so the response mostly carries what the processor negotiated for the messages it writes.
#[derive(Debug, Clone)]
pub struct Response {
    socket: SocketId,
    status: StatusCode,
    headers: HeaderMap,
    content_type: Mime,
}

impl Response {
    pub fn new(socket: SocketId, content_type: Mime) -> Self {
        Self { socket, status: StatusCode::SWITCHING_PROTOCOLS, headers: HeaderMap::new(), content_type }
    }

    /// The socket this response writes to.
    pub fn socket(&self) -> SocketId {
        self.socket
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }
}

#[cfg(test)]
mod tests {
    use http::Request as HttpRequest;

    use super::*;

    #[test]
    fn from_handshake_copies_routing() {
        let handshake = HandshakeRequest::from(HttpRequest::get("/app/ws/room1?x=1").body(()).unwrap())
            .with_context_path("/app")
            .with_servlet_path("/ws")
            .with_path_info(Some("/room1".into()));

        let request = Request::from_handshake(&handshake);

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.request_uri(), "/app/ws/room1");
        assert_eq!(request.uri().query(), Some("x=1"));
        assert_eq!(request.context_path(), "/app");
        assert_eq!(request.servlet_path(), "/ws");
        assert_eq!(request.path_info(), Some("/room1"));
    }

    #[test]
    fn response_switches_protocols() {
        let response = Response::new(SocketId::from(3), mime::APPLICATION_JSON);

        assert_eq!(response.socket(), SocketId::from(3));
        assert_eq!(response.status(), StatusCode::SWITCHING_PROTOCOLS);
        assert_eq!(response.content_type(), &mime::APPLICATION_JSON);
        assert!(response.headers().is_empty());
    }
}
