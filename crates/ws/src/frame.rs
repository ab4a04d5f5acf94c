//! Message units delivered through the container callbacks.

use std::fmt;

use bytes::Bytes;

/// The content of one websocket message, either text or binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Bytes),
}

impl Payload {
    /// Returns true if this is a text payload.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Payload::Text(_))
    }

    /// Returns the payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Binary(bytes) => bytes.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_owned())
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Binary(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Binary(Bytes::from(bytes))
    }
}

/// One data frame of a possibly fragmented message.
///
/// `last` is set on the final fragment of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFrame {
    payload: Payload,
    last: bool,
}

impl DataFrame {
    pub fn new(payload: impl Into<Payload>, last: bool) -> Self {
        Self { payload: payload.into(), last }
    }

    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.last
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}

/// A websocket close status code (RFC 6455, section 7.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloseCode(u16);

impl CloseCode {
    /// 1000, the purpose for which the connection was established has been fulfilled.
    pub const NORMAL: CloseCode = CloseCode(1000);
    /// 1001, the endpoint is going away.
    pub const GOING_AWAY: CloseCode = CloseCode(1001);
    /// 1002, the endpoint received a malformed frame.
    pub const PROTOCOL_ERROR: CloseCode = CloseCode(1002);
    /// 1011, the server hit an unexpected condition.
    pub const INTERNAL_ERROR: CloseCode = CloseCode(1011);

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for CloseCode {
    #[inline]
    fn from(code: u16) -> Self {
        CloseCode(code)
    }
}

impl fmt::Display for CloseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The close frame received from, or sent to, the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseFrame {
    code: CloseCode,
    reason: String,
}

impl CloseFrame {
    pub fn new(code: impl Into<CloseCode>, reason: impl Into<String>) -> Self {
        Self { code: code.into(), reason: reason.into() }
    }

    /// A close frame with [`CloseCode::NORMAL`] and no reason.
    pub fn normal() -> Self {
        Self::new(CloseCode::NORMAL, String::new())
    }

    #[inline]
    pub fn code(&self) -> CloseCode {
        self.code
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
