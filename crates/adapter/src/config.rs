//! Adapter configuration.
//!
//! [`AdapterConfig`] is plain data so it can be embedded in whatever configuration file the
//! hosting application already loads:
//!
//! ```
//! use micro_ws_adapter::AdapterConfig;
//!
//! let config: AdapterConfig = serde_json::from_str(r#"{ "context_path": "/chat" }"#).unwrap();
//! assert_eq!(config.context_path(), "/chat");
//! assert_eq!(config.default_content_type(), "text/plain; charset=utf-8");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    context_path: String,
    default_content_type: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self { context_path: String::new(), default_content_type: mime::TEXT_PLAIN_UTF_8.to_string() }
    }
}

impl AdapterConfig {
    pub fn new(context_path: impl Into<String>) -> Self {
        Self { context_path: context_path.into(), ..Self::default() }
    }

    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = context_path.into();
        self
    }

    /// Sets the content type used when the handshake request does not declare a usable one.
    pub fn with_default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    /// The path prefix of every request this application owns. Empty means every request.
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn default_content_type(&self) -> &str {
        &self.default_content_type
    }
}
