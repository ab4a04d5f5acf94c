//! Acceptance filtering for mounted applications.
//!
//! A container can host several applications side by side and routes each upgrade request to
//! the first one that accepts it. The adapter accepts by context path.

use micro_ws::HandshakeRequest;

/// Decides whether an upgrade request belongs to an application.
///
/// Filters are shared by every connection of the container, hence `Send + Sync`.
pub trait RequestFilter: Send + Sync {
    /// Returns `true` if the request should be handed to the application.
    fn matches(&self, request: &HandshakeRequest) -> bool;
}

/// Accepts requests whose request uri starts with a context path.
///
/// The match is a plain, case-sensitive prefix match on the path: no trailing slash
/// handling, no case folding, no segment boundaries. An empty context path accepts every
/// request.
#[derive(Debug, Clone)]
pub struct ContextPathFilter {
    context_path: String,
}

impl ContextPathFilter {
    pub fn new(context_path: impl Into<String>) -> Self {
        Self { context_path: context_path.into() }
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }
}

impl RequestFilter for ContextPathFilter {
    #[inline]
    fn matches(&self, request: &HandshakeRequest) -> bool {
        request.request_uri().starts_with(&self.context_path)
    }
}

#[cfg(test)]
mod tests {
    use http::Request;

    use super::*;

    fn request(uri: &str) -> HandshakeRequest {
        HandshakeRequest::from(Request::get(uri).body(()).unwrap())
    }

    #[test]
    fn matches_prefix() {
        let filter = ContextPathFilter::new("/app");

        assert!(filter.matches(&request("/app")));
        assert!(filter.matches(&request("/app/ws/room1")));
        assert!(filter.matches(&request("/app/ws?room=1")));
    }

    #[test]
    fn rejects_other_paths() {
        let filter = ContextPathFilter::new("/app");

        assert!(!filter.matches(&request("/")));
        assert!(!filter.matches(&request("/ap")));
        assert!(!filter.matches(&request("/other/app")));
    }

    #[test]
    fn match_is_case_sensitive() {
        let filter = ContextPathFilter::new("/app");

        assert!(!filter.matches(&request("/App/ws")));
        assert!(!filter.matches(&request("/APP")));
    }

    #[test]
    fn match_ignores_segment_boundaries() {
        let filter = ContextPathFilter::new("/app");
        assert!(filter.matches(&request("/application")));

        let filter = ContextPathFilter::new("/app/");
        assert!(!filter.matches(&request("/app")));
    }

    #[test]
    fn empty_context_path_matches_everything() {
        let filter = ContextPathFilter::new("");

        assert!(filter.matches(&request("/")));
        assert!(filter.matches(&request("/anything/at/all")));
    }

    #[test]
    fn usable_as_trait_object() {
        let filters: Vec<Box<dyn RequestFilter>> =
            vec![Box::new(ContextPathFilter::new("/chat")), Box::new(ContextPathFilter::new("/app"))];

        let accepted: Vec<_> = filters.iter().map(|filter| filter.matches(&request("/app/ws"))).collect();
        assert_eq!(accepted, [false, true]);
    }
}
