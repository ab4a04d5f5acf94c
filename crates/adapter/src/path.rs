//! Request path correction.
//!
//! Some containers report the path info of a websocket handshake inconsistently: sometimes
//! it still carries the context path, sometimes it is missing altogether. [`normalize`]
//! repairs exactly those two reports and leaves every other request alone. It is not a
//! general uri parser.

use crate::error::NormalizeError;
use crate::request::Request;

/// What [`normalize`] did to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalized {
    /// The path info carried the context path; it became the servlet path with the context
    /// path stripped, and the path info was cleared.
    StrippedContextPath,
    /// The path info was missing and was recomputed from the request uri.
    RecomputedPathInfo,
    Unchanged,
}

/// Corrects the servlet path and path info of `request`.
///
/// The branches are checked in order:
///
/// 1. path info present and starting with the context path: the servlet path becomes the
///    path info without the context path prefix, and the path info is cleared.
/// 2. path info absent: the path info becomes everything in the request uri after the first
///    occurrence of the servlet path.
/// 3. anything else is left unchanged.
///
/// On error the request is left exactly as it was.
pub fn normalize(request: &mut Request) -> Result<Normalized, NormalizeError> {
    let stripped = request.path_info().and_then(|path_info| path_info.strip_prefix(request.context_path())).map(str::to_owned);

    if let Some(servlet_path) = stripped {
        request.set_servlet_path(servlet_path);
        request.set_path_info(None);
        return Ok(Normalized::StrippedContextPath);
    }

    if request.path_info().is_none() {
        let path_info = path_info_after(request.request_uri(), request.servlet_path())?;
        request.set_path_info(Some(path_info));
        return Ok(Normalized::RecomputedPathInfo);
    }

    Ok(Normalized::Unchanged)
}

fn path_info_after(request_uri: &str, servlet_path: &str) -> Result<String, NormalizeError> {
    let start = request_uri
        .find(servlet_path)
        .ok_or_else(|| NormalizeError::servlet_path_not_found(servlet_path, request_uri))?;
    Ok(request_uri[start + servlet_path.len()..].to_owned())
}
