//! Request ID middleware for request tracing and correlation.
//!
//! An upstream `x-request-id` is kept when it looks sane (1-64 visible ASCII
//! characters); anything else is replaced by a fresh UUID v4. The ID is
//! stored as a [`RequestId`] request extension, tagged on the Sentry scope,
//! recorded on the current span and echoed in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 64;

/// The ID assigned to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Accept an upstream ID, or `None` if it should be replaced.
    fn from_upstream(value: &HeaderValue) -> Option<Self> {
        let id = value.to_str().ok()?;
        let sane = !id.is_empty()
            && id.len() <= MAX_REQUEST_ID_LEN
            && id.bytes().all(|b| b.is_ascii_graphic());
        sane.then(|| Self(id.to_string()))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(RequestId::from_upstream)
        .unwrap_or_else(RequestId::generate);

    Span::current().record("request_id", request_id.0.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id.0);
    });
    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
