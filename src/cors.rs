//! CORS normalization applied to every gateway response
//!
//! Browser and ChatGPT-app clients call this gateway cross-origin, so the
//! same constant header set is appended to every response, success or
//! failure. `apply` constructs the headers onto the given response without
//! aliasing the original upstream response object.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-Request-ID";

/// Append the constant CORS header set to a response
///
/// Overwrites any CORS headers the upstream may have set; all other
/// headers, the status, and the body pass through untouched.
pub fn apply<B>(mut response: Response<B>) -> Response<B> {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    response
}

/// CORS preflight response: 200, empty body, CORS headers only
pub fn preflight_response() -> Response<Full<Bytes>> {
    apply(
        Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::new()))
            .unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_all_three_headers() {
        let response = Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from("body")))
            .unwrap();

        let response = apply(response);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization, X-Request-ID"
        );
    }

    #[test]
    fn test_apply_overwrites_upstream_cors() {
        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "https://evil.example")
            .header("x-upstream", "kept")
            .body(Full::new(Bytes::new()))
            .unwrap();

        let response = apply(response);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()["x-upstream"], "kept");
    }

    #[test]
    fn test_preflight_is_empty_with_cors() {
        let response = preflight_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
