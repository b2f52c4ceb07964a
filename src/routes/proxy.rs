//! Buffered upstream forwarding
//!
//! `/mcp` and every unmatched path are forwarded verbatim (method,
//! headers, body, query string) to the fixed upstream, and the upstream's
//! status, headers, and body come back with CORS appended by the caller.
//! Exactly one upstream request per inbound request; no retries.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::{HeaderMap, HeaderName};
use hyper::{header, Request, Response};
use std::time::Duration;
use tracing::debug;

use crate::server::AppState;
use crate::types::Result;

/// Forward a request verbatim to `{upstream}{path_and_query}`
pub async fn forward(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>> {
    let (parts, body) = req.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
        .to_string();
    let url = format!("{}{}", state.args.upstream_base(), path_and_query);

    let body = body.collect().await?.to_bytes();

    debug!(
        method = %parts.method,
        url = %url,
        body_len = body.len(),
        "Forwarding request to upstream"
    );

    let mut headers = parts.headers.clone();
    strip_connection_headers(&mut headers);

    let upstream = state
        .client
        .request(parts.method, url)
        .headers(headers)
        .body(body)
        .timeout(Duration::from_millis(state.args.request_timeout_ms))
        .send()
        .await?;

    let status = upstream.status();
    let mut builder = Response::builder().status(status);
    for (name, value) in upstream.headers() {
        if is_connection_header(name) {
            continue;
        }
        builder = builder.header(name, value);
    }

    let bytes = upstream.bytes().await?;

    debug!(status = %status, body_len = bytes.len(), "Upstream responded");

    Ok(builder.body(Full::new(bytes))?)
}

/// Remove headers that describe the inbound connection rather than the
/// request itself; the client recomputes these for the upstream leg.
fn strip_connection_headers(headers: &mut HeaderMap) {
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::CONNECTION);
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::UPGRADE);
}

fn is_connection_header(name: &HeaderName) -> bool {
    *name == header::CONTENT_LENGTH
        || *name == header::CONNECTION
        || *name == header::TRANSFER_ENCODING
        || *name == header::UPGRADE
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    #[test]
    fn test_strip_connection_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("gw.example.com"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("42"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert("x-request-id", HeaderValue::from_static("abc-123"));
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer token"),
        );

        strip_connection_headers(&mut headers);

        assert!(headers.get(header::HOST).is_none());
        assert!(headers.get(header::CONTENT_LENGTH).is_none());
        assert!(headers.get(header::CONNECTION).is_none());
        assert_eq!(headers["x-request-id"], "abc-123");
        assert_eq!(headers[header::AUTHORIZATION], "Bearer token");
    }

    #[test]
    fn test_connection_header_detection() {
        assert!(is_connection_header(&header::CONTENT_LENGTH));
        assert!(is_connection_header(&header::TRANSFER_ENCODING));
        assert!(!is_connection_header(&header::CONTENT_TYPE));
        assert!(!is_connection_header(&HeaderName::from_static(
            "x-request-id"
        )));
    }
}
