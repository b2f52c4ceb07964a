//! SSE pass-through to the upstream event stream
//!
//! Opens `GET {upstream}/sse/` and pipes the upstream bytes into the
//! client response body unmodified: frames arrive in order, nothing is
//! coalesced, and backpressure propagates through the body stream (a
//! slow client stops the upstream read instead of growing a buffer).

use bytes::Bytes;
use futures_util::TryStreamExt;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::Frame;
use hyper::{Response, StatusCode};
use tracing::{debug, warn};

use crate::server::{AppState, ProxyBody};

/// User-Agent sent upstream when the caller did not provide one
pub const DEFAULT_USER_AGENT: &str = "companion-gateway";

/// Relay the upstream event stream to the client
///
/// `user_agent` is the caller's User-Agent header, forwarded upstream so
/// the MCP server sees who is really listening.
pub async fn handle_sse_request(
    state: &AppState,
    user_agent: Option<&str>,
) -> Response<ProxyBody> {
    let url = format!("{}/sse/", state.args.upstream_base());
    let user_agent = user_agent.unwrap_or(DEFAULT_USER_AGENT);

    debug!(url = %url, user_agent = %user_agent, "Opening upstream SSE connection");

    // No timeout here: the stream stays open until either side closes.
    let upstream = state
        .client
        .get(&url)
        .header("Accept", "text/event-stream")
        .header("Cache-Control", "no-cache")
        .header("User-Agent", user_agent)
        .send()
        .await;

    let upstream = match upstream {
        Ok(resp) => resp,
        Err(e) => {
            warn!(error = %e, url = %url, "Upstream SSE connection failed");
            return sse_error_response(&e.to_string());
        }
    };

    let status = upstream.status();
    debug!(status = %status, "Upstream SSE connection established");

    let stream = upstream
        .bytes_stream()
        .map_ok(Frame::data)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>);

    Response::builder()
        .status(status)
        .header("Content-Type", "text/event-stream")
        .header("Cache-Control", "no-cache")
        .header("Connection", "keep-alive")
        .header("X-Accel-Buffering", "no")
        .body(StreamBody::new(stream).boxed_unsync())
        .unwrap()
}

/// Single synthetic SSE error frame, delivered as a 500
///
/// Clients already listening for `text/event-stream` get the failure in
/// a form their EventSource handler can surface.
pub fn sse_error_response(message: &str) -> Response<ProxyBody> {
    let frame = format!(
        "event: error\ndata: {}\n\n",
        serde_json::json!({ "error": message })
    );

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "text/event-stream")
        .body(
            Full::new(Bytes::from(frame))
                .map_err(|never| match never {})
                .boxed_unsync(),
        )
        .unwrap()
}
