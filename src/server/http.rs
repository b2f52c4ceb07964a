//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. Each inbound
//! request is handled by an independent task with no shared mutable
//! state; the pooled reqwest client is the only resource carried across
//! invocations.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Args;
use crate::cors;
use crate::routes;
use crate::server::router::{classify, Route};
use crate::types::{GatewayError, Result};

/// Response body type: local answers and buffered forwards are `Full`
/// bytes, the SSE relay is an unbuffered stream, both boxed here.
pub type ProxyBody =
    http_body_util::combinators::UnsyncBoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Pooled HTTP client for all upstream traffic
    pub client: reqwest::Client,
    /// Startup instant, reported as uptime by /health
    pub started: Instant,
}

impl AppState {
    pub fn new(args: Args) -> Self {
        // No client-wide timeout: buffered forwards set a per-request
        // timeout, the SSE stream must be allowed to stay open.
        let client = reqwest::Client::new();

        Self {
            args,
            client,
            started: Instant::now(),
        }
    }
}

/// Bind the configured listen address and serve until shutdown
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Companion gateway listening on {} as node {}",
        state.args.listen, state.args.node_id
    );
    info!("Upstream MCP server: {}", state.args.upstream_base());

    serve(state, listener).await
}

/// Serve connections from an already-bound listener
pub async fn serve(state: Arc<AppState>, listener: TcpListener) -> Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .preserve_header_case(true)
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route one inbound HTTP request
///
/// Every response leaves through `cors::apply`, including failures.
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<ProxyBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let route = classify(&method, &path);

    info!("[{}] {} {} -> {:?}", addr, method, path, route);

    let response = match route {
        Route::Preflight => to_boxed(cors::preflight_response()),

        Route::OauthDiscovery => {
            let origin = routes::oauth::request_origin(&req);
            to_boxed(routes::oauth::handle_discovery(&origin))
        }

        Route::Status => to_boxed(routes::status::status_check()),

        Route::Health => to_boxed(routes::status::health_check(Arc::clone(&state))),

        Route::Sse => {
            let user_agent = req
                .headers()
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            routes::sse::handle_sse_request(&state, user_agent.as_deref()).await
        }

        Route::Mcp | Route::Forward => match routes::proxy::forward(&state, req).await {
            Ok(response) => to_boxed(response),
            Err(e) => {
                error!("[{}] {} {} failed: {}", addr, method, path, e);
                to_boxed(error_response(&e))
            }
        },
    };

    Ok(cors::apply(response))
}

/// Terminal failure for the current request, message exposed to the caller
fn error_response(err: &GatewayError) -> Response<Full<Bytes>> {
    let status = err.status_code();
    let reason = if status == StatusCode::BAD_REQUEST {
        "Bad Request"
    } else {
        "Internal Server Error"
    };
    let body = serde_json::json!({
        "error": reason,
        "message": err.to_string(),
    });

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

/// Convert a Full<Bytes> body to ProxyBody
fn to_boxed(response: Response<Full<Bytes>>) -> Response<ProxyBody> {
    response.map(|body| body.map_err(|never| match never {}).boxed_unsync())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let err = GatewayError::Internal("boom".to_string());
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_error_response_exposes_message() {
        let err = GatewayError::Internal("upstream exploded".to_string());
        let response = error_response(&err);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed["error"], "Internal Server Error");
        assert_eq!(parsed["message"], "Internal error: upstream exploded");
    }
}
