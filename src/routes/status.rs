//! Status and liveness endpoints
//!
//! - `/` - static status/version/endpoint-map document, any method
//! - `/health`, `/healthz` - liveness probe for deployment checks
//!
//! Both are answered locally with no upstream call. The root document is
//! rendered from a fixed struct, so repeated requests are byte-identical.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::server::AppState;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Root status document
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status, always "ok" while the gateway is serving
    pub status: &'static str,
    /// Gateway version
    pub version: &'static str,
    /// Map of the endpoints this gateway exposes
    pub endpoints: EndpointMap,
}

/// Endpoint descriptions keyed by path
#[derive(Debug, Serialize)]
pub struct EndpointMap {
    #[serde(rename = "/mcp")]
    pub mcp: &'static str,
    #[serde(rename = "/sse")]
    pub sse: &'static str,
    #[serde(rename = "/messages")]
    pub messages: &'static str,
}

impl StatusResponse {
    pub fn current() -> Self {
        Self {
            status: "ok",
            version: VERSION,
            endpoints: EndpointMap {
                mcp: "MCP JSON-RPC endpoint (POST)",
                sse: "Server-Sent Events stream (GET)",
                messages: "JSON-RPC messages endpoint (POST)",
            },
        }
    }
}

/// Liveness response for deployment probes
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: &'static str,
    /// Uptime in seconds
    pub uptime: u64,
    /// Node identifier
    pub node_id: String,
    /// Configured upstream base URL
    pub upstream: String,
}

/// GET / - status/version/endpoint-map, no upstream call
pub fn status_check() -> Response<Full<Bytes>> {
    let body = serde_json::to_string(&StatusResponse::current())
        .unwrap_or_else(|_| r#"{"status": "ok"}"#.to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

/// GET /health, /healthz - liveness probe
pub fn health_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let health = HealthResponse {
        healthy: true,
        version: VERSION,
        uptime: state.started.elapsed().as_secs(),
        node_id: state.args.node_id.to_string(),
        upstream: state.args.upstream_base().to_string(),
    };

    let body = serde_json::to_string(&health)
        .unwrap_or_else(|_| r#"{"healthy": true}"#.to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}
