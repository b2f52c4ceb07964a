//! OAuth authorization-server discovery metadata
//!
//! ChatGPT-app clients probe `/.well-known/oauth-authorization-server`
//! before opening the MCP connection. The gateway answers locally - the
//! authorize/token endpoints are derived from the request's own origin
//! and never forwarded upstream.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::Serialize;

/// OAuth 2.0 authorization server metadata (RFC 8414 subset)
#[derive(Debug, Serialize)]
pub struct OauthServerMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub response_types_supported: Vec<&'static str>,
    pub grant_types_supported: Vec<&'static str>,
    pub token_endpoint_auth_methods_supported: Vec<&'static str>,
    pub scopes_supported: Vec<&'static str>,
}

impl OauthServerMetadata {
    /// Metadata document for a given request origin
    pub fn for_origin(origin: &str) -> Self {
        Self {
            issuer: origin.to_string(),
            authorization_endpoint: format!("{}/oauth/authorize", origin),
            token_endpoint: format!("{}/oauth/token", origin),
            response_types_supported: vec!["code"],
            grant_types_supported: vec!["authorization_code"],
            token_endpoint_auth_methods_supported: vec!["none"],
            scopes_supported: vec!["openid", "profile", "email"],
        }
    }
}

/// Derive the request's own origin from its headers
///
/// Scheme comes from X-Forwarded-Proto when a terminating proxy sets it,
/// otherwise falls back on the host: local addresses are http, anything
/// else is assumed https.
pub fn request_origin(req: &Request<Incoming>) -> String {
    let host = req
        .headers()
        .get("host")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");

    let scheme = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_else(|| {
            if host.contains("localhost") || host.starts_with("127.") {
                "http"
            } else {
                "https"
            }
        });

    format!("{}://{}", scheme, host)
}

/// Answer an OAuth discovery request for the given origin
pub fn handle_discovery(origin: &str) -> Response<Full<Bytes>> {
    let metadata = OauthServerMetadata::for_origin(origin);
    let body = serde_json::to_string(&metadata)
        .unwrap_or_else(|_| r#"{"error": "metadata serialization failed"}"#.to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}
