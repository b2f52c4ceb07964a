//! Route classification for inbound requests
//!
//! An explicit route table rather than substring matching: OAuth
//! discovery and SSE paths only match on segment boundaries, so e.g.
//! `/sse-other` or a deep upstream path that happens to contain "oauth"
//! is forwarded instead of being intercepted.

use hyper::Method;

/// Where an inbound request is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight: answered locally, empty body
    Preflight,
    /// OAuth authorization-server metadata: answered locally,
    /// takes precedence over all forwarding
    OauthDiscovery,
    /// Root status document: answered locally
    Status,
    /// Liveness probe: answered locally
    Health,
    /// MCP JSON-RPC: forwarded verbatim to {upstream}/mcp
    Mcp,
    /// Event stream: GET {upstream}/sse/ piped through unbuffered
    Sse,
    /// Anything else: forwarded verbatim to {upstream}{path}
    Forward,
}

/// Classify a request by method and path
///
/// OPTIONS short-circuits before any path matching; OAuth discovery is
/// checked before every forwarding route.
pub fn classify(method: &Method, path: &str) -> Route {
    if method == Method::OPTIONS {
        return Route::Preflight;
    }

    if path == "/.well-known/oauth-authorization-server"
        || path == "/oauth_config"
        || matches_segment(path, "/oauth")
    {
        return Route::OauthDiscovery;
    }

    match path {
        "/" => Route::Status,
        "/health" | "/healthz" => Route::Health,
        "/mcp" => Route::Mcp,
        p if matches_segment(p, "/sse") => Route::Sse,
        _ => Route::Forward,
    }
}

/// True if `path` equals `prefix` or continues past it on a `/` boundary
fn matches_segment(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_always_preflight() {
        assert_eq!(classify(&Method::OPTIONS, "/"), Route::Preflight);
        assert_eq!(classify(&Method::OPTIONS, "/mcp"), Route::Preflight);
        assert_eq!(classify(&Method::OPTIONS, "/anything"), Route::Preflight);
    }

    #[test]
    fn test_oauth_discovery_paths() {
        assert_eq!(
            classify(&Method::GET, "/.well-known/oauth-authorization-server"),
            Route::OauthDiscovery
        );
        assert_eq!(classify(&Method::GET, "/oauth_config"), Route::OauthDiscovery);
        assert_eq!(classify(&Method::GET, "/oauth"), Route::OauthDiscovery);
        assert_eq!(
            classify(&Method::GET, "/oauth/authorize"),
            Route::OauthDiscovery
        );
        assert_eq!(
            classify(&Method::POST, "/oauth/token"),
            Route::OauthDiscovery
        );
    }

    #[test]
    fn test_oauth_substring_no_longer_intercepted() {
        // Segment-bounded matching: deep upstream paths containing "oauth"
        // are forwarded, not answered locally.
        assert_eq!(classify(&Method::GET, "/api/oauth-docs"), Route::Forward);
        assert_eq!(classify(&Method::GET, "/oauthless"), Route::Forward);
    }

    #[test]
    fn test_local_routes() {
        assert_eq!(classify(&Method::GET, "/"), Route::Status);
        assert_eq!(classify(&Method::POST, "/"), Route::Status);
        assert_eq!(classify(&Method::GET, "/health"), Route::Health);
        assert_eq!(classify(&Method::GET, "/healthz"), Route::Health);
    }

    #[test]
    fn test_mcp_and_sse() {
        assert_eq!(classify(&Method::POST, "/mcp"), Route::Mcp);
        assert_eq!(classify(&Method::GET, "/mcp"), Route::Mcp);
        assert_eq!(classify(&Method::GET, "/sse"), Route::Sse);
        assert_eq!(classify(&Method::GET, "/sse/"), Route::Sse);
        assert_eq!(classify(&Method::GET, "/sse/stream"), Route::Sse);
        // Segment boundary: /sse-other is a forward, not a stream
        assert_eq!(classify(&Method::GET, "/sse-other"), Route::Forward);
    }

    #[test]
    fn test_everything_else_forwards() {
        assert_eq!(classify(&Method::GET, "/messages"), Route::Forward);
        assert_eq!(classify(&Method::POST, "/api/v1/chapters"), Route::Forward);
        assert_eq!(classify(&Method::DELETE, "/mcp/extra"), Route::Forward);
    }
}
