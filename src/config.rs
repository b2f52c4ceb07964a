//! Configuration for Companion Gateway
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use uuid::Uuid;

/// Companion Gateway - edge proxy for the Course Companion MCP integration
#[derive(Parser, Debug, Clone)]
#[command(name = "companion-gateway")]
#[command(about = "Edge proxy relaying MCP JSON-RPC and SSE traffic to the upstream MCP server")]
pub struct Args {
    /// Unique node identifier for this gateway instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Base URL of the upstream MCP server (e.g. "https://mcp.example.com")
    /// All non-local paths are forwarded here; /sse streams from {upstream}/sse/
    #[arg(long, env = "UPSTREAM_URL")]
    pub upstream_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Timeout for buffered upstream forwards in milliseconds
    /// Never applied to the SSE stream, which stays open indefinitely
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,
}

impl Args {
    /// Upstream base URL with any trailing slash removed
    pub fn upstream_base(&self) -> &str {
        self.upstream_url.trim_end_matches('/')
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.upstream_url.trim().is_empty() {
            return Err("UPSTREAM_URL must not be empty".to_string());
        }

        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://") {
            return Err(format!(
                "UPSTREAM_URL must be an http(s) URL, got '{}'",
                self.upstream_url
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err("REQUEST_TIMEOUT_MS must be greater than zero".to_string());
        }

        Ok(())
    }
}
