//! Companion Gateway - edge proxy for Course Companion
//!
//! Relays MCP (Model Context Protocol) JSON-RPC and Server-Sent-Events
//! traffic from browser and ChatGPT-app clients to one fixed upstream
//! MCP server, answering OAuth discovery and status requests locally
//! and normalizing CORS on every response.
//!
//! ## Endpoints
//!
//! - **`/mcp`**: JSON-RPC forwarded verbatim to the upstream
//! - **`/sse`**: event stream piped through from the upstream, unbuffered
//! - **`/.well-known/oauth-authorization-server`**: OAuth metadata,
//!   answered locally from the request's own origin
//! - **`/`**: status and endpoint map
//! - anything else: forwarded verbatim to the upstream

pub mod config;
pub mod cors;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{run, serve, AppState};
pub use types::{GatewayError, Result};
