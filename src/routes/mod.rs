//! HTTP routes for Companion Gateway

pub mod oauth;
pub mod proxy;
pub mod sse;
pub mod status;

pub use oauth::{handle_discovery, request_origin, OauthServerMetadata};
pub use proxy::forward;
pub use sse::{handle_sse_request, sse_error_response, DEFAULT_USER_AGENT};
pub use status::{health_check, status_check, StatusResponse};
