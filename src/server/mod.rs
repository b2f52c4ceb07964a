//! HTTP server and request routing

pub mod http;
pub mod router;

pub use http::{run, serve, AppState, ProxyBody};
pub use router::{classify, Route};
