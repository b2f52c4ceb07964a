//! Shared types for Companion Gateway

pub mod error;

pub use error::{GatewayError, Result};
