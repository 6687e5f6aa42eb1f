//! Middleware for observability.
//!
//! Request logging with latency tracking; authentication middleware lives
//! in the auth module.

pub mod logging;

pub use logging::request_logging;
