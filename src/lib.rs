//! Stitchtrack Backend Library
//!
//! CRUD REST backend for a knitting pattern/project tracker: token-based
//! authentication, a validation pipeline for account management, and thin
//! resource routers over SQLite stores.

pub mod auth;
pub mod middleware;
pub mod patterns;
pub mod projects;
pub mod server;
pub mod users;
pub mod validate;

pub use server::{build_router, AppState};
