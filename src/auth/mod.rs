//! Authentication Module
//! Mission: Secure API access with JWT tokens

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
