//! Users Module
//! Mission: Registration pipeline, credential storage, and account management

pub mod api;
pub mod models;
pub mod store;

pub use store::UserStore;
