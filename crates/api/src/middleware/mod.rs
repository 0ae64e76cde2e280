//! Request middleware and authentication extractors.

pub mod auth;

pub use auth::{AuthUser, auth_middleware};
