//! Shared types, errors, and configuration for Fesa.
//!
//! This crate provides common types used across all other crates:
//! - Money type with decimal precision and minor-unit conversion
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error taxonomy
//! - Configuration management
//! - Bearer token signing and verification
//! - An injectable clock

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, JwtConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
