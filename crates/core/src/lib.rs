//! Core business rules for Fesa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `auth` - Password hashing, access levels and role-change rules
//! - `publication` - Plan table, ad draft rules, publication quotes
//! - `wallet` - Ledger transaction kinds and top-up rules
//! - `stats` - Revenue windows, activation rate, visitor estimate
//! - `profile` - Presence status

pub mod auth;
pub mod profile;
pub mod publication;
pub mod stats;
pub mod wallet;
