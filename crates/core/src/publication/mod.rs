//! Paid ad publication: plan table, draft rules and quotes.
//!
//! The atomic debit/ledger/insert unit itself lives in the database layer;
//! this module decides what that unit must do.

pub mod error;
pub mod plans;
pub mod service;
pub mod types;


pub use error::PublicationError;
pub use plans::{DEFAULT_PLAN_ID, PLANS, Plan};
pub use service::PublicationService;
pub use types::{AdDraft, AdEdit, MAX_IMAGES, PublicationQuote};
