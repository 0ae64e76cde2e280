//! Wallet ledger rules: transaction kinds, deposit limits, descriptions.

pub mod error;
pub mod service;
pub mod types;

pub use error::WalletRuleError;
pub use service::{MAX_DEPOSIT_UNITS, WalletService};
pub use types::{TransactionKind, TransactionStatus};
