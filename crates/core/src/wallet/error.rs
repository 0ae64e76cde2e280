//! Wallet rule errors.

use fesa_shared::types::{Money, MoneyError};
use thiserror::Error;

/// Reasons a wallet movement is refused before any write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletRuleError {
    /// Deposit of zero or less.
    #[error("deposit amount must be positive")]
    NonPositiveAmount,

    /// Deposit above the per-operation ceiling.
    #[error("deposit amount exceeds the limit of {limit}")]
    AboveLimit {
        /// The ceiling.
        limit: Money,
    },

    /// Amount not representable in storage.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    /// Provider or phone missing.
    #[error("{0} must not be empty")]
    MissingField(&'static str),

    /// Stored kind not recognised.
    #[error("unknown transaction kind: {0}")]
    UnknownKind(String),

    /// Stored status not recognised.
    #[error("unknown transaction status: {0}")]
    UnknownStatus(String),
}
