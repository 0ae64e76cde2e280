//! Publication rule errors.

use fesa_shared::types::{Money, MoneyError};
use thiserror::Error;

/// Reasons a publication (or an admin edit) is refused before any write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublicationError {
    /// Title empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// Category empty after trimming.
    #[error("category must not be empty")]
    EmptyCategory,

    /// Asking price below zero.
    #[error("price must not be negative")]
    NegativePrice,

    /// Asking price not representable in storage.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] MoneyError),

    /// More images than allowed.
    #[error("at most {max} images are allowed, got {count}")]
    TooManyImages {
        /// Images supplied.
        count: usize,
        /// Maximum accepted.
        max: usize,
    },

    /// Wallet balance below the plan cost.
    #[error("insufficient funds: balance {balance}, plan costs {cost}")]
    InsufficientFunds {
        /// Balance at the time of the check.
        balance: Money,
        /// Cost of the selected plan.
        cost: Money,
    },
}
