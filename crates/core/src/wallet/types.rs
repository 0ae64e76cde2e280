//! Ledger transaction classification.

use serde::{Deserialize, Serialize};

use super::error::WalletRuleError;

/// What moved the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Credit from a (simulated) top-up.
    Deposit,
    /// Debit for an ad publication.
    Payment,
    /// Debit paid out to the user.
    Withdrawal,
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Not settled yet.
    Pending,
    /// Settled; the balance reflects it.
    Completed,
    /// Abandoned; the balance does not reflect it.
    Failed,
}

impl TransactionKind {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Payment => "payment",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl TransactionStatus {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = WalletRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(Self::Deposit),
            "payment" => Ok(Self::Payment),
            "withdrawal" => Ok(Self::Withdrawal),
            other => Err(WalletRuleError::UnknownKind(other.to_string())),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = WalletRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(WalletRuleError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
