//! Wallet rules.

use rust_decimal::Decimal;

use fesa_shared::types::Money;

use super::error::WalletRuleError;

/// Largest single top-up, in whole currency units.
pub const MAX_DEPOSIT_UNITS: i64 = 10_000_000;

/// Wallet service for business logic.
pub struct WalletService;

impl WalletService {
    /// Validates a simulated top-up request.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate_deposit(amount: Money, phone: &str, provider: &str) -> Result<(), WalletRuleError> {
        if !amount.is_positive() {
            return Err(WalletRuleError::NonPositiveAmount);
        }
        let limit = Money::new(Decimal::from(MAX_DEPOSIT_UNITS));
        if amount > limit {
            return Err(WalletRuleError::AboveLimit { limit });
        }
        amount.to_minor_units()?;
        if provider.trim().is_empty() {
            return Err(WalletRuleError::MissingField("provider"));
        }
        if phone.trim().is_empty() {
            return Err(WalletRuleError::MissingField("phone"));
        }
        Ok(())
    }

    /// Ledger description of a top-up.
    #[must_use]
    pub fn deposit_description(provider: &str, phone: &str) -> String {
        format!("Top-up via {} ({})", provider.trim(), phone.trim())
    }

    /// Ledger description of a publication payment.
    #[must_use]
    pub fn payment_description(title: &str) -> String {
        format!("Ad publication: {}", title.trim())
    }
}
