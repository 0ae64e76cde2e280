//! Publication rules.

use chrono::{DateTime, Utc};

use fesa_shared::types::Money;

use super::error::PublicationError;
use super::plans::Plan;
use super::types::{AdDraft, AdEdit, MAX_IMAGES, PublicationQuote};

/// Publication service for business logic.
pub struct PublicationService;

impl PublicationService {
    /// Prices a publication made at `now` on the plan named `plan_id`.
    ///
    /// Unknown plan identifiers fall back to the default plan.
    #[must_use]
    pub fn quote(plan_id: Option<&str>, now: DateTime<Utc>) -> PublicationQuote {
        let plan = Plan::lookup(plan_id);
        PublicationQuote {
            plan,
            cost: plan.cost(),
            published_at: now,
            expires_at: now + plan.duration(),
        }
    }

    /// Validates a draft before anything is written.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate_draft(draft: &AdDraft) -> Result<(), PublicationError> {
        Self::validate_fields(&draft.title, &draft.category, draft.price)?;
        if draft.images.len() > MAX_IMAGES {
            return Err(PublicationError::TooManyImages {
                count: draft.images.len(),
                max: MAX_IMAGES,
            });
        }
        Ok(())
    }

    /// Validates an administrator's overwrite.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate_edit(edit: &AdEdit) -> Result<(), PublicationError> {
        Self::validate_fields(&edit.title, &edit.category, edit.price)
    }

    /// Refuses the publication when `balance` cannot cover `cost`.
    ///
    /// # Errors
    ///
    /// Returns `PublicationError::InsufficientFunds`.
    pub fn ensure_affordable(balance: Money, cost: Money) -> Result<(), PublicationError> {
        if balance < cost {
            return Err(PublicationError::InsufficientFunds { balance, cost });
        }
        Ok(())
    }

    fn validate_fields(title: &str, category: &str, price: Money) -> Result<(), PublicationError> {
        if title.trim().is_empty() {
            return Err(PublicationError::EmptyTitle);
        }
        if category.trim().is_empty() {
            return Err(PublicationError::EmptyCategory);
        }
        if price.is_negative() {
            return Err(PublicationError::NegativePrice);
        }
        price.to_minor_units()?;
        Ok(())
    }
}
