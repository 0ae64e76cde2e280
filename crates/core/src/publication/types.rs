//! Publication input and output types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use fesa_shared::types::Money;

use super::plans::Plan;

/// Maximum number of inline images per ad.
pub const MAX_IMAGES: usize = 5;

/// Ad content submitted for publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdDraft {
    /// Title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Asking price.
    pub price: Money,
    /// Location.
    pub location: String,
    /// Category name (matched by value, not by reference).
    pub category: String,
    /// Inline-encoded images.
    pub images: Vec<String>,
}

/// Full-field overwrite applied by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdEdit {
    /// Title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Asking price.
    pub price: Money,
    /// Location.
    pub location: String,
    /// Category name.
    pub category: String,
    /// New expiry.
    pub expires_at: DateTime<Utc>,
}

/// What a publication will cost and how long it will last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublicationQuote {
    /// Selected plan.
    pub plan: &'static Plan,
    /// Amount to debit.
    pub cost: Money,
    /// Creation timestamp of the ad.
    pub published_at: DateTime<Utc>,
    /// Instant from which the ad is no longer publicly listed.
    pub expires_at: DateTime<Utc>,
}
