//! Ad repository: listings and admin moderation.
//!
//! Ads are only created by [`LedgerRepository::publish_ad`](super::LedgerRepository::publish_ad).
//! Expiry is a visibility filter evaluated at query time; expired rows stay.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use fesa_core::publication::{AdEdit, PublicationError, PublicationService};
use fesa_shared::AppError;
use fesa_shared::types::{AdId, Money, PageRequest, PageResponse, UserId};

use crate::entities::{ads, users};

/// Error types for ad operations.
#[derive(Debug, thiserror::Error)]
pub enum AdError {
    /// Ad not found.
    #[error("Ad not found: {0}")]
    NotFound(AdId),

    /// Edit rejected by publication rules.
    #[error(transparent)]
    Invalid(#[from] PublicationError),

    /// Stored image list is not a JSON array of strings.
    #[error("Corrupt image list on ad {0}")]
    CorruptImages(AdId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl AdError {
    /// Machine-readable failure reason for API responses.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ad_not_found",
            Self::Invalid(_) => "invalid_ad",
            Self::CorruptImages(_) => "corrupt_record",
            Self::Database(_) => "database_error",
        }
    }
}

impl From<AdError> for AppError {
    fn from(err: AdError) -> Self {
        match err {
            AdError::NotFound(_) => Self::NotFound(err.to_string()),
            AdError::Invalid(_) => Self::Validation(err.to_string()),
            AdError::CorruptImages(_) => Self::Internal(err.to_string()),
            AdError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// An ad with its author's display name and visibility at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdRecord {
    /// Ad ID.
    pub id: AdId,
    /// Owner.
    pub user_id: UserId,
    /// Owner display name; empty if the owner row is gone.
    pub author_name: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Asking price.
    pub price: Money,
    /// Location.
    pub location: String,
    /// Category name.
    pub category: String,
    /// Inline-encoded images.
    pub images: Vec<String>,
    /// Visibility cut-off.
    pub expires_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether `expires_at` is still in the future.
    pub is_active: bool,
}

impl AdRecord {
    fn build(
        ad: ads::Model,
        author: Option<users::Model>,
        now: DateTime<Utc>,
    ) -> Result<Self, AdError> {
        let id = AdId::from_uuid(ad.id);
        let images = decode_images(&ad.images).ok_or(AdError::CorruptImages(id))?;

        Ok(Self {
            id,
            user_id: UserId::from_uuid(ad.user_id),
            author_name: author.map(|u| u.full_name).unwrap_or_default(),
            title: ad.title,
            description: ad.description,
            price: Money::from_minor_units(ad.price),
            location: ad.location,
            category: ad.category,
            images,
            is_active: ad.expires_at > now,
            expires_at: ad.expires_at,
            created_at: ad.created_at,
        })
    }
}

/// Ad repository for listing and moderation.
#[derive(Debug, Clone)]
pub struct AdRepository {
    db: DatabaseConnection,
}

impl AdRepository {
    /// Creates a new ad repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Public listing: ads expiring strictly after `now`, newest first.
    ///
    /// Totals count the filtered set only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<PageResponse<AdRecord>, AdError> {
        let total = ads::Entity::find()
            .filter(ads::Column::ExpiresAt.gt(now))
            .count(&self.db)
            .await?;

        let rows = ads::Entity::find()
            .filter(ads::Column::ExpiresAt.gt(now))
            .order_by_desc(ads::Column::CreatedAt)
            .order_by_desc(ads::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;

        let data = rows
            .into_iter()
            .map(|(ad, author)| AdRecord::build(ad, author, now))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResponse::new(data, page, total))
    }

    /// All of one user's ads, expired included, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<AdRecord>, AdError> {
        let rows = ads::Entity::find()
            .filter(ads::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(ads::Column::CreatedAt)
            .order_by_desc(ads::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(ad, author)| AdRecord::build(ad, author, now))
            .collect()
    }

    /// Every ad of every owner, expired included, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self, now: DateTime<Utc>) -> Result<Vec<AdRecord>, AdError> {
        let rows = ads::Entity::find()
            .order_by_desc(ads::Column::CreatedAt)
            .order_by_desc(ads::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(ad, author)| AdRecord::build(ad, author, now))
            .collect()
    }

    /// Finds one ad by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: AdId,
        now: DateTime<Utc>,
    ) -> Result<Option<AdRecord>, AdError> {
        let row = ads::Entity::find_by_id(id.into_inner())
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?;

        row.map(|(ad, author)| AdRecord::build(ad, author, now))
            .transpose()
    }

    /// Overwrites title, description, price, location, category and expiry.
    ///
    /// Owner, images and creation time are kept.
    ///
    /// # Errors
    ///
    /// Returns `Invalid` if the edit breaks a publication rule, `NotFound`
    /// if the ad does not exist.
    pub async fn update(
        &self,
        id: AdId,
        edit: AdEdit,
        now: DateTime<Utc>,
    ) -> Result<AdRecord, AdError> {
        PublicationService::validate_edit(&edit)?;
        let price = edit.price.to_minor_units().map_err(PublicationError::from)?;

        let ad = ads::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(AdError::NotFound(id))?;

        let mut active: ads::ActiveModel = ad.into();
        active.title = Set(edit.title);
        active.description = Set(edit.description);
        active.price = Set(price);
        active.location = Set(edit.location);
        active.category = Set(edit.category);
        active.expires_at = Set(edit.expires_at);
        active.update(&self.db).await?;

        self.find_by_id(id, now).await?.ok_or(AdError::NotFound(id))
    }

    /// Deletes an ad. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: AdId) -> Result<bool, AdError> {
        let result = ads::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Serializes an image list for storage.
pub(crate) fn encode_images(images: &[String]) -> String {
    serde_json::Value::from(images.to_vec()).to_string()
}

fn decode_images(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str(raw).ok()
}
