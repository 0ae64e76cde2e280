//! `SeaORM` Entity for users table.

use fesa_core::auth::AccessLevel;
use fesa_core::profile::OnlineStatus;
use fesa_shared::types::{Money, UserId};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: String,
    /// Minor units (hundredths).
    pub wallet_balance: i64,
    pub access_level: i16,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub online_status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ads::Entity")]
    Ads,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::ads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ads.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Typed identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }

    /// Wallet balance.
    #[must_use]
    pub fn balance(&self) -> Money {
        Money::from_minor_units(self.wallet_balance)
    }

    /// Access level; unrecognised stored values grant nothing.
    #[must_use]
    pub fn access(&self) -> AccessLevel {
        AccessLevel::from_level(i64::from(self.access_level)).unwrap_or(AccessLevel::Member)
    }

    /// Presence status; unrecognised stored values read as offline.
    #[must_use]
    pub fn status(&self) -> OnlineStatus {
        self.online_status.parse().unwrap_or_default()
    }
}
