//! User repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use fesa_core::auth::{AccessLevel, RoleError, authorize_role_change};
use fesa_core::profile::OnlineStatus;
use fesa_shared::AppError;
use fesa_shared::types::UserId;

use crate::begin_atomic;
use crate::entities::users;

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Email already registered.
    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Target account not found.
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// The acting account no longer exists.
    #[error("Acting user no longer exists: {0}")]
    CallerNotFound(UserId),

    /// Role change refused.
    #[error(transparent)]
    Role(#[from] RoleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl UserError {
    /// Machine-readable failure reason for API responses.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::NotFound(_) => "user_not_found",
            Self::CallerNotFound(_) => "unknown_user",
            Self::Role(RoleError::UnknownLevel(_)) => "unknown_level",
            Self::Role(RoleError::InsufficientPrivilege(_)) => "insufficient_privilege",
            Self::Database(_) => "database_error",
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail(_) => Self::Conflict(err.to_string()),
            UserError::NotFound(_) => Self::NotFound(err.to_string()),
            UserError::CallerNotFound(_) => Self::Unauthorized(err.to_string()),
            UserError::Role(RoleError::UnknownLevel(_)) => Self::Validation(err.to_string()),
            UserError::Role(RoleError::InsufficientPrivilege(_)) => {
                Self::Forbidden(err.to_string())
            }
            UserError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for registering an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email, unique.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Contact phone.
    pub phone: String,
}

/// Full overwrite of the editable profile fields.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    /// Display name.
    pub full_name: String,
    /// Contact phone.
    pub phone: String,
    /// Inline-encoded picture.
    pub profile_picture: Option<String>,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Presence status.
    pub online_status: OnlineStatus,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers an account with a zero balance.
    ///
    /// The very first account becomes `SuperAdmin`, every later one `Member`.
    /// Counting and inserting share one transaction.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` if the email is taken.
    pub async fn register(
        &self,
        input: NewUser,
        now: DateTime<Utc>,
    ) -> Result<users::Model, UserError> {
        let txn = begin_atomic(&self.db).await?;

        let taken = users::Entity::find()
            .filter(users::Column::Email.eq(input.email.as_str()))
            .count(&txn)
            .await?;
        if taken > 0 {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let existing = users::Entity::find().count(&txn).await?;
        let level = AccessLevel::for_new_account(existing);

        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            email: Set(input.email.clone()),
            password_hash: Set(input.password_hash),
            full_name: Set(input.full_name),
            phone: Set(input.phone),
            wallet_balance: Set(0),
            access_level: Set(level.level()),
            profile_picture: Set(None),
            bio: Set(None),
            online_status: Set(OnlineStatus::default().as_str().to_string()),
            created_at: Set(now),
        };

        let user = match user.insert(&txn).await {
            Ok(user) => user,
            Err(err) if is_unique_violation(&err) => {
                return Err(UserError::DuplicateEmail(input.email));
            }
            Err(err) => return Err(err.into()),
        };

        txn.commit().await?;
        Ok(user)
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Counts registered accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        users::Entity::find().count(&self.db).await
    }

    /// Lists every account, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
    }

    /// Overwrites the caller's profile fields. Balance and role are untouched.
    ///
    /// # Errors
    ///
    /// Returns `CallerNotFound` if the account does not exist.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<users::Model, UserError> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or(UserError::CallerNotFound(id))?;

        let mut active: users::ActiveModel = user.into();
        active.full_name = Set(update.full_name);
        active.phone = Set(update.phone);
        active.profile_picture = Set(update.profile_picture);
        active.bio = Set(update.bio);
        active.online_status = Set(update.online_status.as_str().to_string());

        Ok(active.update(&self.db).await?)
    }

    /// Changes `target`'s access level on behalf of `caller`.
    ///
    /// The caller's level is read from the database, not from the token.
    ///
    /// # Errors
    ///
    /// Returns `CallerNotFound` or `NotFound` for a missing caller or target,
    /// `Role` when the change is not permitted. Nothing is written on error.
    pub async fn set_access_level(
        &self,
        caller: UserId,
        target: UserId,
        requested: AccessLevel,
    ) -> Result<users::Model, UserError> {
        let txn = begin_atomic(&self.db).await?;

        let caller_row = users::Entity::find_by_id(caller.into_inner())
            .one(&txn)
            .await?
            .ok_or(UserError::CallerNotFound(caller))?;
        let target_row = users::Entity::find_by_id(target.into_inner())
            .one(&txn)
            .await?
            .ok_or(UserError::NotFound(target))?;

        authorize_role_change(
            caller_row.access(),
            caller == target,
            target_row.access(),
            requested,
        )?;

        let mut active: users::ActiveModel = target_row.into();
        active.access_level = Set(requested.level());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }
}

/// Whether `err` is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
