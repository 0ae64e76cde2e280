//! Authentication, password hashing and access levels.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - The ordered access levels and the rules for changing them

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access tier of an account, ordered `Member < Admin < SuperAdmin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Plain user.
    Member,
    /// May moderate ads, categories and users.
    Admin,
    /// Admin that may also appoint other super-admins.
    SuperAdmin,
}

/// Errors raised by access-level rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// Level integer outside `0..=2`.
    #[error("unknown access level {0}")]
    UnknownLevel(i64),

    /// The caller may not perform this role change.
    #[error("{0}")]
    InsufficientPrivilege(&'static str),
}

impl AccessLevel {
    /// Stored integer for this level.
    #[must_use]
    pub const fn level(self) -> i16 {
        match self {
            Self::Member => 0,
            Self::Admin => 1,
            Self::SuperAdmin => 2,
        }
    }

    /// Parses a stored or requested integer level.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::UnknownLevel` for anything outside `0..=2`.
    pub const fn from_level(level: i64) -> Result<Self, RoleError> {
        match level {
            0 => Ok(Self::Member),
            1 => Ok(Self::Admin),
            2 => Ok(Self::SuperAdmin),
            other => Err(RoleError::UnknownLevel(other)),
        }
    }

    /// Level assigned at registration: the very first account bootstraps the system.
    #[must_use]
    pub const fn for_new_account(existing_accounts: u64) -> Self {
        if existing_accounts == 0 {
            Self::SuperAdmin
        } else {
            Self::Member
        }
    }

    /// Returns true if this level passes the general admin gate.
    #[must_use]
    pub fn is_admin(self) -> bool {
        self >= Self::Admin
    }

    /// Returns true if this level may appoint super-admins.
    #[must_use]
    pub fn is_super_admin(self) -> bool {
        self == Self::SuperAdmin
    }
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Admin => write!(f, "admin"),
            Self::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

/// Checks whether `caller` may move `target` from `current` to `requested`.
///
/// Rules, checked in order:
/// - the caller must pass the admin gate;
/// - nobody changes their own level;
/// - only a super-admin grants `SuperAdmin`;
/// - only a super-admin changes the level of an existing super-admin.
///
/// # Errors
///
/// Returns `RoleError::InsufficientPrivilege` naming the violated rule.
pub fn authorize_role_change(
    caller: AccessLevel,
    caller_is_target: bool,
    current: AccessLevel,
    requested: AccessLevel,
) -> Result<(), RoleError> {
    if !caller.is_admin() {
        return Err(RoleError::InsufficientPrivilege(
            "administrator access required",
        ));
    }
    if caller_is_target {
        return Err(RoleError::InsufficientPrivilege(
            "administrators cannot change their own access level",
        ));
    }
    if requested.is_super_admin() && !caller.is_super_admin() {
        return Err(RoleError::InsufficientPrivilege(
            "only a super-admin can appoint another super-admin",
        ));
    }
    if current.is_super_admin() && !caller.is_super_admin() {
        return Err(RoleError::InsufficientPrivilege(
            "only a super-admin can change a super-admin",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_levels_are_ordered() {
        assert!(AccessLevel::Member < AccessLevel::Admin);
        assert!(AccessLevel::Admin < AccessLevel::SuperAdmin);
        assert!(!AccessLevel::Member.is_admin());
        assert!(AccessLevel::Admin.is_admin());
        assert!(AccessLevel::SuperAdmin.is_admin());
    }

    #[rstest]
    #[case(0, AccessLevel::Member)]
    #[case(1, AccessLevel::Admin)]
    #[case(2, AccessLevel::SuperAdmin)]
    fn test_level_round_trip(#[case] raw: i64, #[case] level: AccessLevel) {
        assert_eq!(AccessLevel::from_level(raw).unwrap(), level);
        assert_eq!(i64::from(level.level()), raw);
    }

    #[rstest]
    #[case(-1)]
    #[case(3)]
    fn test_unknown_level(#[case] raw: i64) {
        assert_eq!(
            AccessLevel::from_level(raw),
            Err(RoleError::UnknownLevel(raw))
        );
    }

    #[test]
    fn test_first_account_bootstraps() {
        assert_eq!(AccessLevel::for_new_account(0), AccessLevel::SuperAdmin);
        assert_eq!(AccessLevel::for_new_account(1), AccessLevel::Member);
        assert_eq!(AccessLevel::for_new_account(42), AccessLevel::Member);
    }

    #[rstest]
    #[case(AccessLevel::SuperAdmin, AccessLevel::Member, AccessLevel::SuperAdmin, true)]
    #[case(AccessLevel::SuperAdmin, AccessLevel::SuperAdmin, AccessLevel::Admin, true)]
    #[case(AccessLevel::Admin, AccessLevel::Member, AccessLevel::Admin, true)]
    #[case(AccessLevel::Admin, AccessLevel::Admin, AccessLevel::Member, true)]
    #[case(AccessLevel::Admin, AccessLevel::Member, AccessLevel::SuperAdmin, false)]
    #[case(AccessLevel::Admin, AccessLevel::SuperAdmin, AccessLevel::Member, false)]
    #[case(AccessLevel::Member, AccessLevel::Member, AccessLevel::Admin, false)]
    fn test_role_change_matrix(
        #[case] caller: AccessLevel,
        #[case] current: AccessLevel,
        #[case] requested: AccessLevel,
        #[case] allowed: bool,
    ) {
        let result = authorize_role_change(caller, false, current, requested);
        assert_eq!(result.is_ok(), allowed);
    }

    #[test]
    fn test_cannot_change_own_level() {
        let result = authorize_role_change(
            AccessLevel::SuperAdmin,
            true,
            AccessLevel::SuperAdmin,
            AccessLevel::Member,
        );
        assert!(matches!(result, Err(RoleError::InsufficientPrivilege(_))));
    }
}
