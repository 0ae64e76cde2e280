//! Presence status shown on profiles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Presence status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    /// Active now.
    Online,
    /// Idle.
    Away,
    /// Not connected.
    #[default]
    Offline,
}

/// Unrecognised presence status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown online status: {0}")]
pub struct UnknownStatus(pub String);

impl OnlineStatus {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }
}

impl std::str::FromStr for OnlineStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "away" => Ok(Self::Away),
            "offline" => Ok(Self::Offline),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("online".parse::<OnlineStatus>(), Ok(OnlineStatus::Online));
        assert_eq!("away".parse::<OnlineStatus>(), Ok(OnlineStatus::Away));
        assert_eq!(OnlineStatus::default().as_str(), "offline");
        assert_eq!(
            "busy".parse::<OnlineStatus>(),
            Err(UnknownStatus("busy".to_string()))
        );
    }
}
