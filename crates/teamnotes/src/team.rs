//! Team identities and the access rule.
//!
//! Records are partitioned between a closed set of teams. Team `A` is the
//! admin team: it may read and modify every record. The other teams only see
//! and modify their own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the fixed team identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Team X.
    X,
    /// Team Y.
    Y,
    /// Team Z.
    Z,
    /// The admin team.
    A,
}

impl Team {
    /// Every team, in selection order.
    pub const ALL: [Self; 4] = [Self::X, Self::Y, Self::Z, Self::A];

    /// The team with universal access.
    pub const ADMIN: Self = Self::A;

    /// Single-letter identifier, as stored.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::A => "A",
        }
    }

    /// Human-readable label, e.g. "Team X".
    #[must_use]
    pub fn label(self) -> String {
        format!("Team {}", self.as_str())
    }

    /// Whether this is the admin team.
    #[must_use]
    pub fn is_admin(self) -> bool {
        self == Self::ADMIN
    }

    /// One-line summary of what this team can see.
    #[must_use]
    pub fn access_summary(self) -> String {
        if self.is_admin() {
            "You have access to all data".to_string()
        } else {
            format!("You have access to {} data only", self.label())
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Team {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let letter = trimmed
            .strip_prefix("Team ")
            .or_else(|| trimmed.strip_prefix("team "))
            .unwrap_or(trimmed);
        match letter.to_ascii_uppercase().as_str() {
            "X" => Ok(Self::X),
            "Y" => Ok(Self::Y),
            "Z" => Ok(Self::Z),
            "A" => Ok(Self::A),
            _ => Err(Error::InvalidTeam(s.to_string())),
        }
    }
}

/// Whether `requesting` may read or modify a record owned by `owner`.
///
/// No session means no access. The admin team may access everything;
/// any other team only its own records.
#[must_use]
pub fn can_access(owner: Team, requesting: Option<Team>) -> bool {
    match requesting {
        None => false,
        Some(team) if team.is_admin() => true,
        Some(team) => team == owner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_denied() {
        for owner in Team::ALL {
            assert!(!can_access(owner, None));
        }
    }

    #[test]
    fn test_admin_accesses_everything() {
        for owner in Team::ALL {
            assert!(can_access(owner, Some(Team::A)));
        }
    }

    #[test]
    fn test_team_accesses_only_its_own() {
        for requesting in [Team::X, Team::Y, Team::Z] {
            for owner in Team::ALL {
                assert_eq!(can_access(owner, Some(requesting)), owner == requesting);
            }
        }
    }

    #[test]
    fn test_team_display_and_label() {
        assert_eq!(Team::X.to_string(), "Team X");
        assert_eq!(Team::A.as_str(), "A");
        assert!(Team::A.is_admin());
        assert!(!Team::Z.is_admin());
    }

    #[test]
    fn test_access_summary() {
        assert_eq!(Team::A.access_summary(), "You have access to all data");
        assert_eq!(
            Team::Y.access_summary(),
            "You have access to Team Y data only"
        );
    }

    #[test]
    fn test_parse_team() {
        assert_eq!("x".parse::<Team>().unwrap(), Team::X);
        assert_eq!(" Z ".parse::<Team>().unwrap(), Team::Z);
        assert_eq!("Team Y".parse::<Team>().unwrap(), Team::Y);
        assert_eq!("a".parse::<Team>().unwrap(), Team::A);
    }

    #[test]
    fn test_parse_unknown_team() {
        let err = "Q".parse::<Team>().unwrap_err();
        assert!(matches!(err, Error::InvalidTeam(ref s) if s == "Q"));
    }

    #[test]
    fn test_team_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Team::Y).unwrap(), "\"Y\"");
        let team: Team = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(team, Team::A);
    }
}
