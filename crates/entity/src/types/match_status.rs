use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;

/// The lifecycle state of a match.
///
/// The allowed transitions are:
///
/// ```text
/// SCHEDULED ──> ONGOING ──> COMPLETED
///     │            │
///     └────────────┴──────> CANCELED
/// ```
///
/// `COMPLETED` and `CANCELED` are terminal.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// The match is planned but hasn't started yet.
    #[default]
    #[sea_orm(string_value = "SCHEDULED")]
    Scheduled,
    /// The match is being played. This is the only state in which stats can change.
    #[sea_orm(string_value = "ONGOING")]
    Ongoing,
    /// The match is over.
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// The match won't be played.
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

impl MatchStatus {
    /// Returns the name of the status, as stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Ongoing => "ONGOING",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Returns whether no transition can leave this status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    /// Returns whether the match can go from this status to the provided one.
    ///
    /// Staying in the same status isn't considered as a transition.
    pub const fn can_transition_to(self, to: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, to),
            (Self::Scheduled, Self::Ongoing)
                | (Self::Ongoing, Self::Completed)
                | (_, Self::Canceled)
        )
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unknown match status `{0}`")]
pub struct UnknownMatchStatus(pub String);

impl FromStr for MatchStatus {
    type Err = UnknownMatchStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(Self::Scheduled),
            "ONGOING" => Ok(Self::Ongoing),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELED" => Ok(Self::Canceled),
            other => Err(UnknownMatchStatus(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MatchStatus::{self, *};

    const ALL: [MatchStatus; 4] = [Scheduled, Ongoing, Completed, Canceled];

    #[test]
    fn legal_transitions() {
        assert!(Scheduled.can_transition_to(Ongoing));
        assert!(Ongoing.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Canceled));
        assert!(Ongoing.can_transition_to(Canceled));
    }

    #[test]
    fn terminal_states_stay_terminal() {
        assert!(Completed.is_terminal() && Canceled.is_terminal());
        assert!(!Scheduled.is_terminal() && !Ongoing.is_terminal());
        for to in ALL {
            assert!(!Completed.can_transition_to(to), "COMPLETED -> {to}");
            assert!(!Canceled.can_transition_to(to), "CANCELED -> {to}");
        }
    }

    #[test]
    fn no_going_back() {
        assert!(!Completed.can_transition_to(Ongoing));
        assert!(!Ongoing.can_transition_to(Scheduled));
        assert!(!Scheduled.can_transition_to(Completed));
        for s in ALL {
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn parse_roundtrip() {
        for s in ALL {
            assert_eq!(s.as_str().parse::<MatchStatus>().unwrap(), s);
        }
        assert!("ongoing".parse::<MatchStatus>().is_err());
    }
}
