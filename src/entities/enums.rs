//! Enumerations used by the entities

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of a gathering post.
///
/// Stored as its [`as_str`](GatheringStatus::as_str) name in `gatherings.status`. The allowed moves are
/// listed in [`GatheringStatus::can_transition_to`]; `Deleted` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatheringStatus {
    /// Recruiting participants
    Gathering,
    /// Participant maximum reached
    GatheringConfirmed,
    /// Closed early by the owner, waiting for the proceed/cancel decision
    GatheringPending,
    /// The owner decided to go ahead with whoever enrolled
    GatheringFinished,
    Deleted,
}

impl GatheringStatus {
    pub fn can_transition_to(self, next: GatheringStatus) -> bool {
        use GatheringStatus::*;
        matches!(
            (self, next),
            (Gathering, GatheringConfirmed)
                | (Gathering, GatheringPending)
                | (Gathering, Deleted)
                | (GatheringPending, GatheringFinished)
                | (GatheringPending, Deleted)
                | (GatheringConfirmed, Deleted)
                | (GatheringFinished, Deleted)
        )
    }

    pub fn is_recruiting(self) -> bool {
        self == GatheringStatus::Gathering
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GatheringStatus::Gathering => "GATHERING",
            GatheringStatus::GatheringConfirmed => "GATHERING_CONFIRMED",
            GatheringStatus::GatheringPending => "GATHERING_PENDING",
            GatheringStatus::GatheringFinished => "GATHERING_FINISHED",
            GatheringStatus::Deleted => "DELETED",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown gathering status: {0}")]
pub struct UnknownGatheringStatus(pub String);

/// Column decoding (`#[sqlx(try_from = "String")]` on the entity)
impl TryFrom<String> for GatheringStatus {
    type Error = UnknownGatheringStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "GATHERING" => Ok(GatheringStatus::Gathering),
            "GATHERING_CONFIRMED" => Ok(GatheringStatus::GatheringConfirmed),
            "GATHERING_PENDING" => Ok(GatheringStatus::GatheringPending),
            "GATHERING_FINISHED" => Ok(GatheringStatus::GatheringFinished),
            "DELETED" => Ok(GatheringStatus::Deleted),
            _ => Err(UnknownGatheringStatus(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GatheringStatus::{self, *};

    const ALL: [GatheringStatus; 5] = [
        Gathering,
        GatheringConfirmed,
        GatheringPending,
        GatheringFinished,
        Deleted,
    ];

    #[test]
    fn test_recruiting_gathering_can_be_confirmed_closed_or_deleted() {
        assert!(Gathering.can_transition_to(GatheringConfirmed));
        assert!(Gathering.can_transition_to(GatheringPending));
        assert!(Gathering.can_transition_to(Deleted));
        assert!(!Gathering.can_transition_to(GatheringFinished));
        assert!(!Gathering.can_transition_to(Gathering));
    }

    #[test]
    fn test_pending_gathering_only_accepts_a_decision() {
        assert!(GatheringPending.can_transition_to(GatheringFinished));
        assert!(GatheringPending.can_transition_to(Deleted));
        assert!(!GatheringPending.can_transition_to(GatheringConfirmed));
        assert!(!GatheringPending.can_transition_to(Gathering));
    }

    #[test]
    fn test_deleted_is_terminal() {
        for next in ALL {
            assert!(!Deleted.can_transition_to(next), "DELETED -> {:?}", next);
        }
    }

    #[test]
    fn test_no_status_goes_back_to_recruiting() {
        for from in ALL {
            assert!(!from.can_transition_to(Gathering), "{:?} -> GATHERING", from);
        }
    }

    #[test]
    fn test_serialized_name_matches_column_value() {
        for status in ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(GatheringStatus::try_from(status.as_str().to_string()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_column_value_is_rejected() {
        assert!(GatheringStatus::try_from("OPEN".to_string()).is_err());
        assert!(GatheringStatus::try_from("gathering".to_string()).is_err());
    }
}
