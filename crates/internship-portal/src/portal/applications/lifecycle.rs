//! Application status state machine.
//!
//! Every legal edge lives in [`ApplicationStatus::transition`]; callers never
//! compare statuses themselves before mutating a record.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::ApplicationStatus;

/// Requested status change, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationAction {
    /// Company accepts the candidate.
    Accept,
    /// Company turns the candidate down.
    Reject,
    /// Student takes the accepted internship.
    Confirm,
    /// Student withdraws from an accepted internship. Cannot be undone.
    Decline,
}

impl ApplicationAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Confirm => "confirm",
            Self::Decline => "decline",
        }
    }

    /// Boundaries must collect an explicit confirmation before invoking these.
    pub const fn is_irreversible(self) -> bool {
        matches!(self, Self::Decline)
    }

    /// Gate used by every boundary before dispatching an action.
    pub fn check_acknowledged(self, acknowledged: bool) -> Result<(), AcknowledgementRequired> {
        if self.is_irreversible() && !acknowledged {
            Err(AcknowledgementRequired(self))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} cannot be undone and needs explicit acknowledgement")]
pub struct AcknowledgementRequired(pub ApplicationAction);

impl fmt::Display for ApplicationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Action together with the side-effect data it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Accept {
        responded_on: NaiveDate,
    },
    Reject {
        responded_on: NaiveDate,
        comment: Option<String>,
    },
    Confirm,
    Decline,
}

impl Transition {
    pub const fn action(&self) -> ApplicationAction {
        match self {
            Self::Accept { .. } => ApplicationAction::Accept,
            Self::Reject { .. } => ApplicationAction::Reject,
            Self::Confirm => ApplicationAction::Confirm,
            Self::Decline => ApplicationAction::Decline,
        }
    }

    /// Date the company answered, for transitions that record one.
    pub fn responded_on(&self) -> Option<NaiveDate> {
        match self {
            Self::Accept { responded_on } | Self::Reject { responded_on, .. } => {
                Some(*responded_on)
            }
            Self::Confirm | Self::Decline => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} an application that is {from}")]
pub struct TransitionError {
    pub from: ApplicationStatus,
    pub action: ApplicationAction,
}

impl ApplicationStatus {
    pub fn transition(self, action: ApplicationAction) -> Result<Self, TransitionError> {
        use ApplicationAction as A;
        use ApplicationStatus as S;

        match (self, action) {
            (S::Awaiting, A::Accept) => Ok(S::Accepted),
            (S::Awaiting, A::Reject) => Ok(S::Rejected),
            (S::Accepted, A::Confirm) => Ok(S::Confirmed),
            (S::Accepted, A::Decline) => Ok(S::Declined),
            (from, action) => Err(TransitionError { from, action }),
        }
    }

    pub fn allowed_actions(self) -> Vec<ApplicationAction> {
        [
            ApplicationAction::Accept,
            ApplicationAction::Reject,
            ApplicationAction::Confirm,
            ApplicationAction::Decline,
        ]
        .into_iter()
        .filter(|action| self.transition(*action).is_ok())
        .collect()
    }
}
