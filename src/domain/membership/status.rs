//! Membership status state machine.
//!
//! The status is never stored directly; it is derived from the record's
//! `is_completed`, `is_cancelled` and `is_upgraded` flags.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Freshly enrolled.
    Active,

    /// Moved to another tier. Still running.
    Upgraded,

    /// Ran its course or was superseded by a new enrollment.
    Completed,

    /// Ended early with a refund.
    Cancelled,
}

impl MembershipStatus {
    /// Derives the status from persisted flags. Cancellation wins over completion.
    pub fn from_flags(is_completed: bool, is_cancelled: bool, is_upgraded: bool) -> Self {
        if is_cancelled {
            MembershipStatus::Cancelled
        } else if is_completed {
            MembershipStatus::Completed
        } else if is_upgraded {
            MembershipStatus::Upgraded
        } else {
            MembershipStatus::Active
        }
    }
}

impl StateMachine for MembershipStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MembershipStatus::*;
        matches!(
            (self, target),
            (Active, Upgraded)
                | (Active, Completed)
                | (Active, Cancelled)
                | (Upgraded, Upgraded) // Repeated upgrade
                | (Upgraded, Completed)
                | (Upgraded, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MembershipStatus::*;
        match self {
            Active => vec![Upgraded, Completed, Cancelled],
            Upgraded => vec![Upgraded, Completed, Cancelled],
            Completed | Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MembershipStatus; 4] = [
        MembershipStatus::Active,
        MembershipStatus::Upgraded,
        MembershipStatus::Completed,
        MembershipStatus::Cancelled,
    ];

    #[test]
    fn active_can_upgrade_complete_or_cancel() {
        let status = MembershipStatus::Active;
        assert!(status.can_transition_to(&MembershipStatus::Upgraded));
        assert!(status.can_transition_to(&MembershipStatus::Completed));
        assert!(status.can_transition_to(&MembershipStatus::Cancelled));
        assert!(!status.can_transition_to(&MembershipStatus::Active));
    }

    #[test]
    fn upgraded_can_upgrade_again() {
        assert_eq!(
            MembershipStatus::Upgraded.transition_to(MembershipStatus::Upgraded),
            Ok(MembershipStatus::Upgraded)
        );
    }

    #[test]
    fn completed_and_cancelled_are_absorbing() {
        for terminal in [MembershipStatus::Completed, MembershipStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for target in ALL {
                assert!(terminal.transition_to(target).is_err());
            }
        }
    }

    #[test]
    fn running_statuses_are_not_terminal() {
        assert!(!MembershipStatus::Active.is_terminal());
        assert!(!MembershipStatus::Upgraded.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn from_flags_prefers_cancelled_over_completed() {
        assert_eq!(
            MembershipStatus::from_flags(true, true, true),
            MembershipStatus::Cancelled
        );
        assert_eq!(
            MembershipStatus::from_flags(true, false, true),
            MembershipStatus::Completed
        );
        assert_eq!(
            MembershipStatus::from_flags(false, false, true),
            MembershipStatus::Upgraded
        );
        assert_eq!(
            MembershipStatus::from_flags(false, false, false),
            MembershipStatus::Active
        );
    }
}
