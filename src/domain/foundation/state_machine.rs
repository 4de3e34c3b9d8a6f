//! State machine trait for status enums.
//!
//! Lifecycle statuses implement this to declare their legal transitions
//! in one place and get a validated `transition_to` for free.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// ```ignore
/// impl StateMachine for MembershipStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         self.valid_transitions().contains(target)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Active => vec![Upgraded, Completed, Cancelled],
///             Completed | Cancelled => vec![],
///             // ...
///         }
///     }
/// }
///
/// let next = status.transition_to(MembershipStatus::Cancelled)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Closed,
        Open,
        Bricked,
    }

    impl StateMachine for Door {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Door::Closed => vec![Door::Open, Door::Bricked],
                Door::Open => vec![Door::Closed],
                Door::Bricked => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Door::Closed.transition_to(Door::Open), Ok(Door::Open));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Door::Open.transition_to(Door::Bricked).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Open to Bricked"));
    }

    #[test]
    fn terminal_state_has_no_exits() {
        assert!(Door::Bricked.is_terminal());
        assert!(!Door::Closed.is_terminal());
    }
}
