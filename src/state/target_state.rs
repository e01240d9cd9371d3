/// Target state definitions for tracking fetch progress
///
/// Every target moves `Pending -> InFlight -> {Succeeded, Failed}` exactly once.
use std::fmt;

/// Represents the current state of a target in the fetch pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetState {
    // ===== Active States =====
    /// Target has been accepted but its task has not started fetching
    Pending,

    /// Request is on the wire or the body is being written
    InFlight,

    // ===== Terminal States =====
    /// Body was fetched and written to disk
    Succeeded,

    /// Network or write failure; nothing was reported for this target
    Failed,
}

impl TargetState {
    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: TargetState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::InFlight)
                | (Self::InFlight, Self::Succeeded)
                | (Self::InFlight, Self::Failed)
        )
    }

    /// Short lowercase label used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InFlight => "in_flight",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
