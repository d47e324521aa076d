use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed-order lifecycle cycle for events and athletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStatus {
    Upcoming,
    Active,
    Completed,
}

impl LifecycleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "upcoming" => Some(Self::Upcoming),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// One step forward, wrapping after the terminal state.
    pub fn next(self) -> Self {
        match self {
            Self::Upcoming => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::Upcoming,
        }
    }

    /// Advance from a stored status value. Unrecognized values (e.g. the
    /// `pending` written by bulk upload) enter the cycle at `upcoming`.
    pub fn advance_from(raw: &str) -> Self {
        match Self::parse(raw) {
            Some(status) => status.next(),
            None => Self::Upcoming,
        }
    }
}

impl std::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_advances_one_step() {
        assert_eq!(LifecycleStatus::Upcoming.next(), LifecycleStatus::Active);
        assert_eq!(LifecycleStatus::Active.next(), LifecycleStatus::Completed);
    }

    #[test]
    fn test_cycle_wraps_after_terminal_state() {
        assert_eq!(LifecycleStatus::Completed.next(), LifecycleStatus::Upcoming);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let start = LifecycleStatus::Upcoming;
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_advance_from_stored_values() {
        assert_eq!(
            LifecycleStatus::advance_from("upcoming"),
            LifecycleStatus::Active
        );
        assert_eq!(
            LifecycleStatus::advance_from("completed"),
            LifecycleStatus::Upcoming
        );
    }

    #[test]
    fn test_advance_from_unknown_status_enters_at_upcoming() {
        assert_eq!(
            LifecycleStatus::advance_from("pending"),
            LifecycleStatus::Upcoming
        );
        assert_eq!(LifecycleStatus::advance_from(""), LifecycleStatus::Upcoming);
    }
}
