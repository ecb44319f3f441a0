use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states shared by queue items and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueState {
    /// Initial state when an item enters the queue
    New,
    /// A responder has started working the item
    InProgress,
    /// Item finished; terminal and absorbing
    Completed,
    /// Deferred to a caller-supplied future time
    Snoozed,
    /// Stalled past its timeout and handed to the escalation engine
    Escalated,
}

impl QueueState {
    /// Check if this is a terminal state (no outgoing transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Check if this state counts as actively being worked.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress | Self::Escalated)
    }

    /// All states, for exhaustive table checks.
    pub const ALL: [QueueState; 5] = [
        Self::New,
        Self::InProgress,
        Self::Completed,
        Self::Snoozed,
        Self::Escalated,
    ];
}

impl fmt::Display for QueueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Snoozed => write!(f, "snoozed"),
            Self::Escalated => write!(f, "escalated"),
        }
    }
}

impl std::str::FromStr for QueueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "snoozed" => Ok(Self::Snoozed),
            "escalated" => Ok(Self::Escalated),
            _ => Err(format!("Invalid queue state: {s}")),
        }
    }
}

impl Default for QueueState {
    fn default() -> Self {
        Self::New
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_check() {
        assert!(QueueState::Completed.is_terminal());
        assert!(!QueueState::New.is_terminal());
        assert!(!QueueState::InProgress.is_terminal());
        assert!(!QueueState::Snoozed.is_terminal());
        assert!(!QueueState::Escalated.is_terminal());
    }

    #[test]
    fn test_state_string_conversion() {
        assert_eq!(QueueState::InProgress.to_string(), "in_progress");
        assert_eq!("snoozed".parse::<QueueState>().unwrap(), QueueState::Snoozed);
        assert!("done".parse::<QueueState>().is_err());
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&QueueState::Escalated).unwrap();
        assert_eq!(json, "\"escalated\"");
        let parsed: QueueState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, QueueState::Escalated);
    }
}
