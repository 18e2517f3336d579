use std::fmt::Display;

use serde::Serialize;

/// Structured access decision returned by the read-only gate evaluators.
/// `reason` is only present on denial and carries the human-readable message
/// the UI shows next to the paywall or subscribe prompt.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: Option<DenyReason>,
}

impl AccessDecision {
    pub fn granted() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: DenyReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DenyReason {
    FollowersOnly,
    SubscribersOnly,
    TicketRequired { price: i64 },
    PpvLocked { price: i64 },
}

impl Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenyReason::FollowersOnly => write!(f, "this post is for followers only"),
            DenyReason::SubscribersOnly => write!(f, "this post is for subscribers only"),
            DenyReason::TicketRequired { price } => {
                write!(f, "entry to this stream costs {} tokens", price)
            }
            DenyReason::PpvLocked { price } => {
                write!(f, "unlock this content for {} tokens", price)
            }
        }
    }
}
