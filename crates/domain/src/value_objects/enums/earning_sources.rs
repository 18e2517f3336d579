use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// String forms match the `source_type` column of `creator_earnings`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum EarningSource {
    Subscription,
    PostUnlock,
    LivestreamTicket,
    Tip,
    Gift,
}

impl Display for EarningSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match self {
            EarningSource::Subscription => "subscription",
            EarningSource::PostUnlock => "post_unlock",
            EarningSource::LivestreamTicket => "livestream_ticket",
            EarningSource::Tip => "tip",
            EarningSource::Gift => "gift",
        };
        write!(f, "{}", source)
    }
}
