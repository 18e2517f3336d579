use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// String forms match the `transaction_type` column of `transactions`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Subscription,
    PostUnlock,
    LivestreamTicket,
    Tip,
    Gift,
    PpvUnlock,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let transaction_type = match self {
            TransactionType::Subscription => "subscription",
            TransactionType::PostUnlock => "post_unlock",
            TransactionType::LivestreamTicket => "livestream_ticket",
            TransactionType::Tip => "tip",
            TransactionType::Gift => "gift",
            TransactionType::PpvUnlock => "ppv_unlock",
        };
        write!(f, "{}", transaction_type)
    }
}
