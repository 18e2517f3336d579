use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewSubscriber,
    PostUnlocked,
    TicketPurchased,
    TipReceived,
    GiftReceived,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            NotificationKind::NewSubscriber => "new_subscriber",
            NotificationKind::PostUnlocked => "post_unlocked",
            NotificationKind::TicketPurchased => "ticket_purchased",
            NotificationKind::TipReceived => "tip_received",
            NotificationKind::GiftReceived => "gift_received",
        };
        write!(f, "{}", kind)
    }
}
