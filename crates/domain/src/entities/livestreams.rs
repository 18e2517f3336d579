use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only projection of a `livestreams` row. `channel_name` is handed to
/// the media SDK by the caller once access is granted; this layer never
/// touches the SDK itself.
#[derive(Debug, Clone, Deserialize)]
pub struct LivestreamEntity {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub entry_price: i64,
    pub is_live: bool,
    pub channel_name: String,
}

/// Proof-of-purchase row granting entry to a priced livestream.
#[derive(Debug, Clone, Deserialize)]
pub struct LivestreamTicketEntity {
    pub id: Uuid,
    pub livestream_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewLivestreamTicket {
    pub livestream_id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
}
