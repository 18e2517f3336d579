use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only creator-side revenue ledger, separate from the live balance.
/// `amount` is gross; `net_amount` is what was actually credited.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatorEarningEntity {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub amount: i64,
    pub source_type: String,
    pub source_id: Uuid,
    pub from_user_id: Uuid,
    pub platform_fee: i64,
    pub net_amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCreatorEarning {
    pub creator_id: Uuid,
    pub amount: i64,
    pub source_type: String,
    pub source_id: Uuid,
    pub from_user_id: Uuid,
    pub platform_fee: i64,
    pub net_amount: i64,
}
