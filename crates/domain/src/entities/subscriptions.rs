use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of `subscriptions`, unique on (subscriber_id, creator_id).
/// Renewals upsert the same row; expiry is passive via `expires_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub creator_id: Uuid,
    pub price_paid: i64,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSubscription {
    pub subscriber_id: Uuid,
    pub creator_id: Uuid,
    pub price_paid: i64,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
}
