use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::enums::content_visibility::ContentVisibility;

/// Read-only projection of a `posts` row, limited to the fields the access
/// gates and purchase flow need.
#[derive(Debug, Clone, Deserialize)]
pub struct PostEntity {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub visibility: ContentVisibility,
    pub price: i64,
    pub is_ppv: bool,
}

/// One row of `post_purchases`: a permanent unlock of one post for one user.
#[derive(Debug, Clone, Deserialize)]
pub struct PostPurchaseEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPostPurchase {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub amount: i64,
}
