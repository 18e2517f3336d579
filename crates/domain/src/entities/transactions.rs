use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only audit row in `transactions`. `amount` is signed: debits are
/// negative from the payer's point of view, credits positive.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub transaction_type: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub amount: i64,
    pub transaction_type: String,
    pub status: String,
    pub description: Option<String>,
}
