use serde::Deserialize;
use uuid::Uuid;

/// One row of the `balances` table: the live spendable token count for a user.
/// The backend is the only writer; this value is a per-request cache of the
/// server's truth and is never mutated locally.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceEntity {
    pub user_id: Uuid,
    pub balance: i64,
}
