use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

/// Typed rejection surface of the ledger's stored procedures. Everything the
/// backend can refuse for a business reason gets its own kind; transport and
/// decode failures collapse into `Backend`.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance")]
    InsufficientBalance,
    #[error("already purchased")]
    DuplicatePurchase,
    #[error("{0} not found")]
    NotFound(String),
    #[error("rejected by ledger: {0}")]
    Rejected(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Returned by every atomic procedure: the id of the payer-side
/// `transactions` row the procedure wrote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerReceipt {
    pub transaction_id: Uuid,
}

/// Client for the external token ledger.
///
/// Every token-rail money movement is one server-side atomic stored
/// procedure: debit, domain record, payout and audit rows commit together or
/// not at all. This trait exposes only those atomic entry points plus the
/// balance read and `credit`.
///
/// `credit` (the `add_to_balance` procedure) remains for stars-rail payouts.
/// It is NOT idempotent: invoking it twice credits twice.
#[async_trait]
#[automock]
pub trait LedgerRepository {
    /// Read-only; two calls with no intervening mutation return the same
    /// value.
    async fn balance_of(&self, user_id: Uuid) -> anyhow::Result<i64>;

    async fn credit(&self, user_id: Uuid, amount: i64, reason: &str) -> anyhow::Result<()>;

    async fn send_tip(
        &self,
        sender: Uuid,
        recipient: Uuid,
        amount: i64,
    ) -> LedgerResult<LedgerReceipt>;

    async fn send_gift(
        &self,
        sender: Uuid,
        recipient: Uuid,
        conversation_id: Uuid,
        gift_id: Uuid,
        price: i64,
    ) -> LedgerResult<LedgerReceipt>;

    /// Idempotent server-side: a second unlock of the same message is
    /// rejected with `DuplicatePurchase` and debits nothing.
    async fn unlock_ppv(&self, message_id: Uuid, user_id: Uuid) -> LedgerResult<LedgerReceipt>;

    async fn subscribe(
        &self,
        subscriber: Uuid,
        creator: Uuid,
        price: i64,
    ) -> LedgerResult<LedgerReceipt>;

    async fn unlock_post(
        &self,
        buyer: Uuid,
        post_id: Uuid,
        price: i64,
    ) -> LedgerResult<LedgerReceipt>;

    async fn buy_ticket(
        &self,
        viewer: Uuid,
        livestream_id: Uuid,
        price: i64,
    ) -> LedgerResult<LedgerReceipt>;
}
