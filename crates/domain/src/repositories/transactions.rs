use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::transactions::NewTransaction;

/// Audit-row writer for the stars rail. Token-rail rows are written by the
/// atomic procedures server-side.
#[async_trait]
#[automock]
pub trait TransactionRepository {
    async fn record(&self, transaction: NewTransaction) -> Result<Uuid>;
}
