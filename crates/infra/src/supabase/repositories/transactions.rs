use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use domain::entities::transactions::NewTransaction;
use domain::repositories::transactions::TransactionRepository;

use crate::supabase::client::SupabaseClient;

use super::InsertedRow;

pub struct SupabaseTransactionRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseTransactionRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransactionRepository for SupabaseTransactionRepository {
    async fn record(&self, transaction: NewTransaction) -> Result<Uuid> {
        let row: InsertedRow = self
            .client
            .insert("transactions", &transaction, "record transaction")
            .await?;
        Ok(row.id)
    }
}
