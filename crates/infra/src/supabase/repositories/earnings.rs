use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use domain::entities::earnings::NewCreatorEarning;
use domain::repositories::earnings::EarningRepository;

use crate::supabase::client::SupabaseClient;

use super::InsertedRow;

pub struct SupabaseEarningRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseEarningRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EarningRepository for SupabaseEarningRepository {
    async fn record_earning(&self, earning: NewCreatorEarning) -> Result<Uuid> {
        let row: InsertedRow = self
            .client
            .insert("creator_earnings", &earning, "record creator earning")
            .await?;
        Ok(row.id)
    }
}
