use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use domain::entities::livestreams::{LivestreamEntity, NewLivestreamTicket};
use domain::repositories::livestreams::LivestreamRepository;

use crate::supabase::client::SupabaseClient;

use super::InsertedRow;

pub struct SupabaseLivestreamRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseLivestreamRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LivestreamRepository for SupabaseLivestreamRepository {
    async fn find_livestream(&self, livestream_id: Uuid) -> Result<Option<LivestreamEntity>> {
        let mut rows: Vec<LivestreamEntity> = self
            .client
            .select(
                "livestreams",
                &[
                    ("id", format!("eq.{}", livestream_id)),
                    (
                        "select",
                        "id,creator_id,entry_price,is_live,channel_name".to_string(),
                    ),
                ],
                "find livestream",
            )
            .await?;
        Ok(rows.pop())
    }

    async fn has_ticket(&self, livestream_id: Uuid, user_id: Uuid) -> Result<bool> {
        let rows: Vec<InsertedRow> = self
            .client
            .select(
                "livestream_tickets",
                &[
                    ("livestream_id", format!("eq.{}", livestream_id)),
                    ("user_id", format!("eq.{}", user_id)),
                    ("select", "id".to_string()),
                    ("limit", "1".to_string()),
                ],
                "check livestream ticket",
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn record_ticket(&self, ticket: NewLivestreamTicket) -> Result<Uuid> {
        let row: InsertedRow = self
            .client
            .insert("livestream_tickets", &ticket, "record livestream ticket")
            .await?;
        Ok(row.id)
    }
}
