use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use domain::repositories::follows::FollowRepository;

use crate::supabase::client::SupabaseClient;

use super::InsertedRow;

pub struct SupabaseFollowRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseFollowRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FollowRepository for SupabaseFollowRepository {
    async fn is_follower(&self, follower: Uuid, creator: Uuid) -> Result<bool> {
        let rows: Vec<InsertedRow> = self
            .client
            .select(
                "follows",
                &[
                    ("follower_id", format!("eq.{}", follower)),
                    ("creator_id", format!("eq.{}", creator)),
                    ("select", "id".to_string()),
                    ("limit", "1".to_string()),
                ],
                "check follow",
            )
            .await?;
        Ok(!rows.is_empty())
    }
}
