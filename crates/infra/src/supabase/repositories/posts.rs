use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use domain::entities::posts::{NewPostPurchase, PostEntity};
use domain::repositories::posts::PostRepository;

use crate::supabase::client::SupabaseClient;

use super::InsertedRow;

pub struct SupabasePostRepository {
    client: Arc<SupabaseClient>,
}

impl SupabasePostRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PostRepository for SupabasePostRepository {
    async fn find_post(&self, post_id: Uuid) -> Result<Option<PostEntity>> {
        let mut rows: Vec<PostEntity> = self
            .client
            .select(
                "posts",
                &[
                    ("id", format!("eq.{}", post_id)),
                    (
                        "select",
                        "id,creator_id,visibility,price,is_ppv".to_string(),
                    ),
                ],
                "find post",
            )
            .await?;
        Ok(rows.pop())
    }

    async fn has_purchased(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        let rows: Vec<InsertedRow> = self
            .client
            .select(
                "post_purchases",
                &[
                    ("user_id", format!("eq.{}", user_id)),
                    ("post_id", format!("eq.{}", post_id)),
                    ("select", "id".to_string()),
                    ("limit", "1".to_string()),
                ],
                "check post purchase",
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn record_purchase(&self, purchase: NewPostPurchase) -> Result<Uuid> {
        let row: InsertedRow = self
            .client
            .insert("post_purchases", &purchase, "record post purchase")
            .await?;
        Ok(row.id)
    }
}
