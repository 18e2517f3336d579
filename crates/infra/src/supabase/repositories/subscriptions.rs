use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use domain::entities::subscriptions::{NewSubscription, SubscriptionEntity};
use domain::repositories::subscriptions::SubscriptionRepository;

use crate::supabase::client::SupabaseClient;

use super::InsertedRow;

pub struct SupabaseSubscriptionRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseSubscriptionRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriptionRepository for SupabaseSubscriptionRepository {
    async fn find_active(
        &self,
        subscriber: Uuid,
        creator: Uuid,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut rows: Vec<SubscriptionEntity> = self
            .client
            .select(
                "subscriptions",
                &[
                    ("subscriber_id", format!("eq.{}", subscriber)),
                    ("creator_id", format!("eq.{}", creator)),
                    ("is_active", "eq.true".to_string()),
                    ("expires_at", format!("gt.{}", Utc::now().to_rfc3339())),
                    ("limit", "1".to_string()),
                ],
                "find active subscription",
            )
            .await?;
        Ok(rows.pop())
    }

    async fn upsert(&self, subscription: NewSubscription) -> Result<Uuid> {
        let row: InsertedRow = self
            .client
            .upsert(
                "subscriptions",
                "subscriber_id,creator_id",
                &subscription,
                "upsert subscription",
            )
            .await?;
        Ok(row.id)
    }

    async fn is_active_subscriber(&self, subscriber: Uuid, creator: Uuid) -> Result<bool> {
        Ok(self.find_active(subscriber, creator).await?.is_some())
    }
}
