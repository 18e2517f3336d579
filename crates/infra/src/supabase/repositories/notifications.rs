use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use domain::entities::notifications::NewNotification;
use domain::repositories::notifications::NotificationRepository;

use crate::supabase::client::SupabaseClient;

use super::InsertedRow;

pub struct SupabaseNotificationRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseNotificationRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationRepository for SupabaseNotificationRepository {
    async fn insert(&self, notification: NewNotification) -> Result<()> {
        let _: InsertedRow = self
            .client
            .insert("notifications", &notification, "insert notification")
            .await?;
        Ok(())
    }
}
