use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::notifications::NewNotification;

#[async_trait]
#[automock]
pub trait NotificationRepository {
    async fn insert(&self, notification: NewNotification) -> Result<()>;
}
