use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::earnings::NewCreatorEarning;

#[async_trait]
#[automock]
pub trait EarningRepository {
    async fn record_earning(&self, earning: NewCreatorEarning) -> Result<Uuid>;
}
