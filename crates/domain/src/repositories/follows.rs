use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

#[async_trait]
#[automock]
pub trait FollowRepository {
    async fn is_follower(&self, follower: Uuid, creator: Uuid) -> Result<bool>;
}
