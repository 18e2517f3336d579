use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::posts::{NewPostPurchase, PostEntity};

#[async_trait]
#[automock]
pub trait PostRepository {
    async fn find_post(&self, post_id: Uuid) -> Result<Option<PostEntity>>;

    async fn has_purchased(&self, user_id: Uuid, post_id: Uuid) -> Result<bool>;

    /// Stars-rail only; token-rail purchases are recorded by the stored
    /// procedure.
    async fn record_purchase(&self, purchase: NewPostPurchase) -> Result<Uuid>;
}
