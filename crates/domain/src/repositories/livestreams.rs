use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::livestreams::{LivestreamEntity, NewLivestreamTicket};

#[async_trait]
#[automock]
pub trait LivestreamRepository {
    async fn find_livestream(&self, livestream_id: Uuid) -> Result<Option<LivestreamEntity>>;

    async fn has_ticket(&self, livestream_id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Stars-rail only; token-rail tickets are recorded by the stored
    /// procedure.
    async fn record_ticket(&self, ticket: NewLivestreamTicket) -> Result<Uuid>;
}
