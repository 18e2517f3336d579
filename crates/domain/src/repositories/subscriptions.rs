use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::subscriptions::{NewSubscription, SubscriptionEntity};

#[async_trait]
#[automock]
pub trait SubscriptionRepository {
    /// Active and unexpired subscription of `subscriber` to `creator`.
    async fn find_active(
        &self,
        subscriber: Uuid,
        creator: Uuid,
    ) -> Result<Option<SubscriptionEntity>>;

    /// Upsert on (subscriber_id, creator_id); renewals overwrite the row.
    async fn upsert(&self, subscription: NewSubscription) -> Result<Uuid>;

    async fn is_active_subscriber(&self, subscriber: Uuid, creator: Uuid) -> Result<bool>;
}
