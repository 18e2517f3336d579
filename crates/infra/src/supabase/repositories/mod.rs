pub mod earnings;
pub mod follows;
pub mod livestreams;
pub mod notifications;
pub mod posts;
pub mod subscriptions;
pub mod transactions;

use serde::Deserialize;
use uuid::Uuid;

/// Shape of `return=representation` responses when only the key matters.
#[derive(Debug, Deserialize)]
pub(crate) struct InsertedRow {
    pub id: Uuid,
}
