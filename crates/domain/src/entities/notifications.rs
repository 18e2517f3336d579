use serde::Serialize;
use uuid::Uuid;

use crate::value_objects::enums::notification_kinds::NotificationKind;

/// Best-effort side-effect row. Inserts are fire-and-forget: a failed insert
/// is logged, never surfaced to the payer.
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub actor_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub body: String,
}
