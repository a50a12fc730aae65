use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::subscription::SubscriptionType;

/// Durable record that a subscriber should be informed of one past change.
///
/// Rows are append-only: after creation the only mutation is flipping
/// `marked_as_read`. Read rows persist and are filtered out on delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: uuid::Uuid,
    pub document_id: uuid::Uuid,
    pub subscriber_id: uuid::Uuid,
    /// User whose edit triggered the notification.
    pub editor_id: uuid::Uuid,
    pub kind: SubscriptionType,
    pub marked_as_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    #[must_use]
    pub fn new(
        document_id: uuid::Uuid,
        subscriber_id: uuid::Uuid,
        editor_id: uuid::Uuid,
        kind: SubscriptionType,
    ) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            document_id,
            subscriber_id,
            editor_id,
            kind,
            marked_as_read: false,
            created_at: Utc::now(),
        }
    }
}
