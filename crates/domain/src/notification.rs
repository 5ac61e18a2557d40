use crate::review_cycle::NotificationStatus;
use crate::shared::entity::{Entity, ID};

/// An append-only record of one delivery attempt outcome for a
/// `ReviewCycle`. Histories are never updated or deleted, rerunning a
/// dispatch appends new rows.
#[derive(Debug, Clone)]
pub struct NotificationHistory {
    pub id: ID,
    pub review_cycle_id: ID,
    pub status: NotificationStatus,
    /// Timestamp in millis at which the outcome was recorded
    pub created: i64,
}

impl NotificationHistory {
    pub fn new(review_cycle_id: ID, status: NotificationStatus, created: i64) -> Self {
        Self {
            id: Default::default(),
            review_cycle_id,
            status,
            created,
        }
    }
}

impl Entity for NotificationHistory {
    fn id(&self) -> &ID {
        &self.id
    }
}
