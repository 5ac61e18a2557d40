use super::INotificationHistoryRepo;
use crate::repos::shared::{inmemory_repo::*, Collection};
use revisit_domain::{NotificationHistory, NotificationStatus, ReviewCycle, ID};
use tracing::warn;

pub struct InMemoryNotificationHistoryRepo {
    review_cycles: Collection<ReviewCycle>,
    notification_histories: Collection<NotificationHistory>,
}

impl InMemoryNotificationHistoryRepo {
    pub fn new(
        review_cycles: Collection<ReviewCycle>,
        notification_histories: Collection<NotificationHistory>,
    ) -> Self {
        Self {
            review_cycles,
            notification_histories,
        }
    }
}

#[async_trait::async_trait]
impl INotificationHistoryRepo for InMemoryNotificationHistoryRepo {
    async fn record(
        &self,
        cycle_ids: &[ID],
        status: NotificationStatus,
        created: i64,
    ) -> anyhow::Result<()> {
        update_many(
            &self.review_cycles,
            |cycle| cycle_ids.contains(&cycle.id),
            |cycle| {
                if !cycle.transition(status) {
                    warn!(
                        "Review cycle: {} is already in terminal status: {}, not overwriting with: {}",
                        cycle.id, cycle.status, status
                    );
                }
            },
        );

        for cycle_id in cycle_ids {
            insert(
                &NotificationHistory::new(cycle_id.clone(), status, created),
                &self.notification_histories,
            );
        }
        Ok(())
    }

    async fn find_by_cycle(&self, cycle_id: &ID) -> Vec<NotificationHistory> {
        find_by(&self.notification_histories, |history| {
            history.review_cycle_id == *cycle_id
        })
    }
}
