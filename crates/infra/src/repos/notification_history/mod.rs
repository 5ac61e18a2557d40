mod inmemory;
mod postgres;

use revisit_domain::{NotificationHistory, NotificationStatus, ID};

pub use inmemory::InMemoryNotificationHistoryRepo;
pub use postgres::PostgresNotificationHistoryRepo;

#[async_trait::async_trait]
pub trait INotificationHistoryRepo: Send + Sync {
    /// Records the outcome of one delivery attempt for a group of
    /// cycles: moves each cycle that is still pending to the given
    /// terminal status and appends one history row per cycle, all in
    /// one transaction. Cycles already in a terminal state keep it.
    async fn record(
        &self,
        cycle_ids: &[ID],
        status: NotificationStatus,
        created: i64,
    ) -> anyhow::Result<()>;
    async fn find_by_cycle(&self, cycle_id: &ID) -> Vec<NotificationHistory>;
}

#[cfg(test)]
mod test {
    use crate::repos::Repos;
    use revisit_domain::{
        Member, NotificationStatus, Review, ReviewCycle, ReviewCycleInterval, ReviewUrl,
    };

    async fn insert_cycles(repos: &Repos) -> Vec<ReviewCycle> {
        let member = Member::new("alice@example.com".parse().unwrap());
        repos.members.insert(&member).await.unwrap();
        let review = Review::new(
            member.id.clone(),
            ReviewUrl::new("https://example.com/a").unwrap(),
            0,
        );
        let anchor = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let cycles = ReviewCycleInterval::calculate_default(anchor)
            .into_iter()
            .map(|scheduled_at| ReviewCycle::new(review.id.clone(), scheduled_at))
            .collect::<Vec<_>>();
        repos
            .reviews
            .insert_with_schedule(&review, &cycles, &[])
            .await
            .unwrap();
        cycles
    }

    #[tokio::test]
    async fn record_moves_cycles_to_terminal_status_and_appends_history() {
        let repos = Repos::create_inmemory();
        let cycles = insert_cycles(&repos).await;
        let ids = vec![cycles[0].id.clone(), cycles[1].id.clone()];

        repos
            .notification_histories
            .record(&ids, NotificationStatus::Sent, 42)
            .await
            .unwrap();

        for id in &ids {
            let cycle = repos.review_cycles.find(id).await.unwrap();
            assert_eq!(cycle.status, NotificationStatus::Sent);

            let histories = repos.notification_histories.find_by_cycle(id).await;
            assert_eq!(histories.len(), 1);
            assert_eq!(histories[0].status, NotificationStatus::Sent);
            assert_eq!(histories[0].created, 42);
        }

        // Untouched cycles stay pending
        let cycle = repos.review_cycles.find(&cycles[2].id).await.unwrap();
        assert_eq!(cycle.status, NotificationStatus::Pending);
    }

    #[tokio::test]
    async fn record_never_overwrites_terminal_status() {
        let repos = Repos::create_inmemory();
        let cycles = insert_cycles(&repos).await;
        let ids = vec![cycles[0].id.clone()];

        repos
            .notification_histories
            .record(&ids, NotificationStatus::Failed, 1)
            .await
            .unwrap();
        repos
            .notification_histories
            .record(&ids, NotificationStatus::Sent, 2)
            .await
            .unwrap();

        let cycle = repos.review_cycles.find(&cycles[0].id).await.unwrap();
        assert_eq!(cycle.status, NotificationStatus::Failed);

        // The history log keeps both attempts
        let histories = repos.notification_histories.find_by_cycle(&cycles[0].id).await;
        assert_eq!(histories.len(), 2);
    }
}
