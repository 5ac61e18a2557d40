mod inmemory;
mod postgres;

use revisit_domain::{NotificationHistory, Review, ReviewCycle, ID};

pub use inmemory::InMemoryReviewRepo;
pub use postgres::PostgresReviewRepo;

#[async_trait::async_trait]
pub trait IReviewRepo: Send + Sync {
    /// Persists the review together with its full reminder fan-out in
    /// one transaction. Either everything lands or nothing does.
    async fn insert_with_schedule(
        &self,
        review: &Review,
        cycles: &[ReviewCycle],
        histories: &[NotificationHistory],
    ) -> anyhow::Result<()>;
    async fn find(&self, review_id: &ID) -> Option<Review>;
    async fn find_by_member(&self, member_id: &ID) -> Vec<Review>;
}

#[cfg(test)]
mod test {
    use crate::repos::Repos;
    use revisit_domain::{
        Member, NotificationHistory, NotificationStatus, Review, ReviewCycle, ReviewCycleInterval,
        ReviewUrl,
    };

    #[tokio::test]
    async fn insert_with_schedule_is_visible_to_cycle_and_history_repos() {
        let repos = Repos::create_inmemory();
        let member = Member::new("alice@example.com".parse().unwrap());
        repos.members.insert(&member).await.unwrap();

        let review = Review::new(
            member.id.clone(),
            ReviewUrl::new("https://example.com/article").unwrap(),
            0,
        );
        let anchor = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let cycles = ReviewCycleInterval::calculate_default(anchor)
            .into_iter()
            .map(|scheduled_at| ReviewCycle::new(review.id.clone(), scheduled_at))
            .collect::<Vec<_>>();
        let histories = cycles
            .iter()
            .map(|cycle| {
                NotificationHistory::new(cycle.id.clone(), NotificationStatus::Pending, 0)
            })
            .collect::<Vec<_>>();

        assert!(repos
            .reviews
            .insert_with_schedule(&review, &cycles, &histories)
            .await
            .is_ok());

        let res = repos.reviews.find(&review.id).await.unwrap();
        assert_eq!(res.url, review.url);

        let found_cycles = repos.review_cycles.find_by_review(&review.id).await;
        assert_eq!(found_cycles.len(), 5);
        assert!(found_cycles
            .iter()
            .all(|cycle| cycle.status == NotificationStatus::Pending));

        for cycle in &cycles {
            let found_histories = repos.notification_histories.find_by_cycle(&cycle.id).await;
            assert_eq!(found_histories.len(), 1);
            assert_eq!(found_histories[0].status, NotificationStatus::Pending);
        }
    }
}
