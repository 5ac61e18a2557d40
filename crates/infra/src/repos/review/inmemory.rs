use super::IReviewRepo;
use crate::repos::shared::{inmemory_repo::*, Collection};
use revisit_domain::{NotificationHistory, Review, ReviewCycle, ID};

pub struct InMemoryReviewRepo {
    reviews: Collection<Review>,
    review_cycles: Collection<ReviewCycle>,
    notification_histories: Collection<NotificationHistory>,
}

impl InMemoryReviewRepo {
    pub fn new(
        reviews: Collection<Review>,
        review_cycles: Collection<ReviewCycle>,
        notification_histories: Collection<NotificationHistory>,
    ) -> Self {
        Self {
            reviews,
            review_cycles,
            notification_histories,
        }
    }
}

#[async_trait::async_trait]
impl IReviewRepo for InMemoryReviewRepo {
    async fn insert_with_schedule(
        &self,
        review: &Review,
        cycles: &[ReviewCycle],
        histories: &[NotificationHistory],
    ) -> anyhow::Result<()> {
        insert(review, &self.reviews);
        for cycle in cycles {
            insert(cycle, &self.review_cycles);
        }
        for history in histories {
            insert(history, &self.notification_histories);
        }
        Ok(())
    }

    async fn find(&self, review_id: &ID) -> Option<Review> {
        find(review_id, &self.reviews)
    }

    async fn find_by_member(&self, member_id: &ID) -> Vec<Review> {
        find_by(&self.reviews, |review| review.member_id == *member_id)
    }
}
