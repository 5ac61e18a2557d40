use super::{DueReviewCycle, IReviewCycleRepo};
use crate::repos::shared::{inmemory_repo::*, Collection};
use chrono::NaiveDateTime;
use revisit_domain::{Member, NotificationStatus, Review, ReviewCycle, ID};

pub struct InMemoryReviewCycleRepo {
    review_cycles: Collection<ReviewCycle>,
    reviews: Collection<Review>,
    members: Collection<Member>,
}

impl InMemoryReviewCycleRepo {
    pub fn new(
        review_cycles: Collection<ReviewCycle>,
        reviews: Collection<Review>,
        members: Collection<Member>,
    ) -> Self {
        Self {
            review_cycles,
            reviews,
            members,
        }
    }
}

#[async_trait::async_trait]
impl IReviewCycleRepo for InMemoryReviewCycleRepo {
    async fn find(&self, cycle_id: &ID) -> Option<ReviewCycle> {
        find(cycle_id, &self.review_cycles)
    }

    async fn find_by_review(&self, review_id: &ID) -> Vec<ReviewCycle> {
        find_by(&self.review_cycles, |cycle| cycle.review_id == *review_id)
    }

    async fn find_due_at(&self, scheduled_at: NaiveDateTime) -> anyhow::Result<Vec<DueReviewCycle>> {
        let due_cycles = find_by(&self.review_cycles, |cycle| {
            cycle.scheduled_at == scheduled_at && cycle.status == NotificationStatus::Pending
        });

        let mut due = Vec::new();
        for cycle in due_cycles {
            let review = match find(&cycle.review_id, &self.reviews) {
                Some(review) => review,
                None => continue,
            };
            let member = match find(&review.member_id, &self.members) {
                Some(member) => member,
                None => continue,
            };
            due.push(DueReviewCycle {
                cycle,
                url: review.url,
                member,
            });
        }
        Ok(due)
    }
}
