mod inmemory;
mod postgres;

use chrono::NaiveDateTime;
use revisit_domain::{Member, ReviewCycle, ReviewUrl, ID};

pub use inmemory::InMemoryReviewCycleRepo;
pub use postgres::PostgresReviewCycleRepo;

/// A pending reminder joined with everything dispatch needs: the url
/// to remind about and the member to send it to.
#[derive(Debug, Clone)]
pub struct DueReviewCycle {
    pub cycle: ReviewCycle,
    pub url: ReviewUrl,
    pub member: Member,
}

#[async_trait::async_trait]
pub trait IReviewCycleRepo: Send + Sync {
    async fn find(&self, cycle_id: &ID) -> Option<ReviewCycle>;
    async fn find_by_review(&self, review_id: &ID) -> Vec<ReviewCycle>;
    /// All cycles scheduled exactly at the given timestamp that are
    /// still pending. Terminal cycles never come back, so replaying a
    /// dispatch run cannot double-send.
    async fn find_due_at(&self, scheduled_at: NaiveDateTime) -> anyhow::Result<Vec<DueReviewCycle>>;
}
