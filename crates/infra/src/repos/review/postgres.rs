use super::IReviewRepo;
use revisit_domain::{NotificationHistory, Review, ReviewCycle, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};

pub struct PostgresReviewRepo {
    pool: PgPool,
}

impl PostgresReviewRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewRaw {
    review_uid: Uuid,
    member_uid: Uuid,
    url: String,
    created: i64,
}

impl TryFrom<ReviewRaw> for Review {
    type Error = anyhow::Error;

    fn try_from(raw: ReviewRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.review_uid.into(),
            member_id: raw.member_uid.into(),
            url: raw.url.parse()?,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl IReviewRepo for PostgresReviewRepo {
    async fn insert_with_schedule(
        &self,
        review: &Review,
        cycles: &[ReviewCycle],
        histories: &[NotificationHistory],
    ) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO reviews(review_uid, member_uid, url, created)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(review.id.inner_ref())
        .bind(review.member_id.inner_ref())
        .bind(review.url.as_str())
        .bind(review.created)
        .execute(&mut *tx)
        .await?;

        for cycle in cycles {
            sqlx::query(
                r#"
                INSERT INTO review_cycles(review_cycle_uid, review_uid, scheduled_at, status)
                VALUES($1, $2, $3, $4)
                "#,
            )
            .bind(cycle.id.inner_ref())
            .bind(cycle.review_id.inner_ref())
            .bind(cycle.scheduled_at)
            .bind(cycle.status.as_str())
            .execute(&mut *tx)
            .await?;
        }

        for history in histories {
            sqlx::query(
                r#"
                INSERT INTO notification_histories(notification_history_uid, review_cycle_uid, status, created)
                VALUES($1, $2, $3, $4)
                "#,
            )
            .bind(history.id.inner_ref())
            .bind(history.review_cycle_id.inner_ref())
            .bind(history.status.as_str())
            .bind(history.created)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, review_id: &ID) -> Option<Review> {
        sqlx::query_as::<_, ReviewRaw>(
            r#"
            SELECT * FROM reviews
            WHERE review_uid = $1
            "#,
        )
        .bind(review_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .and_then(|review| review.try_into().ok())
    }

    async fn find_by_member(&self, member_id: &ID) -> Vec<Review> {
        sqlx::query_as::<_, ReviewRaw>(
            r#"
            SELECT * FROM reviews
            WHERE member_uid = $1
            "#,
        )
        .bind(member_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .filter_map(|review| review.try_into().ok())
        .collect()
    }
}
