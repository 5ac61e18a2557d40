use super::{DueReviewCycle, IReviewCycleRepo};
use chrono::NaiveDateTime;
use revisit_domain::{Member, NotificationStatus, ReviewCycle, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};

pub struct PostgresReviewCycleRepo {
    pool: PgPool,
}

impl PostgresReviewCycleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReviewCycleRaw {
    review_cycle_uid: Uuid,
    review_uid: Uuid,
    scheduled_at: NaiveDateTime,
    status: String,
}

impl TryFrom<ReviewCycleRaw> for ReviewCycle {
    type Error = anyhow::Error;

    fn try_from(raw: ReviewCycleRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.review_cycle_uid.into(),
            review_id: raw.review_uid.into(),
            scheduled_at: raw.scheduled_at,
            status: raw.status.parse()?,
        })
    }
}

#[derive(Debug, FromRow)]
struct DueReviewCycleRaw {
    review_cycle_uid: Uuid,
    review_uid: Uuid,
    scheduled_at: NaiveDateTime,
    status: String,
    url: String,
    member_uid: Uuid,
    email: String,
}

impl TryFrom<DueReviewCycleRaw> for DueReviewCycle {
    type Error = anyhow::Error;

    fn try_from(raw: DueReviewCycleRaw) -> anyhow::Result<Self> {
        Ok(Self {
            cycle: ReviewCycle {
                id: raw.review_cycle_uid.into(),
                review_id: raw.review_uid.into(),
                scheduled_at: raw.scheduled_at,
                status: raw.status.parse()?,
            },
            url: raw.url.parse()?,
            member: Member {
                id: raw.member_uid.into(),
                email: raw.email.parse()?,
            },
        })
    }
}

#[async_trait::async_trait]
impl IReviewCycleRepo for PostgresReviewCycleRepo {
    async fn find(&self, cycle_id: &ID) -> Option<ReviewCycle> {
        sqlx::query_as::<_, ReviewCycleRaw>(
            r#"
            SELECT * FROM review_cycles
            WHERE review_cycle_uid = $1
            "#,
        )
        .bind(cycle_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .and_then(|cycle| cycle.try_into().ok())
    }

    async fn find_by_review(&self, review_id: &ID) -> Vec<ReviewCycle> {
        sqlx::query_as::<_, ReviewCycleRaw>(
            r#"
            SELECT * FROM review_cycles
            WHERE review_uid = $1
            ORDER BY scheduled_at
            "#,
        )
        .bind(review_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .filter_map(|cycle| cycle.try_into().ok())
        .collect()
    }

    async fn find_due_at(&self, scheduled_at: NaiveDateTime) -> anyhow::Result<Vec<DueReviewCycle>> {
        let due = sqlx::query_as::<_, DueReviewCycleRaw>(
            r#"
            SELECT c.review_cycle_uid, c.review_uid, c.scheduled_at, c.status,
                   r.url, m.member_uid, m.email
            FROM review_cycles AS c
            INNER JOIN reviews AS r
                ON r.review_uid = c.review_uid
            INNER JOIN members AS m
                ON m.member_uid = r.member_uid
            WHERE c.scheduled_at = $1 AND c.status = $2
            "#,
        )
        .bind(scheduled_at)
        .bind(NotificationStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await?;

        due.into_iter().map(|row| row.try_into()).collect()
    }
}
