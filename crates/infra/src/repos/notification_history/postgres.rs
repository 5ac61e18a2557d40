use super::INotificationHistoryRepo;
use revisit_domain::{NotificationHistory, NotificationStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use tracing::warn;

pub struct PostgresNotificationHistoryRepo {
    pool: PgPool,
}

impl PostgresNotificationHistoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationHistoryRaw {
    notification_history_uid: Uuid,
    review_cycle_uid: Uuid,
    status: String,
    created: i64,
}

impl TryFrom<NotificationHistoryRaw> for NotificationHistory {
    type Error = anyhow::Error;

    fn try_from(raw: NotificationHistoryRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.notification_history_uid.into(),
            review_cycle_id: raw.review_cycle_uid.into(),
            status: raw.status.parse()?,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl INotificationHistoryRepo for PostgresNotificationHistoryRepo {
    async fn record(
        &self,
        cycle_ids: &[ID],
        status: NotificationStatus,
        created: i64,
    ) -> anyhow::Result<()> {
        let ids = cycle_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE review_cycles
            SET status = $1
            WHERE review_cycle_uid = ANY($2) AND status = $3
            "#,
        )
        .bind(status.as_str())
        .bind(&ids)
        .bind(NotificationStatus::Pending.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if updated < cycle_ids.len() as u64 {
            warn!(
                "Only {}/{} review cycles were pending when recording status: {}",
                updated,
                cycle_ids.len(),
                status
            );
        }

        for cycle_id in cycle_ids {
            let history = NotificationHistory::new(cycle_id.clone(), status, created);
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

    async fn find_by_cycle(&self, cycle_id: &ID) -> Vec<NotificationHistory> {
        sqlx::query_as::<_, NotificationHistoryRaw>(
            r#"
            SELECT * FROM notification_histories
            WHERE review_cycle_uid = $1
            ORDER BY created
            "#,
        )
        .bind(cycle_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .filter_map(|history| history.try_into().ok())
        .collect()
    }
}
