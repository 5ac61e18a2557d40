mod device;
mod member;
mod notification_history;
mod review;
mod review_cycle;
mod shared;

use device::{InMemoryDeviceRepo, PostgresDeviceRepo};
use member::{InMemoryMemberRepo, PostgresMemberRepo};
use notification_history::{InMemoryNotificationHistoryRepo, PostgresNotificationHistoryRepo};
use review::{InMemoryReviewRepo, PostgresReviewRepo};
use review_cycle::{InMemoryReviewCycleRepo, PostgresReviewCycleRepo};
use shared::new_collection;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use device::IDeviceRepo;
pub use member::IMemberRepo;
pub use notification_history::INotificationHistoryRepo;
pub use review::IReviewRepo;
pub use review_cycle::{DueReviewCycle, IReviewCycleRepo};

#[derive(Clone)]
pub struct Repos {
    pub members: Arc<dyn IMemberRepo>,
    pub devices: Arc<dyn IDeviceRepo>,
    pub reviews: Arc<dyn IReviewRepo>,
    pub review_cycles: Arc<dyn IReviewCycleRepo>,
    pub notification_histories: Arc<dyn INotificationHistoryRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            members: Arc::new(PostgresMemberRepo::new(pool.clone())),
            devices: Arc::new(PostgresDeviceRepo::new(pool.clone())),
            reviews: Arc::new(PostgresReviewRepo::new(pool.clone())),
            review_cycles: Arc::new(PostgresReviewCycleRepo::new(pool.clone())),
            notification_histories: Arc::new(PostgresNotificationHistoryRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        // The review, cycle and history repos operate on the same rows,
        // so the backing collections are shared between them.
        let members = new_collection();
        let devices = new_collection();
        let reviews = new_collection();
        let review_cycles = new_collection();
        let notification_histories = new_collection();

        Self {
            members: Arc::new(InMemoryMemberRepo::new(members.clone())),
            devices: Arc::new(InMemoryDeviceRepo::new(devices)),
            reviews: Arc::new(InMemoryReviewRepo::new(
                reviews.clone(),
                review_cycles.clone(),
                notification_histories.clone(),
            )),
            review_cycles: Arc::new(InMemoryReviewCycleRepo::new(
                review_cycles.clone(),
                reviews,
                members,
            )),
            notification_histories: Arc::new(InMemoryNotificationHistoryRepo::new(
                review_cycles,
                notification_histories,
            )),
        }
    }
}
