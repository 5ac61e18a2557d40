mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    DueReviewCycle, IDeviceRepo, IMemberRepo, INotificationHistoryRepo, IReviewCycleRepo,
    IReviewRepo, Repos,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct RevisitContext {
    pub repos: Repos,
    pub config: Config,
    pub email: Arc<dyn IEmailSender>,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl RevisitContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let email = SmtpEmailSender::new(&config).expect("SMTP relay config must be valid");
        Self {
            repos,
            config,
            email: Arc::new(email),
            sys: Arc::new(RealSys {}),
        }
    }

    pub fn create_inmemory() -> Self {
        Self::create_inmemory_with_email(Arc::new(InMemoryEmailSender::new()))
    }

    pub fn create_inmemory_with_email(email: Arc<dyn IEmailSender>) -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            email,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> RevisitContext {
    RevisitContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
