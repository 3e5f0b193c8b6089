mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, WebhookSettings};
use repos::Repos;
pub use services::WebhookClient;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, StaticTimeSys};
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct BookliContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl BookliContext {
    fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create_postgres(connection_string: &str) -> Self {
        let repos = Repos::create_postgres(connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment.
/// Postgres is used when `DATABASE_URL` is set, otherwise everything is
/// kept in memory, which is what the tests run against.
pub async fn setup_context() -> BookliContext {
    const DATABASE_URL: &str = "DATABASE_URL";

    match std::env::var(DATABASE_URL) {
        Ok(connection_string) => {
            info!("{} env var was provided. Going to use postgres.", DATABASE_URL);
            BookliContext::create_postgres(&connection_string).await
        }
        Err(_) => {
            info!(
                "{} env var was not provided. Going to use inmemory infra.",
                DATABASE_URL
            );
            BookliContext::create_inmemory()
        }
    }
}

pub async fn run_migration(connection_string: &str) -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(connection_string)
        .await
        .expect("To connect to postgres");

    sqlx::migrate!().run(&pool).await
}
