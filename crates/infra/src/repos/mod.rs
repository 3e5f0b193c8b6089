mod booking;
mod scheduled_notification;
mod shared;
mod user;

use booking::{IBookingRepo, InMemoryBookingRepo, PostgresBookingRepo};
use scheduled_notification::{
    IScheduledNotificationRepo, InMemoryScheduledNotificationRepo,
    PostgresScheduledNotificationRepo,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo};

pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub bookings: Arc<dyn IBookingRepo>,
    pub scheduled_notifications: Arc<dyn IScheduledNotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            bookings: Arc::new(PostgresBookingRepo::new(pool.clone())),
            scheduled_notifications: Arc::new(PostgresScheduledNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            bookings: Arc::new(InMemoryBookingRepo::new()),
            scheduled_notifications: Arc::new(InMemoryScheduledNotificationRepo::new()),
        }
    }
}
