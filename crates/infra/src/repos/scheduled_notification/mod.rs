mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use bookli_domain::{NotifiableType, ScheduledNotification, ID};
pub use inmemory::InMemoryScheduledNotificationRepo;
pub use postgres::PostgresScheduledNotificationRepo;

#[async_trait::async_trait]
pub trait IScheduledNotificationRepo: Send + Sync {
    async fn insert(&self, notification: &ScheduledNotification) -> anyhow::Result<()>;
    async fn save(&self, notification: &ScheduledNotification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<ScheduledNotification>;
    /// All notifications for the given notifiable entity, scoped to the
    /// owning user
    async fn find_by_notifiable(
        &self,
        notifiable_id: &ID,
        notifiable_type: NotifiableType,
        user_id: &ID,
    ) -> Vec<ScheduledNotification>;
    /// The user's notifications that have not been sent yet
    async fn find_pending_by_user(&self, user_id: &ID) -> Vec<ScheduledNotification>;
    async fn delete_by_notifiable(
        &self,
        notifiable_id: &ID,
        notifiable_type: NotifiableType,
        user_id: &ID,
    ) -> anyhow::Result<DeleteResult>;
    /// Atomically claims the notifications that are due for delivery:
    /// marks them as processing, bumps their try counter and returns
    /// them. Rows that were sent, are being processed or ran out of
    /// tries are left alone.
    async fn claim_due(&self, before: i64, max_tries: i64) -> Vec<ScheduledNotification>;
}
