use super::IScheduledNotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use bookli_domain::{NotifiableType, ScheduledNotification, ID};

pub struct InMemoryScheduledNotificationRepo {
    notifications: std::sync::Mutex<Vec<ScheduledNotification>>,
}

impl InMemoryScheduledNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledNotificationRepo for InMemoryScheduledNotificationRepo {
    async fn insert(&self, notification: &ScheduledNotification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn save(&self, notification: &ScheduledNotification) -> anyhow::Result<()> {
        save(notification, &self.notifications);
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<ScheduledNotification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_notifiable(
        &self,
        notifiable_id: &ID,
        notifiable_type: NotifiableType,
        user_id: &ID,
    ) -> Vec<ScheduledNotification> {
        find_by(&self.notifications, |notification| {
            notification.notifiable_id == *notifiable_id
                && notification.notifiable_type == notifiable_type
                && notification.user_id == *user_id
        })
    }

    async fn find_pending_by_user(&self, user_id: &ID) -> Vec<ScheduledNotification> {
        find_by(&self.notifications, |notification| {
            notification.user_id == *user_id && !notification.sent
        })
    }

    async fn delete_by_notifiable(
        &self,
        notifiable_id: &ID,
        notifiable_type: NotifiableType,
        user_id: &ID,
    ) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.notifications, |notification| {
            notification.notifiable_id == *notifiable_id
                && notification.notifiable_type == notifiable_type
                && notification.user_id == *user_id
        });
        Ok(res)
    }

    async fn claim_due(&self, before: i64, max_tries: i64) -> Vec<ScheduledNotification> {
        let mut notifications = self.notifications.lock().unwrap();
        let mut claimed = Vec::new();
        for notification in notifications.iter_mut() {
            if notification.scheduled_at <= before
                && !notification.sent
                && !notification.processing
                && notification.tries < max_tries
            {
                notification.processing = true;
                notification.tries += 1;
                claimed.push(notification.clone());
            }
        }
        claimed
    }
}
