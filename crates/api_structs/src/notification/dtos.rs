use bookli_domain::{NotifiableType, NotificationClass, ScheduledNotification, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNotificationDTO {
    pub id: ID,
    pub user_id: ID,
    pub notification_class: NotificationClass,
    pub notifiable_id: ID,
    pub notifiable_type: NotifiableType,
    pub sent: bool,
    pub processing: bool,
    pub scheduled_at: i64,
    pub sent_at: Option<i64>,
    pub tries: i64,
}

impl ScheduledNotificationDTO {
    pub fn new(notification: ScheduledNotification) -> Self {
        Self {
            id: notification.id.clone(),
            user_id: notification.user_id.clone(),
            notification_class: notification.notification_class,
            notifiable_id: notification.notifiable_id.clone(),
            notifiable_type: notification.notifiable_type,
            sent: notification.sent,
            processing: notification.processing,
            scheduled_at: notification.scheduled_at,
            sent_at: notification.sent_at,
            tries: notification.tries,
        }
    }
}
