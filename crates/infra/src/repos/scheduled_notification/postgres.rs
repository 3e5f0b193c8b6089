use super::IScheduledNotificationRepo;
use crate::repos::shared::repo::DeleteResult;
use bookli_domain::{NotifiableType, NotificationClass, ScheduledNotification, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresScheduledNotificationRepo {
    pool: PgPool,
}

impl PostgresScheduledNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    notification_class: String,
    notifiable_uid: Uuid,
    notifiable_type: String,
    sent: bool,
    processing: bool,
    scheduled_at: i64,
    sent_at: Option<i64>,
    tries: i64,
}

impl Into<ScheduledNotification> for NotificationRaw {
    fn into(self) -> ScheduledNotification {
        ScheduledNotification {
            id: self.notification_uid.into(),
            user_id: self.user_uid.into(),
            // Both columns only ever hold values written through the
            // domain enums
            notification_class: self
                .notification_class
                .parse()
                .unwrap_or(NotificationClass::BookingReminder1H),
            notifiable_id: self.notifiable_uid.into(),
            notifiable_type: self
                .notifiable_type
                .parse()
                .unwrap_or(NotifiableType::Booking),
            sent: self.sent,
            processing: self.processing,
            scheduled_at: self.scheduled_at,
            sent_at: self.sent_at,
            tries: self.tries,
        }
    }
}

#[async_trait::async_trait]
impl IScheduledNotificationRepo for PostgresScheduledNotificationRepo {
    async fn insert(&self, notification: &ScheduledNotification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduled_notifications(
                notification_uid,
                user_uid,
                notification_class,
                notifiable_uid,
                notifiable_type,
                sent,
                processing,
                scheduled_at,
                sent_at,
                tries
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.notification_class.to_string())
        .bind(notification.notifiable_id.inner_ref())
        .bind(notification.notifiable_type.to_string())
        .bind(notification.sent)
        .bind(notification.processing)
        .bind(notification.scheduled_at)
        .bind(notification.sent_at)
        .bind(notification.tries)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, notification: &ScheduledNotification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE scheduled_notifications SET
                sent = $2,
                processing = $3,
                scheduled_at = $4,
                sent_at = $5,
                tries = $6
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.sent)
        .bind(notification.processing)
        .bind(notification.scheduled_at)
        .bind(notification.sent_at)
        .bind(notification.tries)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<ScheduledNotification> {
        let notification: NotificationRaw = match sqlx::query_as(
            r#"
            SELECT * FROM scheduled_notifications AS n
            WHERE n.notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        {
            Ok(notification) => notification,
            Err(_) => return None,
        };
        Some(notification.into())
    }

    async fn find_by_notifiable(
        &self,
        notifiable_id: &ID,
        notifiable_type: NotifiableType,
        user_id: &ID,
    ) -> Vec<ScheduledNotification> {
        let notifications: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM scheduled_notifications AS n
            WHERE n.notifiable_uid = $1 AND n.notifiable_type = $2 AND n.user_uid = $3
            "#,
        )
        .bind(notifiable_id.inner_ref())
        .bind(notifiable_type.to_string())
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        notifications
            .into_iter()
            .map(|notification| notification.into())
            .collect()
    }

    async fn find_pending_by_user(&self, user_id: &ID) -> Vec<ScheduledNotification> {
        let notifications: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM scheduled_notifications AS n
            WHERE n.user_uid = $1 AND n.sent = FALSE
            ORDER BY n.scheduled_at
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        notifications
            .into_iter()
            .map(|notification| notification.into())
            .collect()
    }

    async fn delete_by_notifiable(
        &self,
        notifiable_id: &ID,
        notifiable_type: NotifiableType,
        user_id: &ID,
    ) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM scheduled_notifications AS n
            WHERE n.notifiable_uid = $1 AND n.notifiable_type = $2 AND n.user_uid = $3
            "#,
        )
        .bind(notifiable_id.inner_ref())
        .bind(notifiable_type.to_string())
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn claim_due(&self, before: i64, max_tries: i64) -> Vec<ScheduledNotification> {
        let notifications: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            UPDATE scheduled_notifications SET
                processing = TRUE,
                tries = tries + 1
            WHERE notification_uid IN (
                SELECT notification_uid FROM scheduled_notifications
                WHERE scheduled_at <= $1
                    AND sent = FALSE
                    AND processing = FALSE
                    AND tries < $2
                FOR UPDATE SKIP LOCKED
            )
            RETURNING *
            "#,
        )
        .bind(before)
        .bind(max_tries)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        notifications
            .into_iter()
            .map(|notification| notification.into())
            .collect()
    }
}
