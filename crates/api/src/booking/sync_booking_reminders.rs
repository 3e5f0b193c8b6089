use crate::shared::usecase::UseCase;
use bookli_domain::{Booking, NotifiableType, ScheduledNotification};
use bookli_infra::BookliContext;
use tracing::error;

#[derive(Debug)]
pub enum BookingOperation {
    Created,
    Updated,
    Deleted,
}

/// Synchronizes the upcoming reminder for a `Booking`.
///
/// A booking carries at most one pending `ScheduledNotification`, set to
/// fire one wall clock hour before the booking starts in the owner's
/// timezone. On update the old reminder rows are purged before the new one
/// is computed, on delete they are just purged. Reminders that would fire
/// in the past are never stored.
#[derive(Debug)]
pub struct SyncBookingRemindersUseCase<'a> {
    pub booking: &'a Booking,
    pub operation: BookingOperation,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    UserNotFound,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for SyncBookingRemindersUseCase<'a> {
    type Response = ();

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        // Delete existing reminders
        match self.operation {
            BookingOperation::Updated | BookingOperation::Deleted => {
                ctx.repos
                    .scheduled_notifications
                    .delete_by_notifiable(
                        &self.booking.id,
                        NotifiableType::Booking,
                        &self.booking.user_id,
                    )
                    .await
                    .map_err(|e| {
                        error!(
                            "Unable to delete reminders for booking {}. Err: {:?}",
                            self.booking.id, e
                        );
                        UseCaseErrors::StorageError
                    })?;
            }
            BookingOperation::Created => {}
        }

        if let BookingOperation::Deleted = self.operation {
            return Ok(());
        }

        // Create new reminder
        let user = ctx
            .repos
            .users
            .find(&self.booking.user_id)
            .await
            .ok_or(UseCaseErrors::UserNotFound)?;

        let scheduled_at = self.booking.reminder_at(&user.timezone);
        if scheduled_at <= ctx.sys.get_timestamp_millis() {
            // The reminder would fire in the past
            return Ok(());
        }

        let notification = ScheduledNotification::new_booking_reminder_1h(self.booking, scheduled_at);
        ctx.repos
            .scheduled_notifications
            .insert(&notification)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bookli_domain::{User, HOUR_IN_MILLIS};
    use bookli_infra::{setup_context, StaticTimeSys};
    use std::sync::Arc;

    async fn setup_user(ctx: &BookliContext) -> User {
        let user = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    fn booking_for(user: &User, start_ts: i64) -> Booking {
        Booking {
            id: Default::default(),
            user_id: user.id.clone(),
            start_ts,
            end_ts: start_ts + HOUR_IN_MILLIS,
            created: 0,
            updated: 0,
        }
    }

    #[actix_web::main]
    #[test]
    async fn it_schedules_reminder_one_hour_before_start() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;
        let start_ts = ctx.sys.get_timestamp_millis() + 2 * HOUR_IN_MILLIS;
        let booking = booking_for(&user, start_ts);

        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Created,
        };
        usecase.execute(&ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].scheduled_at, start_ts - HOUR_IN_MILLIS);
        assert!(!notifications[0].sent);
    }

    #[actix_web::main]
    #[test]
    async fn it_skips_reminder_when_start_is_less_than_one_hour_away() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;
        let start_ts = ctx.sys.get_timestamp_millis() + HOUR_IN_MILLIS / 2;
        let booking = booking_for(&user, start_ts);

        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Created,
        };
        usecase.execute(&ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert!(notifications.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn it_skips_reminder_when_start_is_exactly_one_hour_away() {
        let mut ctx = setup_context().await;
        // Freeze the clock so the reminder lands exactly on "now"
        let now = 1893456000000; // 2030-01-01 00:00:00 UTC
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: now,
        });
        let user = setup_user(&ctx).await;
        let booking = booking_for(&user, now + HOUR_IN_MILLIS);

        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Created,
        };
        usecase.execute(&ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert!(notifications.is_empty());

        // One milli later and the reminder is strictly in the future
        let booking = booking_for(&user, now + HOUR_IN_MILLIS + 1);
        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Created,
        };
        usecase.execute(&ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].scheduled_at, now + 1);
    }

    #[actix_web::main]
    #[test]
    async fn it_replaces_reminder_on_update() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;
        let start_ts = ctx.sys.get_timestamp_millis() + 2 * HOUR_IN_MILLIS;
        let mut booking = booking_for(&user, start_ts);

        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Created,
        };
        usecase.execute(&ctx).await.unwrap();

        booking.start_ts += HOUR_IN_MILLIS;
        booking.end_ts += HOUR_IN_MILLIS;
        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Updated,
        };
        usecase.execute(&ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].scheduled_at, booking.start_ts - HOUR_IN_MILLIS);
    }

    #[actix_web::main]
    #[test]
    async fn it_purges_reminder_when_updated_start_is_too_close() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;
        let start_ts = ctx.sys.get_timestamp_millis() + 2 * HOUR_IN_MILLIS;
        let mut booking = booking_for(&user, start_ts);

        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Created,
        };
        usecase.execute(&ctx).await.unwrap();

        booking.start_ts = ctx.sys.get_timestamp_millis() + HOUR_IN_MILLIS / 4;
        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Updated,
        };
        usecase.execute(&ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert!(notifications.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn it_purges_reminders_on_delete() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;
        let start_ts = ctx.sys.get_timestamp_millis() + 2 * HOUR_IN_MILLIS;
        let booking = booking_for(&user, start_ts);

        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Created,
        };
        usecase.execute(&ctx).await.unwrap();

        let mut usecase = SyncBookingRemindersUseCase {
            booking: &booking,
            operation: BookingOperation::Deleted,
        };
        usecase.execute(&ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert!(notifications.is_empty());
    }
}
