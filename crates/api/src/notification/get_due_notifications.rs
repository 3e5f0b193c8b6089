use crate::shared::usecase::UseCase;
use bookli_domain::{Booking, ScheduledNotification};
use bookli_infra::BookliContext;
use chrono_tz::Tz;
use tracing::error;

/// Claims the `ScheduledNotification`s that are due for delivery and
/// resolves the booking and owner timezone needed to render the webhook
/// payload. Claimed rows are marked as processing so that a concurrent
/// run of the send job will not pick them up again.
#[derive(Debug)]
pub struct GetDueNotificationsUseCase {
    /// A notification is abandoned after this many delivery attempts
    pub max_tries: i64,
}

#[derive(Debug)]
pub enum UseCaseErrors {}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDueNotificationsUseCase {
    type Response = Vec<(ScheduledNotification, Booking, Tz)>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        let claimed = ctx
            .repos
            .scheduled_notifications
            .claim_due(now, self.max_tries)
            .await;

        let mut due = Vec::with_capacity(claimed.len());
        for mut notification in claimed {
            let booking = ctx.repos.bookings.find(&notification.notifiable_id).await;
            let user = ctx.repos.users.find(&notification.user_id).await;

            match (booking, user) {
                (Some(booking), Some(user)) => {
                    due.push((notification, booking, user.timezone));
                }
                _ => {
                    // The notifiable entity is gone, retire the
                    // notification so it is not claimed again
                    notification.sent = true;
                    notification.processing = false;
                    notification.sent_at = Some(now);
                    if let Err(e) = ctx.repos.scheduled_notifications.save(&notification).await {
                        error!(
                            "Unable to retire orphaned notification {}. Err: {:?}",
                            notification.id, e
                        );
                    }
                }
            }
        }

        Ok(due)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bookli_domain::{User, HOUR_IN_MILLIS};
    use bookli_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn it_claims_only_due_notifications() {
        let ctx = setup_context().await;
        let user = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&user).await.unwrap();

        let now = ctx.sys.get_timestamp_millis();
        let due_booking = Booking {
            id: Default::default(),
            user_id: user.id.clone(),
            start_ts: now + HOUR_IN_MILLIS / 2,
            end_ts: now + HOUR_IN_MILLIS,
            created: 0,
            updated: 0,
        };
        let upcoming_booking = Booking {
            id: Default::default(),
            user_id: user.id.clone(),
            start_ts: now + 3 * HOUR_IN_MILLIS,
            end_ts: now + 4 * HOUR_IN_MILLIS,
            created: 0,
            updated: 0,
        };
        for booking in [&due_booking, &upcoming_booking] {
            ctx.repos.bookings.insert(booking).await.unwrap();
            let notification = ScheduledNotification::new_booking_reminder_1h(
                booking,
                booking.start_ts - HOUR_IN_MILLIS,
            );
            ctx.repos
                .scheduled_notifications
                .insert(&notification)
                .await
                .unwrap();
        }

        let mut usecase = GetDueNotificationsUseCase { max_tries: 5 };
        let due = usecase.execute(&ctx).await.unwrap();

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1.id, due_booking.id);
        assert!(due[0].0.processing);
        assert_eq!(due[0].0.tries, 1);

        // A second run will not claim the same notification again
        let mut usecase = GetDueNotificationsUseCase { max_tries: 5 };
        let due = usecase.execute(&ctx).await.unwrap();
        assert!(due.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn it_retires_notifications_for_deleted_bookings() {
        let ctx = setup_context().await;
        let user = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&user).await.unwrap();

        let now = ctx.sys.get_timestamp_millis();
        let booking = Booking {
            id: Default::default(),
            user_id: user.id.clone(),
            start_ts: now,
            end_ts: now + HOUR_IN_MILLIS,
            created: 0,
            updated: 0,
        };
        // The booking is never stored, only its notification
        let notification =
            ScheduledNotification::new_booking_reminder_1h(&booking, now - HOUR_IN_MILLIS);
        ctx.repos
            .scheduled_notifications
            .insert(&notification)
            .await
            .unwrap();

        let mut usecase = GetDueNotificationsUseCase { max_tries: 5 };
        let due = usecase.execute(&ctx).await.unwrap();
        assert!(due.is_empty());

        let retired = ctx
            .repos
            .scheduled_notifications
            .find(&notification.id)
            .await
            .unwrap();
        assert!(retired.sent);
        assert!(retired.sent_at.is_some());
    }
}
