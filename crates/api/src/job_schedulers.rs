use crate::notification::GetDueNotificationsUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use bookli_api_structs::send_booking_reminders::BookingRemindersDTO;
use bookli_infra::{BookliContext, WebhookClient};
use std::time::Duration;
use tracing::error;

/// Delivery attempts before a notification is abandoned
const MAX_SEND_TRIES: i64 = 5;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Spawns the job that delivers due `ScheduledNotification`s to the
/// configured webhook. Runs are aligned to the start of each minute.
pub fn start_send_notifications_job(ctx: BookliContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(send_due_notifications(context));
        }
    });
}

async fn send_due_notifications(ctx: BookliContext) {
    let webhook = match &ctx.config.webhook {
        Some(webhook) => webhook.clone(),
        None => return,
    };

    let usecase = GetDueNotificationsUseCase {
        max_tries: MAX_SEND_TRIES,
    };
    let due = match execute(usecase, &ctx).await {
        Ok(due) => due,
        Err(_) => return,
    };
    if due.is_empty() {
        return;
    }

    let mut notifications = due
        .iter()
        .map(|(notification, _, _)| notification.clone())
        .collect::<Vec<_>>();

    let client = WebhookClient::new();
    match client.send(&webhook, &BookingRemindersDTO::new(due)).await {
        Ok(_) => {
            let sent_at = ctx.sys.get_timestamp_millis();
            for notification in notifications.iter_mut() {
                notification.sent = true;
                notification.processing = false;
                notification.sent_at = Some(sent_at);
            }
        }
        Err(e) => {
            error!("Error informing client of due notifications: {:?}", e);
            // Release the claims so the next run can retry
            for notification in notifications.iter_mut() {
                notification.processing = false;
            }
        }
    }

    for notification in &notifications {
        if let Err(e) = ctx.repos.scheduled_notifications.save(notification).await {
            error!(
                "Unable to save delivery state for notification {}. Err: {:?}",
                notification.id, e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
