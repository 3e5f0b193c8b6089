use crate::dtos::{BookingDTO, ScheduledNotificationDTO};
use bookli_domain::{Booking, ScheduledNotification};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub mod get_notifications {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<ScheduledNotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<ScheduledNotification>) -> Self {
            Self {
                notifications: notifications
                    .into_iter()
                    .map(ScheduledNotificationDTO::new)
                    .collect(),
            }
        }
    }
}

pub mod send_booking_reminders {
    use super::*;

    /// Webhook payload for one due reminder
    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingReminderDTO {
        pub notification: ScheduledNotificationDTO,
        pub booking: BookingDTO,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BookingRemindersDTO {
        pub reminders: Vec<BookingReminderDTO>,
    }

    impl BookingRemindersDTO {
        pub fn new(reminders: Vec<(ScheduledNotification, Booking, Tz)>) -> Self {
            Self {
                reminders: reminders
                    .into_iter()
                    .map(|(notification, booking, timezone)| BookingReminderDTO {
                        notification: ScheduledNotificationDTO::new(notification),
                        booking: BookingDTO::new(booking, &timezone),
                    })
                    .collect(),
            }
        }
    }
}
