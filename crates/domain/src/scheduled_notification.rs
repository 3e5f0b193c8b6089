use crate::booking::Booking;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The notification type a `ScheduledNotification` will be delivered as.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationClass {
    BookingReminder1H,
}

/// The kind of entity a `ScheduledNotification` points at through its
/// `(notifiable_id, notifiable_type)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifiableType {
    Booking,
}

#[derive(Error, Debug)]
pub enum InvalidNotificationFieldError {
    #[error("Notification field value: {0} is not recognized")]
    Unrecognized(String),
}

impl Display for NotificationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookingReminder1H => write!(f, "booking_reminder_1h"),
        }
    }
}

impl FromStr for NotificationClass {
    type Err = InvalidNotificationFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking_reminder_1h" => Ok(Self::BookingReminder1H),
            _ => Err(InvalidNotificationFieldError::Unrecognized(s.to_string())),
        }
    }
}

impl Display for NotifiableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Booking => write!(f, "booking"),
        }
    }
}

impl FromStr for NotifiableType {
    type Err = InvalidNotificationFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking" => Ok(Self::Booking),
            _ => Err(InvalidNotificationFieldError::Unrecognized(s.to_string())),
        }
    }
}

/// A pending reminder for a notifiable entity, scoped to the owning
/// `User`. Rows are consumed out of band by the notification send job:
/// `processing` and `tries` track delivery attempts, `sent`/`sent_at`
/// record completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledNotification {
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

impl ScheduledNotification {
    /// A fresh pending one hour reminder for the given booking.
    pub fn new_booking_reminder_1h(booking: &Booking, scheduled_at: i64) -> Self {
        Self {
            id: Default::default(),
            user_id: booking.user_id.clone(),
            notification_class: NotificationClass::BookingReminder1H,
            notifiable_id: booking.id.clone(),
            notifiable_type: NotifiableType::Booking,
            sent: false,
            processing: false,
            scheduled_at,
            sent_at: None,
            tries: 0,
        }
    }
}

impl Entity for ScheduledNotification {
    fn id(&self) -> &ID {
        &self.id
    }
}
