mod booking;
mod date;
mod scheduled_notification;
mod shared;
mod user;

pub use booking::{Booking, HOUR_IN_MILLIS};
pub use date::{
    format_user_datetime, from_user_datetime, parse_user_datetime, to_user_datetime,
    InvalidDateTimeError,
};
pub use scheduled_notification::{NotifiableType, NotificationClass, ScheduledNotification};
pub use shared::entity::{Entity, ID};
pub use user::User;
