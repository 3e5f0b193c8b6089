use bookli_domain::{format_user_datetime, Booking, ID};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDTO {
    pub id: ID,
    pub user_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    /// Start in the owner's local wall clock time
    pub start: String,
    /// End in the owner's local wall clock time
    pub end: String,
    pub created: i64,
    pub updated: i64,
}

impl BookingDTO {
    pub fn new(booking: Booking, timezone: &Tz) -> Self {
        Self {
            id: booking.id.clone(),
            user_id: booking.user_id.clone(),
            start_ts: booking.start_ts,
            end_ts: booking.end_ts,
            start: format_user_datetime(booking.start_ts, timezone),
            end: format_user_datetime(booking.end_ts, timezone),
            created: booking.created,
            updated: booking.updated,
        }
    }
}
