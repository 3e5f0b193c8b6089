use crate::date::{from_user_datetime, to_user_datetime};
use crate::shared::entity::{Entity, ID};
use chrono::Duration;
use chrono_tz::Tz;

pub const HOUR_IN_MILLIS: i64 = 60 * 60 * 1000;

/// A `Booking` is a time interval owned by a `User`. Timestamps are UTC
/// millis, the owning user's timezone only matters at the API boundary and
/// when computing the reminder time.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: ID,
    pub user_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
    pub created: i64,
    pub updated: i64,
}

impl Booking {
    pub fn is_valid(&self) -> bool {
        self.start_ts < self.end_ts
    }

    /// The instant at which the one hour reminder for this booking should
    /// fire: one wall clock hour before the start in the owner's timezone.
    /// Around a DST transition this is not the same as subtracting 3600
    /// seconds from the start instant.
    pub fn reminder_at(&self, timezone: &Tz) -> i64 {
        match to_user_datetime(self.start_ts, timezone) {
            Some(local_start) => {
                from_user_datetime(&(local_start - Duration::hours(1)), timezone)
                    .timestamp_millis()
            }
            None => self.start_ts - HOUR_IN_MILLIS,
        }
    }
}

impl Entity for Booking {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::date::parse_user_datetime;

    fn oslo() -> Tz {
        "Europe/Oslo".parse().expect("A valid timezone")
    }

    fn booking_starting_at(local: &str, timezone: &Tz) -> Booking {
        let start = from_user_datetime(&parse_user_datetime(local).unwrap(), timezone)
            .timestamp_millis();
        Booking {
            id: Default::default(),
            user_id: Default::default(),
            start_ts: start,
            end_ts: start + HOUR_IN_MILLIS,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn it_validates_timespan() {
        let mut booking = booking_starting_at("2024-01-10 12:00", &oslo());
        assert!(booking.is_valid());
        booking.end_ts = booking.start_ts;
        assert!(!booking.is_valid());
        booking.end_ts = booking.start_ts - 1;
        assert!(!booking.is_valid());
    }

    #[test]
    fn reminder_is_one_hour_before_start() {
        let tz = oslo();
        let booking = booking_starting_at("2024-01-10 12:00", &tz);
        assert_eq!(booking.reminder_at(&tz), booking.start_ts - HOUR_IN_MILLIS);
    }

    #[test]
    fn reminder_follows_wall_clock_across_dst() {
        let tz = oslo();
        // Start at 03:30 local right after the spring transition. One wall
        // clock hour earlier is 02:30 which does not exist and rolls
        // forward to 03:30, i.e. the start itself.
        let booking = booking_starting_at("2024-03-31 03:30", &tz);
        assert_eq!(booking.reminder_at(&tz), booking.start_ts);
    }
}
