use crate::dtos::BookingDTO;
use bookli_domain::{Booking, ID};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking: BookingDTO,
}

impl BookingResponse {
    pub fn new(booking: Booking, timezone: &Tz) -> Self {
        Self {
            booking: BookingDTO::new(booking, timezone),
        }
    }
}

pub mod create_booking {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Wall clock start in the user's timezone, e.g. "2024-03-01 10:30"
        pub start: String,
        /// Wall clock end in the user's timezone
        pub end: String,
    }

    pub type APIResponse = BookingResponse;
}

pub mod get_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    pub type APIResponse = BookingResponse;
}

pub mod get_bookings {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub bookings: Vec<BookingDTO>,
    }

    impl APIResponse {
        pub fn new(bookings: Vec<Booking>, timezone: &Tz) -> Self {
            Self {
                bookings: bookings
                    .into_iter()
                    .map(|booking| BookingDTO::new(booking, timezone))
                    .collect(),
            }
        }
    }
}

pub mod update_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub start: String,
        pub end: String,
    }

    pub type APIResponse = BookingResponse;
}

pub mod delete_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    pub type APIResponse = BookingResponse;
}
