use crate::shared::entity::{Entity, ID};
use bookli_utils::create_random_secret;
use chrono_tz::Tz;

const API_KEY_LEN: usize = 30;

/// A `User` owns `Booking`s and receives the reminders scheduled for them.
/// All datetimes a user submits are interpreted in its `timezone`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub timezone: Tz,
    /// Secret api key the user authenticates requests with
    pub api_key: String,
}

impl User {
    pub fn new(timezone: Tz) -> Self {
        Self {
            id: Default::default(),
            timezone,
            api_key: Self::generate_api_key(),
        }
    }

    pub fn generate_api_key() -> String {
        let rand_secret = create_random_secret(API_KEY_LEN);
        format!("sk_{}", rand_secret)
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
