use crate::dtos::UserDTO;
use bookli_domain::User;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user: UserDTO,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            user: UserDTO::new(user),
        }
    }
}

pub mod create_user {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// The instance wide secret code that permits creating users
        pub code: String,
        /// IANA timezone name, e.g. "Europe/Oslo"
        pub timezone: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: UserDTO,
        pub api_key: String,
    }

    impl APIResponse {
        pub fn new(user: User) -> Self {
            let api_key = user.api_key.clone();
            Self {
                user: UserDTO::new(user),
                api_key,
            }
        }
    }
}

pub mod get_me {
    use super::*;

    pub type APIResponse = UserResponse;
}
