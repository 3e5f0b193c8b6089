use bookli_domain::{User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub timezone: String,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id.clone(),
            timezone: user.timezone.to_string(),
        }
    }
}
