mod booking;
mod notification;
mod status;
mod user;

pub mod dtos {
    pub use crate::booking::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::booking::api::*;
pub use crate::notification::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
