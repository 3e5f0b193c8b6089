use super::subscribers::PurgeRemindersOnBookingDeleted;
use crate::error::BookliError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::delete_booking::*;
use bookli_domain::{Booking, ID};
use bookli_infra::BookliContext;

pub async fn delete_booking_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let user = protect_route(&http_req, &ctx).await?;
    let timezone = user.timezone;

    let usecase = DeleteBookingUseCase {
        user_id: user.id,
        booking_id: path_params.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking, &timezone)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct DeleteBookingUseCase {
    pub user_id: ID,
    pub booking_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    NotFound(ID),
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteBookingUseCase {
    type Response = Booking;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.bookings.find(&self.booking_id).await {
            Some(booking) if booking.user_id == self.user_id => {
                ctx.repos.bookings.delete(&booking.id).await;

                Ok(booking)
            }
            _ => Err(UseCaseErrors::NotFound(self.booking_id.clone())),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(PurgeRemindersOnBookingDeleted)]
    }
}
