use crate::error::BookliError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::get_booking::*;
use bookli_domain::{Booking, ID};
use bookli_infra::BookliContext;

pub async fn get_booking_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let user = protect_route(&http_req, &ctx).await?;
    let timezone = user.timezone;

    let usecase = GetBookingUseCase {
        user_id: user.id,
        booking_id: path_params.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking, &timezone)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct GetBookingUseCase {
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
impl UseCase for GetBookingUseCase {
    type Response = Booking;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.bookings.find(&self.booking_id).await {
            Some(booking) if booking.user_id == self.user_id => Ok(booking),
            _ => Err(UseCaseErrors::NotFound(self.booking_id.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bookli_domain::{User, HOUR_IN_MILLIS};
    use bookli_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn it_does_not_reveal_other_users_bookings() {
        let ctx = setup_context().await;
        let owner = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&owner).await.unwrap();
        let intruder = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&intruder).await.unwrap();

        let booking = Booking {
            id: Default::default(),
            user_id: owner.id.clone(),
            start_ts: 0,
            end_ts: HOUR_IN_MILLIS,
            created: 0,
            updated: 0,
        };
        ctx.repos.bookings.insert(&booking).await.unwrap();

        let mut usecase = GetBookingUseCase {
            user_id: intruder.id,
            booking_id: booking.id.clone(),
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseErrors::NotFound(booking.id.clone()));

        let mut usecase = GetBookingUseCase {
            user_id: owner.id,
            booking_id: booking.id.clone(),
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap(), booking);
    }
}
