use super::create_booking::parse_datetime_in_timezone;
use super::subscribers::SyncRemindersOnBookingUpdated;
use crate::error::BookliError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::update_booking::*;
use bookli_domain::{Booking, ID};
use bookli_infra::BookliContext;

pub async fn update_booking_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let start_ts = parse_datetime_in_timezone(&body.start, &user)?;
    let end_ts = parse_datetime_in_timezone(&body.end, &user)?;
    let timezone = user.timezone;

    let usecase = UpdateBookingUseCase {
        user_id: user.id,
        booking_id: path_params.booking_id.clone(),
        start_ts,
        end_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking, &timezone)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct UpdateBookingUseCase {
    pub user_id: ID,
    pub booking_id: ID,
    pub start_ts: i64,
    pub end_ts: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    NotFound(ID),
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
            UseCaseErrors::InvalidTimespan => {
                Self::BadClientData("The booking end must be after its start".into())
            }
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateBookingUseCase {
    type Response = Booking;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let mut booking = match ctx.repos.bookings.find(&self.booking_id).await {
            Some(booking) if booking.user_id == self.user_id => booking,
            _ => return Err(UseCaseErrors::NotFound(self.booking_id.clone())),
        };

        booking.start_ts = self.start_ts;
        booking.end_ts = self.end_ts;
        booking.updated = ctx.sys.get_timestamp_millis();

        if !booking.is_valid() {
            return Err(UseCaseErrors::InvalidTimespan);
        }

        ctx.repos
            .bookings
            .save(&booking)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(booking)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(SyncRemindersOnBookingUpdated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bookli_domain::{NotifiableType, User, HOUR_IN_MILLIS};
    use bookli_infra::setup_context;

    struct TestContext {
        ctx: BookliContext,
        user: User,
        booking: Booking,
    }

    async fn setup() -> TestContext {
        let ctx = setup_context().await;
        let user = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&user).await.unwrap();

        let start_ts = ctx.sys.get_timestamp_millis() + 2 * HOUR_IN_MILLIS;
        let booking = Booking {
            id: Default::default(),
            user_id: user.id.clone(),
            start_ts,
            end_ts: start_ts + HOUR_IN_MILLIS,
            created: 0,
            updated: 0,
        };
        ctx.repos.bookings.insert(&booking).await.unwrap();

        TestContext { ctx, user, booking }
    }

    #[actix_web::main]
    #[test]
    async fn it_updates_booking_and_reschedules_reminder() {
        let TestContext { ctx, user, booking } = setup().await;

        let new_start = booking.start_ts + 2 * HOUR_IN_MILLIS;
        let usecase = UpdateBookingUseCase {
            user_id: user.id.clone(),
            booking_id: booking.id.clone(),
            start_ts: new_start,
            end_ts: new_start + HOUR_IN_MILLIS,
        };

        let res = execute(usecase, &ctx).await;
        assert!(res.is_ok());

        let updated = ctx.repos.bookings.find(&booking.id).await.unwrap();
        assert_eq!(updated.start_ts, new_start);

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].scheduled_at, new_start - HOUR_IN_MILLIS);
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_update_with_invalid_timespan() {
        let TestContext { ctx, user, booking } = setup().await;

        let usecase = UpdateBookingUseCase {
            user_id: user.id,
            booking_id: booking.id.clone(),
            start_ts: booking.end_ts,
            end_ts: booking.start_ts,
        };

        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseErrors::InvalidTimespan);

        // Nothing was written
        let unchanged = ctx.repos.bookings.find(&booking.id).await.unwrap();
        assert_eq!(unchanged.start_ts, booking.start_ts);
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_update_of_other_users_booking() {
        let TestContext { ctx, booking, .. } = setup().await;
        let intruder = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&intruder).await.unwrap();

        let usecase = UpdateBookingUseCase {
            user_id: intruder.id,
            booking_id: booking.id.clone(),
            start_ts: booking.start_ts,
            end_ts: booking.end_ts,
        };

        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseErrors::NotFound(booking.id));
    }
}
