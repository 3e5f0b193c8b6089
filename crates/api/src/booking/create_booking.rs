use super::subscribers::ScheduleRemindersOnBookingCreated;
use crate::error::BookliError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::create_booking::*;
use bookli_domain::{from_user_datetime, parse_user_datetime, Booking, User};
use bookli_infra::BookliContext;

pub async fn create_booking_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let start_ts = parse_datetime_in_timezone(&body.start, &user)?;
    let end_ts = parse_datetime_in_timezone(&body.end, &user)?;
    let timezone = user.timezone;

    let usecase = CreateBookingUseCase {
        user,
        start_ts,
        end_ts,
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Created().json(APIResponse::new(booking, &timezone)))
        .map_err(BookliError::from)
}

pub fn parse_datetime_in_timezone(raw: &str, user: &User) -> Result<i64, BookliError> {
    parse_user_datetime(raw)
        .map(|local| from_user_datetime(&local, &user.timezone).timestamp_millis())
        .map_err(|e| BookliError::BadClientData(e.to_string()))
}

#[derive(Debug)]
pub struct CreateBookingUseCase {
    pub user: User,
    pub start_ts: i64,
    pub end_ts: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    InvalidTimespan,
    StorageError,
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::InvalidTimespan => {
                Self::BadClientData("The booking end must be after its start".into())
            }
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateBookingUseCase {
    type Response = Booking;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        let booking = Booking {
            id: Default::default(),
            user_id: self.user.id.clone(),
            start_ts: self.start_ts,
            end_ts: self.end_ts,
            created: ctx.sys.get_timestamp_millis(),
            updated: ctx.sys.get_timestamp_millis(),
        };

        if !booking.is_valid() {
            return Err(UseCaseErrors::InvalidTimespan);
        }

        ctx.repos
            .bookings
            .insert(&booking)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(booking)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleRemindersOnBookingCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bookli_domain::{NotifiableType, HOUR_IN_MILLIS};
    use bookli_infra::setup_context;

    async fn setup_user(ctx: &BookliContext) -> User {
        let user = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    #[actix_web::main]
    #[test]
    async fn it_creates_booking() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;

        let usecase = CreateBookingUseCase {
            user: user.clone(),
            start_ts: 500,
            end_ts: 1300,
        };

        let res = execute(usecase, &ctx).await;
        assert!(res.is_ok());
        let booking = res.unwrap();
        assert!(ctx.repos.bookings.find(&booking.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_booking_with_invalid_timespan() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;

        let usecase = CreateBookingUseCase {
            user,
            start_ts: 1300,
            end_ts: 500,
        };

        let res = execute(usecase, &ctx).await;
        assert!(res.is_err());
        assert_eq!(res.unwrap_err(), UseCaseErrors::InvalidTimespan);
    }

    #[actix_web::main]
    #[test]
    async fn it_schedules_reminder_for_booking_far_in_the_future() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;
        let start_ts = ctx.sys.get_timestamp_millis() + 2 * HOUR_IN_MILLIS;

        let usecase = CreateBookingUseCase {
            user: user.clone(),
            start_ts,
            end_ts: start_ts + HOUR_IN_MILLIS,
        };

        let booking = execute(usecase, &ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].scheduled_at, start_ts - HOUR_IN_MILLIS);
    }

    #[actix_web::main]
    #[test]
    async fn it_skips_reminder_for_booking_starting_soon() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;
        let start_ts = ctx.sys.get_timestamp_millis() + HOUR_IN_MILLIS / 2;

        let usecase = CreateBookingUseCase {
            user: user.clone(),
            start_ts,
            end_ts: start_ts + HOUR_IN_MILLIS,
        };

        let booking = execute(usecase, &ctx).await.unwrap();

        let notifications = ctx
            .repos
            .scheduled_notifications
            .find_by_notifiable(&booking.id, NotifiableType::Booking, &user.id)
            .await;
        assert!(notifications.is_empty());
    }
}
