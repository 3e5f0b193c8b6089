use crate::error::BookliError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use bookli_api_structs::create_user::*;
use bookli_domain::User;
use bookli_infra::BookliContext;
use chrono_tz::Tz;

pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let body = body.0;
    let timezone: Tz = body
        .timezone
        .parse()
        .map_err(|_| BookliError::BadClientData(format!("Invalid timezone: {}", body.timezone)))?;

    let usecase = CreateUserUseCase {
        code: body.code,
        timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(BookliError::from)
}

#[derive(Debug)]
pub struct CreateUserUseCase {
    pub code: String,
    pub timezone: Tz,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseErrors {
    InvalidCode,
    StorageError,
}

impl From<UseCaseErrors> for BookliError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::InvalidCode => {
                Self::Unauthorized("Invalid code provided for creating a user".into())
            }
            UseCaseErrors::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &BookliContext) -> Result<Self::Response, Self::Errors> {
        if self.code != ctx.config.create_user_secret_code {
            return Err(UseCaseErrors::InvalidCode);
        }

        let user = User::new(self.timezone);

        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(user)
    }
}
