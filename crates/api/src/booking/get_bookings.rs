use crate::error::BookliError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::get_bookings::*;
use bookli_infra::BookliContext;

pub async fn get_bookings_controller(
    http_req: HttpRequest,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let user = protect_route(&http_req, &ctx).await?;

    let bookings = ctx.repos.bookings.find_by_user(&user.id).await;

    Ok(HttpResponse::Ok().json(APIResponse::new(bookings, &user.timezone)))
}
