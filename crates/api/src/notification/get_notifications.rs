use crate::error::BookliError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::get_notifications::*;
use bookli_infra::BookliContext;

pub async fn get_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let user = protect_route(&http_req, &ctx).await?;

    let notifications = ctx
        .repos
        .scheduled_notifications
        .find_pending_by_user(&user.id)
        .await;

    Ok(HttpResponse::Ok().json(APIResponse::new(notifications)))
}
