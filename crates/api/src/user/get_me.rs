use crate::{error::BookliError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use bookli_api_structs::get_me::*;
use bookli_infra::BookliContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<BookliContext>,
) -> Result<HttpResponse, BookliError> {
    let user = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
