use crate::error::BookliError;
use actix_web::HttpRequest;
use bookli_domain::User;
use bookli_infra::BookliContext;

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

/// Authenticates the request by the api key in the `Authorization` header
/// and resolves the `User` it belongs to.
pub async fn protect_route(req: &HttpRequest, ctx: &BookliContext) -> Result<User, BookliError> {
    let api_key = match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => parse_authtoken_header(token),
            Err(_) => {
                return Err(BookliError::Unauthorized(
                    "Malformed api key provided".into(),
                ))
            }
        },
        None => {
            return Err(BookliError::Unauthorized(
                "Unable to find api key in the authorization header".into(),
            ))
        }
    };

    match ctx.repos.users.find_by_api_key(&api_key).await {
        Some(user) => Ok(user),
        None => Err(BookliError::Unauthorized(
            "The provided api key was not valid".into(),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use bookli_infra::setup_context;

    async fn setup_user(ctx: &BookliContext) -> User {
        let user = User::new(chrono_tz::UTC);
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    #[test]
    fn it_parses_auth_token_header() {
        assert_eq!(parse_authtoken_header("Bearer sk_123"), "sk_123");
        assert_eq!(parse_authtoken_header("bearer sk_123"), "sk_123");
        assert_eq!(parse_authtoken_header("  sk_123  "), "sk_123");
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_request_without_api_key() {
        let ctx = setup_context().await;
        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_request_with_unknown_api_key() {
        let ctx = setup_context().await;
        setup_user(&ctx).await;
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer sk_not_a_real_key"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }

    #[actix_web::main]
    #[test]
    async fn it_accepts_request_with_valid_api_key() {
        let ctx = setup_context().await;
        let user = setup_user(&ctx).await;
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", user.api_key)))
            .to_http_request();
        let res = protect_route(&req, &ctx).await;
        assert!(res.is_ok());
        assert_eq!(res.unwrap().id, user.id);
    }
}
