use serde_json::json;
use actix_web::{web, Error, HttpResponse, HttpRequest};

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::Middleware::Auth::session_token;
use crate::utils::response::Response;

/// Current session, as the dashboard sees it.
pub async fn task(
    req: HttpRequest,
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
) -> Result<HttpResponse, Error> {
    let token = match session_token(&req) {
        Some(token) => token,
        None => return Ok(Response::unauthorized("Missing session token")),
    };

    let result = identity.lookup(&token).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::unauthorized("Invalid session token"));
    }

    let session = result.unwrap();

    Ok(HttpResponse::Ok().content_type("application/json").json(json!({
        "email": session.email,
        "user_id": session.user_id,
        "admin": config.is_admin_email(&session.email),
    })))
}
