use serde::{ Serialize, Deserialize };
use serde_json::json;
use actix_web::{web, Error, HttpResponse};

use super::SignIn::session_cookie;
use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::utils::response::Response;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReqBody {
    id_token: String,
}

/// Federated sign-in exchange: the browser finishes the provider popup and
/// trades the ID token for a server session, behind the same allow-list.
pub async fn task(
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
    form_data: web::Json<ReqBody>,
) -> Result<HttpResponse, Error> {
    let id_token = form_data.id_token.trim().to_string();

    if id_token.is_empty() {
        return Ok(Response::bad_request("id_token required"));
    }

    let result = identity.lookup(&id_token).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::unauthorized(
            "Failed to sign in. Please try again."
        ));
    }

    let session = result.unwrap();

    if !config.is_admin_email(&session.email) {
        return Ok(Response::forbidden(
            "Access Denied. This panel is for administrators only."
        ));
    }

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .cookie(session_cookie(&id_token))
        .json(json!({
            "email": session.email,
            "user_id": session.user_id,
        })))
}
