use serde::{ Serialize, Deserialize };
use serde_json::json;
use actix_web::{web, Error, HttpResponse, HttpRequest};

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::builtins::textgen::TextGenClient;
use crate::Middleware::Auth::require_admin;
use crate::utils::response::Response;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReqBody {
    app_name: String,
    app_details: String,
}

/// One-shot copywriting call. On failure the caller keeps whatever is in
/// the form and can type the copy manually.
pub async fn task(
    req: HttpRequest,
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
    textgen: web::Data<TextGenClient>,
    form_data: web::Json<ReqBody>,
) -> Result<HttpResponse, Error> {
    require_admin(&req, &config, &identity).await?;

    let app_name = form_data.app_name.trim();
    let app_details = form_data.app_details.trim();

    if app_name.is_empty() || app_details.is_empty() {
        return Ok(Response::bad_request(
            "Please enter an App Name and App Details first"
        ));
    }

    let result = textgen.generate_app_description(app_name, app_details).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::bad_gateway("Failed to generate description"));
    }

    let copy = result.unwrap();

    Ok(HttpResponse::Ok().content_type("application/json").json(json!({
        "description": copy.description,
        "feature_highlights": copy.feature_highlights,
    })))
}
