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
    app_description: String,
}

pub async fn task(
    req: HttpRequest,
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
    textgen: web::Data<TextGenClient>,
    form_data: web::Json<ReqBody>,
) -> Result<HttpResponse, Error> {
    require_admin(&req, &config, &identity).await?;

    let app_name = form_data.app_name.trim();
    let app_description = form_data.app_description.trim();

    if app_name.is_empty() || app_description.is_empty() {
        return Ok(Response::bad_request(
            "Please enter an App Name and a Description first"
        ));
    }

    let result = textgen.generate_seo_metadata(app_name, app_description).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::bad_gateway("Failed to generate SEO metadata"));
    }

    let metadata = result.unwrap();

    Ok(HttpResponse::Ok().content_type("application/json").json(json!({
        "meta_description": metadata.meta_description,
        "meta_keywords": metadata.meta_keywords,
    })))
}
