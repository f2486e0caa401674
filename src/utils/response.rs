use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Plain message body for successful mutations.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

impl Response {
    pub fn bad_request(message: &str) -> HttpResponse {
        HttpResponse::BadRequest()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn unauthorized(message: &str) -> HttpResponse {
        HttpResponse::Unauthorized()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn forbidden(message: &str) -> HttpResponse {
        HttpResponse::Forbidden()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn not_found(message: &str) -> HttpResponse {
        HttpResponse::NotFound()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn bad_gateway(message: &str) -> HttpResponse {
        HttpResponse::BadGateway()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }

    pub fn internal_server_error(message: &str) -> HttpResponse {
        HttpResponse::InternalServerError()
            .content_type("application/json")
            .json(json!({ "error": message }))
    }
}
