use actix_web::cookie::{Cookie, SameSite};
use actix_web::{ Error, HttpResponse};

use crate::Middleware::Auth::SESSION_COOKIE;
use crate::utils::response::Response;

pub async fn task() -> Result<HttpResponse, Error> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .cookie(cookie)
        .json(Response { message: "Successfully Signed Out".to_string() }))
}
