use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
        .route(
            "/sign_in",
            web::post().to(Handler::Auth::SignIn::task)
        )
        .route(
            "/session",
            web::post().to(Handler::Auth::Session::task)
        )
        .route(
            "/sign_out",
            web::post().to(Handler::Auth::SignOut::task)
        )
        .route(
            "/myself",
            web::get().to(Handler::Auth::Myself::task)
        )
    );
}
