use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/settings")
        .route(
            "/update",
            web::post().to(Handler::Settings::Update::task)
        )
        .route(
            "/get",
            web::get().to(Handler::Settings::Get::task)
        )
    );
}
