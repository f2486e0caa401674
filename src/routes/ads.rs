use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/ads")
        .route(
            "/update",
            web::post().to(Handler::Ads::Update::task)
        )
        .route(
            "/get",
            web::get().to(Handler::Ads::Get::task)
        )
    );
}
