use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/generate")
        .route(
            "/description",
            web::post().to(Handler::Generate::Description::task)
        )
        .route(
            "/seo",
            web::post().to(Handler::Generate::Seo::task)
        )
    );
}
