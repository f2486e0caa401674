use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/media")
        .route(
            "/upload",
            web::post().to(Handler::Media::Upload::task)
        )
    );
}
