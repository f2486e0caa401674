use actix_web::web;
use crate::Handler;

pub fn router(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/app")
        .service(
            web::resource("")
                //Create App
                .route(web::post().to(Handler::App::Create::task))
                //List Apps
                .route(web::get().to(Handler::App::List::task))
        )
        .service(
            web::resource("/{uuid}")
                //Get Details
                .route(web::get().to(Handler::App::Get::task))
                //Update App
                .route(web::put().to(Handler::App::Update::task))
                //Delete App
                .route(web::delete().to(Handler::App::Delete::task))
        )
        //Count a download and hand back the package URL
        .route(
          "/{uuid}/download",
          web::post().to(Handler::App::Download::task)
        )
    );
}
