use actix::Actor;
use actix_web::{web, App, HttpServer};
use tera::Tera;

pub mod model;
pub use model as Model;

pub mod routes;
pub use routes as Routes;

pub mod handler;
pub use handler as Handler;

pub mod builtins;
pub use builtins as BuiltIns;

pub mod middleware;
pub use middleware as Middleware;

pub mod markup;
pub mod utils;

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::builtins::media::MediaClient;
use crate::builtins::mongo::MongoDB;
use crate::builtins::textgen::TextGenClient;
use crate::handler::web_socket::lobby::Lobby;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    if let Err(error) = MongoDB.init(&config.mongo_uri, &config.mongo_db).await {
        log::error!("{:?}", error);
        std::process::exit(1);
    }

    let template = match Tera::new("templates/**/*.html") {
        Ok(template) => template,
        Err(error) => {
            log::error!("{:?}", error);
            std::process::exit(1);
        },
    };

    let identity = IdentityClient::new(&config.identity_api_key);
    let media = MediaClient::new(
        &config.media_cloud_name,
        &config.media_api_key,
        &config.media_api_secret,
    );
    let textgen = TextGenClient::new(&config.textgen_api_key, &config.textgen_model);

    let lobby = Lobby::default().start();

    let bind_address = (config.host.clone(), config.port);
    log::info!("listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(template.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(identity.clone()))
            .app_data(web::Data::new(media.clone()))
            .app_data(web::Data::new(textgen.clone()))
            .app_data(web::Data::new(lobby.clone()))
            .configure(Routes::App::router)
            .configure(Routes::Settings::router)
            .configure(Routes::Ads::router)
            .configure(Routes::Auth::router)
            .configure(Routes::Media::router)
            .configure(Routes::Generate::router)
            .configure(Routes::WebSocket::router)
            .route("/", web::get().to(markup::home))
            .route("/app/{uuid}", web::get().to(markup::app_detail))
            .route("/login", web::get().to(markup::sign_in))
            .route("/admin", web::get().to(markup::admin_dashboard))
            .route("/privacy-policy", web::get().to(markup::privacy_policy))
            .route("/terms-of-service", web::get().to(markup::terms_of_service))
    })
    .bind(bind_address)?
    .run()
    .await
}
