use mongodb::bson::doc;
use actix_web::{ Error, HttpResponse};

use crate::builtins::mongo::MongoDB;
use crate::Model::Settings::SiteSettings;
use crate::utils::response::Response;

pub async fn task() -> Result<HttpResponse, Error> {
    let db = MongoDB.connect();
    let collection = db.collection::<SiteSettings>("site_settings");

    let result = collection.find_one(
        doc!{},
    ).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    let settings = result.unwrap().unwrap_or_default();

    Ok(HttpResponse::Ok().content_type("application/json").json(settings))
}
