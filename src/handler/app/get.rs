use mongodb::bson::doc;
use actix_web::{web, Error, HttpResponse};

use crate::builtins::mongo::MongoDB;
use crate::Model::App::AppRecord;
use crate::utils::response::Response;

pub async fn task(uuid: web::Path<String>) -> Result<HttpResponse, Error> {
    let uuid = uuid.into_inner();
    if uuid.is_empty() {
        return Ok(Response::bad_request("app id required"));
    }

    let db = MongoDB.connect();
    let collection = db.collection::<AppRecord>("apps");

    let result = collection.find_one(
        doc!{ "uuid": &uuid },
    ).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    let option = result.unwrap();
    if let None = option {
        return Ok(Response::not_found("App not found"));
    }

    Ok(HttpResponse::Ok().content_type("application/json").json(option.unwrap()))
}
