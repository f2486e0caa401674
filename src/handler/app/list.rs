use mongodb::bson::doc;
use serde::{ Serialize, Deserialize };
use actix_web::{web, Error, HttpResponse};

use crate::builtins::mongo::MongoDB;
use crate::Model::App::{partition_featured, AppRecord};
use crate::utils::mongo::find_by_creation;
use crate::utils::response::Response;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Query {
    limit: Option<i64>,
    page: Option<i64>,
}

/// Public listing: newest first, then featured records stably moved to the
/// front.
pub async fn task(query: web::Query<Query>) -> Result<HttpResponse, Error> {
    let db = MongoDB.connect();
    let collection = db.collection::<AppRecord>("apps");

    let result = find_by_creation(&collection, doc!{}, query.limit, query.page).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    let apps = partition_featured(result.unwrap());

    Ok(HttpResponse::Ok().content_type("application/json").json(apps))
}
