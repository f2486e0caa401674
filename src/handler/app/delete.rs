use actix::Addr;
use mongodb::bson::doc;
use serde_json::json;
use actix_web::{web, Error, HttpResponse, HttpRequest};

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::builtins::mongo::MongoDB;
use crate::Handler::WebSocket::Lobby::Lobby;
use crate::Handler::WebSocket::WsMessage::RoomBroadcast;
use crate::Middleware::Auth::require_admin;
use crate::Model::App::AppRecord;
use crate::utils::response::Response;

/// Removes exactly one record by id. The dashboard asks for confirmation
/// before calling; there is no batch delete and no undo.
pub async fn task(
    req: HttpRequest,
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
    lobby: web::Data<Addr<Lobby>>,
    uuid: web::Path<String>,
) -> Result<HttpResponse, Error> {
    require_admin(&req, &config, &identity).await?;

    let uuid = uuid.into_inner();
    if uuid.is_empty() {
        return Ok(Response::bad_request("app id required"));
    }

    let db = MongoDB.connect();
    let collection = db.collection::<AppRecord>("apps");

    let result = collection.delete_one(
        doc!{ "uuid": &uuid },
    ).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    let delete_result = result.unwrap();
    if delete_result.deleted_count == 0 {
        return Ok(Response::not_found("App not found"));
    }

    lobby.do_send(RoomBroadcast::event(
        "apps",
        json!({ "event": "deleted", "uuid": &uuid }),
    ));

    Ok(HttpResponse::Ok().content_type("application/json").json(
        Response { message: "Successfully Deleted".to_string() }
    ))
}
