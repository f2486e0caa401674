use actix::Addr;
use mongodb::bson::doc;
use serde_json::json;
use actix_web::{web, Error, HttpResponse};

use crate::builtins::mongo::MongoDB;
use crate::Handler::WebSocket::Lobby::Lobby;
use crate::Handler::WebSocket::WsMessage::RoomBroadcast;
use crate::Model::App::AppRecord;
use crate::utils::response::Response;

/// Side effect of the visitor clicking download: bump the counter by one,
/// hand back the package URL for the browser to open. The counter only
/// moves when this endpoint fires.
pub async fn task(
    uuid: web::Path<String>,
    lobby: web::Data<Addr<Lobby>>,
) -> Result<HttpResponse, Error> {
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

    let app = option.unwrap();
    if !app.has_apk() {
        return Ok(Response::bad_request("This app has no APK download"));
    }

    let result = collection.update_one(
        doc!{ "uuid": &uuid },
        doc!{ "$inc": { "downloads": 1 } },
    ).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    lobby.do_send(RoomBroadcast::event(
        "apps",
        json!({ "event": "updated", "uuid": &uuid }),
    ));

    Ok(HttpResponse::Ok().content_type("application/json").json(json!({
        "apk_url": app.apk_url,
        "downloads": app.downloads + 1,
    })))
}
