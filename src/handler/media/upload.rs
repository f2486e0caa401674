use actix::Addr;
use futures_util::StreamExt as _;
use std::collections::HashMap;
use actix_multipart::Multipart;
use serde_json::json;
use actix_web::{web, Error, HttpResponse, HttpRequest};

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::builtins::media::{MediaClient, ResourceType};
use crate::Handler::WebSocket::Lobby::Lobby;
use crate::Handler::WebSocket::WsMessage::RoomBroadcast;
use crate::Middleware::Auth::require_admin;
use crate::utils::response::Response;

const APK_CONTENT_TYPE: &str = "application/vnd.android.package-archive";

/// Relays one file from the admin form to the asset host. Ingest progress is
/// pushed to the `uploads` room chunk by chunk; the outbound transfer is a
/// single awaited call with no cancellation.
pub async fn task(
    req: HttpRequest,
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
    media: web::Data<MediaClient>,
    lobby: web::Data<Addr<Lobby>>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    require_admin(&req, &config, &identity).await?;

    let total = req
        .headers()
        .get("Content-Length")
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut text_fields = HashMap::new();
    let mut received: usize = 0;

    // Iterate over multipart fields; the form sends its text fields first.
    while let Some(item) = payload.next().await {
        let mut field = item?;

        let content_disposition = match field.content_disposition() {
            Some(cd) => cd,
            None => {
                return Ok(Response::bad_request("Missing content disposition"))
            },
        };

        let field_name = match content_disposition.get_name() {
            Some(name) => name.to_string(),
            None => {
                return Ok(Response::bad_request("Missing field name"))
            },
        };

        match content_disposition.get_filename() {
            Some(name) => {
                let file_name = name.to_string();
                let content_type = field
                    .content_type()
                    .map(|mime| mime.to_string())
                    .unwrap_or_default();

                let upload_id = text_fields
                    .get("upload_id")
                    .cloned()
                    .unwrap_or_else(|| file_name.clone());

                let mut bytes: Vec<u8> = Vec::new();

                while let Some(chunk) = field.next().await {
                    let data = chunk?;
                    bytes.extend_from_slice(&data);
                    received += data.len();

                    lobby.do_send(RoomBroadcast::event(
                        "uploads",
                        json!({
                            "event": "upload_progress",
                            "upload_id": &upload_id,
                            "received": received,
                            "total": total,
                        }),
                    ));
                }

                file = Some((file_name, content_type, bytes));
            },
            None => {
                let mut value = Vec::new();
                while let Some(chunk) = field.next().await {
                    value.extend_from_slice(&chunk?);
                }

                text_fields.insert(
                    field_name,
                    String::from_utf8_lossy(&value).to_string()
                );
            },
        };
    }

    let (file_name, content_type, bytes) = match file {
        Some(file) => file,
        None => return Ok(Response::bad_request("No file provided")),
    };

    let resource_type = ResourceType::from_str(
        text_fields
            .get("resource_type")
            .map(String::as_str)
            .unwrap_or("auto"),
    );

    if resource_type == ResourceType::Raw && content_type != APK_CONTENT_TYPE {
        return Ok(Response::bad_request("Please upload a valid .apk file"));
    }

    let upload_id = text_fields
        .get("upload_id")
        .cloned()
        .unwrap_or_else(|| file_name.clone());

    let result = media.upload(&file_name, bytes, resource_type).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::bad_gateway(&error.to_string()));
    }

    let uploaded = result.unwrap();

    lobby.do_send(RoomBroadcast::event(
        "uploads",
        json!({
            "event": "upload_complete",
            "upload_id": &upload_id,
            "url": &uploaded.secure_url,
        }),
    ));

    Ok(HttpResponse::Ok().content_type("application/json").json(json!({
        "url": uploaded.secure_url,
    })))
}
