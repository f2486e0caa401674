use actix::Addr;
use chrono::Utc;
use mongodb::bson::doc;
use serde::{ Serialize, Deserialize };
use serde_json::json;
use actix_web::{web, Error, HttpResponse, HttpRequest};

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::builtins::mongo::MongoDB;
use crate::Handler::WebSocket::Lobby::Lobby;
use crate::Handler::WebSocket::WsMessage::RoomBroadcast;
use crate::Middleware::Auth::require_admin;
use crate::Model::Settings::AdSettings;
use crate::utils::response::Response;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PostData {
    home_page_ad_key: Option<String>,
    app_detail_page_ad_key: Option<String>,
}

pub async fn task(
    req: HttpRequest,
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
    lobby: web::Data<Addr<Lobby>>,
    form_data: web::Json<PostData>,
) -> Result<HttpResponse, Error> {
    let user = require_admin(&req, &config, &identity).await?;

    let user_id = user.user_id;

    let post_data = sanitize(&form_data);

    let db = MongoDB.connect();
    let collection = db.collection::<AdSettings>("ad_settings");

    let result = collection.find_one(
        doc!{},
    ).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    let option = result.unwrap();
    if let Some(_) = option {
        let result = collection.update_one(
            doc!{},
            doc!{"$set": {
                "home_page_ad_key": post_data.home_page_ad_key.clone(),
                "app_detail_page_ad_key": post_data.app_detail_page_ad_key.clone(),
                "updated_at": Utc::now().timestamp_millis(),
                "updated_by": &user_id,
            }},
        ).await;

        if let Err(error) = result {
            log::error!("{:?}", error);
            return Ok(Response::internal_server_error(&error.to_string()));
        }
    }
    else {
        let result = collection.insert_one(
            AdSettings {
                home_page_ad_key: post_data.home_page_ad_key.clone(),
                app_detail_page_ad_key: post_data.app_detail_page_ad_key.clone(),
                created_at: Some(Utc::now().timestamp_millis()),
                created_by: Some(user_id.clone()),
                updated_at: None,
                updated_by: None,
            },
        ).await;

        if let Err(error) = result {
            log::error!("{:?}", error);
            return Ok(Response::internal_server_error(&error.to_string()));
        }
    }

    lobby.do_send(RoomBroadcast::event(
        "settings",
        json!({ "event": "updated", "document": "ad_settings" }),
    ));

    Ok(HttpResponse::Ok().content_type("application/json").json(
        Response { message: "Successfully Updated".to_string() }
    ))
}

fn sanitize(post_data: &PostData) -> PostData {
    let mut form = post_data.clone();
    form.home_page_ad_key = non_empty(form.home_page_ad_key.as_deref());
    form.app_detail_page_ad_key = non_empty(form.app_detail_page_ad_key.as_deref());

    form
}

fn non_empty(value: Option<&str>) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}
