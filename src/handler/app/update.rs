use actix::Addr;
use mongodb::bson::doc;
use serde::{ Serialize, Deserialize };
use serde_json::json;
use actix_web::{web, Error, HttpResponse, HttpRequest};

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::builtins::mongo::MongoDB;
use crate::builtins::textgen::META_DESCRIPTION_LIMIT;
use crate::Handler::WebSocket::Lobby::Lobby;
use crate::Handler::WebSocket::WsMessage::RoomBroadcast;
use crate::Middleware::Auth::require_admin;
use crate::Model::App::AppRecord;
use crate::utils::response::Response;
use crate::utils::string::truncate_chars;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReqBody {
    name: String,
    website_url: Option<String>,
    apk_url: Option<String>,
    icon_url: String,
    description: String,
    feature_highlights: String,
    version: Option<String>,
    tags: Option<Vec<String>>,
    screenshots: Option<Vec<String>>,
    featured: Option<bool>,
    meta_description: Option<String>,
    meta_keywords: Option<String>,
}

/// Merge-update of one record. `created_at` and `downloads` are server
/// owned and never touched here.
pub async fn task(
    req: HttpRequest,
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
    lobby: web::Data<Addr<Lobby>>,
    uuid: web::Path<String>,
    form_data: web::Json<ReqBody>,
) -> Result<HttpResponse, Error> {
    require_admin(&req, &config, &identity).await?;

    let uuid = uuid.into_inner();
    if uuid.is_empty() {
        return Ok(Response::bad_request("app id required"));
    }

    let form = sanitize(&form_data);

    if let Err(error) = check_fields(&form) {
        return Ok(Response::bad_request(&error));
    }

    let db = MongoDB.connect();
    let collection = db.collection::<AppRecord>("apps");

    let result = collection.update_one(
        doc!{ "uuid": &uuid },
        doc!{ "$set": {
            "name": &form.name,
            "website_url": form.website_url.clone(),
            "apk_url": form.apk_url.clone(),
            "icon_url": &form.icon_url,
            "description": &form.description,
            "feature_highlights": &form.feature_highlights,
            "version": form.version.clone(),
            "tags": form.tags.clone().unwrap_or_default(),
            "screenshots": form.screenshots.clone().unwrap_or_default(),
            "featured": form.featured.unwrap_or(false),
            "meta_description": form.meta_description.clone(),
            "meta_keywords": form.meta_keywords.clone(),
        }},
    ).await;

    if let Err(error) = result {
        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(&error.to_string()));
    }

    let update_result = result.unwrap();
    if update_result.matched_count == 0 {
        return Ok(Response::not_found("App not found"));
    }

    lobby.do_send(RoomBroadcast::event(
        "apps",
        json!({ "event": "updated", "uuid": &uuid }),
    ));

    Ok(HttpResponse::Ok().content_type("application/json").json(
        Response { message: "Successfully Updated".to_string() }
    ))
}

fn sanitize(form_data: &ReqBody) -> ReqBody {
    let mut form = form_data.clone();
    form.name = form.name.trim().to_string();
    form.website_url = non_empty(form.website_url.as_deref());
    form.apk_url = non_empty(form.apk_url.as_deref());
    form.icon_url = form.icon_url.trim().to_string();
    form.description = form.description.trim().to_string();
    form.feature_highlights = form.feature_highlights.trim().to_string();
    form.version = non_empty(form.version.as_deref());
    form.meta_description = non_empty(form.meta_description.as_deref())
        .map(|description| truncate_chars(&description, META_DESCRIPTION_LIMIT));
    form.meta_keywords = non_empty(form.meta_keywords.as_deref());
    form.tags = form.tags.map(trimmed_list);
    form.screenshots = form.screenshots.map(trimmed_list);

    form
}

fn non_empty(value: Option<&str>) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

fn trimmed_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

fn check_fields(form: &ReqBody) -> Result<(), String> {
    if form.name.chars().count() < 2 {
        return Err("Name must be at least 2 characters".to_string());
    }

    if form.website_url.is_none() && form.apk_url.is_none() {
        return Err("Either a Website URL or an APK URL is required".to_string());
    }

    if let Some(website_url) = &form.website_url {
        check_url("Website URL", website_url)?;
    }
    if let Some(apk_url) = &form.apk_url {
        check_url("APK URL", apk_url)?;
    }

    check_url("Icon URL", &form.icon_url)?;

    if let Some(screenshots) = &form.screenshots {
        for screenshot in screenshots {
            check_url("Screenshot URL", screenshot)?;
        }
    }

    if form.description.chars().count() < 10 {
        return Err("Description must be at least 10 characters".to_string());
    }

    if form.feature_highlights.chars().count() < 10 {
        return Err("Feature highlights must be at least 10 characters".to_string());
    }

    Ok(())
}

fn check_url(label: &str, value: &str) -> Result<(), String> {
    match url::Url::parse(value) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        _ => Err(format!("{} must be a valid URL", label)),
    }
}
