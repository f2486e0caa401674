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
use crate::Model::Settings::SiteSettings;
use crate::utils::response::Response;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PostData {
    site_name: Option<String>,
    tagline: Option<String>,
    icon_url: Option<String>,
    login_enabled: Option<bool>,
    twitter_url: Option<String>,
    github_url: Option<String>,
    linkedin_url: Option<String>,
}

/// Upsert of the branding singleton. First write creates the document,
/// later writes merge into it.
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

    if let Err(error) = check_fields(&post_data) {
        return Ok(Response::bad_request(&error));
    }

    let db = MongoDB.connect();
    let collection = db.collection::<SiteSettings>("site_settings");

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
                "site_name": post_data.site_name.clone(),
                "tagline": post_data.tagline.clone(),
                "icon_url": post_data.icon_url.clone(),
                "login_enabled": post_data.login_enabled.unwrap_or(true),
                "twitter_url": post_data.twitter_url.clone(),
                "github_url": post_data.github_url.clone(),
                "linkedin_url": post_data.linkedin_url.clone(),
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
            SiteSettings {
                site_name: post_data.site_name.clone(),
                tagline: post_data.tagline.clone(),
                icon_url: post_data.icon_url.clone(),
                login_enabled: Some(post_data.login_enabled.unwrap_or(true)),
                twitter_url: post_data.twitter_url.clone(),
                github_url: post_data.github_url.clone(),
                linkedin_url: post_data.linkedin_url.clone(),
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
        json!({ "event": "updated", "document": "site_settings" }),
    ));

    Ok(HttpResponse::Ok().content_type("application/json").json(
        Response { message: "Successfully Updated".to_string() }
    ))
}

fn sanitize(post_data: &PostData) -> PostData {
    let mut form = post_data.clone();
    form.site_name = non_empty(form.site_name.as_deref());
    form.tagline = non_empty(form.tagline.as_deref());
    form.icon_url = non_empty(form.icon_url.as_deref());
    form.twitter_url = non_empty(form.twitter_url.as_deref());
    form.github_url = non_empty(form.github_url.as_deref());
    form.linkedin_url = non_empty(form.linkedin_url.as_deref());

    form
}

fn non_empty(value: Option<&str>) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

fn check_fields(post_data: &PostData) -> Result<(), String> {
    for (label, value) in [
        ("Icon URL", &post_data.icon_url),
        ("Twitter URL", &post_data.twitter_url),
        ("GitHub URL", &post_data.github_url),
        ("LinkedIn URL", &post_data.linkedin_url),
    ] {
        if let Some(value) = value {
            match url::Url::parse(value) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => (),
                _ => return Err(format!("{} must be a valid URL", label)),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_dropped_before_validation() {
        let form = sanitize(&PostData {
            site_name: Some("  MyAppStore ".to_string()),
            tagline: Some("   ".to_string()),
            icon_url: None,
            login_enabled: None,
            twitter_url: Some("".to_string()),
            github_url: None,
            linkedin_url: None,
        });

        assert_eq!(form.site_name.as_deref(), Some("MyAppStore"));
        assert!(form.tagline.is_none());
        assert!(form.twitter_url.is_none());
        assert!(check_fields(&form).is_ok());
    }

    #[test]
    fn social_links_must_be_urls() {
        let form = PostData {
            site_name: None,
            tagline: None,
            icon_url: None,
            login_enabled: None,
            twitter_url: Some("not-a-url".to_string()),
            github_url: None,
            linkedin_url: None,
        };

        assert_eq!(
            check_fields(&form).unwrap_err(),
            "Twitter URL must be a valid URL"
        );
    }
}
