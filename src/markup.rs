use mongodb::bson::doc;
use serde_json::json;
use tera::{Tera, Context};
use actix_web::http::header::LOCATION;
use actix_web::{web, error, Error, HttpResponse};

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::builtins::mongo::MongoDB;
use crate::builtins::textgen::META_DESCRIPTION_LIMIT;
use crate::Middleware::Auth::session_token;
use crate::Model::App::{partition_featured, AppRecord};
use crate::Model::Settings::{AdSettings, SiteSettings};
use crate::utils::mongo::find_by_creation;
use crate::utils::string::truncate_chars;

/// Branding for every page render; a missing or unreadable singleton falls
/// back to defaults rather than failing the page.
async fn site_settings() -> SiteSettings {
  let db = MongoDB.connect();
  let collection = db.collection::<SiteSettings>("site_settings");

  match collection.find_one(doc!{}).await {
    Ok(option) => option.unwrap_or_default(),
    Err(error) => {
      log::error!("{:?}", error);
      SiteSettings::default()
    },
  }
}

async fn ad_settings() -> AdSettings {
  let db = MongoDB.connect();
  let collection = db.collection::<AdSettings>("ad_settings");

  match collection.find_one(doc!{}).await {
    Ok(option) => option.unwrap_or_default(),
    Err(error) => {
      log::error!("{:?}", error);
      AdSettings::default()
    },
  }
}

fn base_context(site: &SiteSettings) -> Context {
  let mut context = Context::new();
  context.insert("site_name", site.site_name());
  context.insert("tagline", site.tagline());
  context.insert("site_icon_url", &site.icon_url);
  context.insert("login_enabled", &site.login_enabled());
  context.insert("twitter_url", &site.twitter_url);
  context.insert("github_url", &site.github_url);
  context.insert("linkedin_url", &site.linkedin_url);

  context
}

pub async fn home(template: web::Data<Tera>) -> Result<HttpResponse, Error> {
  let site = site_settings().await;
  let ads = ad_settings().await;

  let db = MongoDB.connect();
  let collection = db.collection::<AppRecord>("apps");

  let result = find_by_creation(&collection, doc!{}, None, None).await;

  if let Err(error) = result {
    log::error!("{:?}", error);
    return Ok(HttpResponse::InternalServerError().body(error.to_string()));
  }

  let apps = partition_featured(result.unwrap());

  let mut context = base_context(&site);
  context.insert("apps", &apps);
  context.insert("ad_key", &ads.home_page_ad_key());
  context.insert("structured_data", &website_json_ld(&site));

  let res_data = template.render("home.html", &context)
    .map_err(|e|error::ErrorInternalServerError(e))?;

  Ok(HttpResponse::Ok().content_type("text/html").body(res_data))
}

pub async fn app_detail(
  template: web::Data<Tera>,
  uuid: web::Path<String>,
) -> Result<HttpResponse, Error> {
  let site = site_settings().await;
  let ads = ad_settings().await;

  let db = MongoDB.connect();
  let collection = db.collection::<AppRecord>("apps");

  let result = collection.find_one(
    doc!{ "uuid": uuid.into_inner() },
  ).await;

  if let Err(error) = result {
    log::error!("{:?}", error);
    return Ok(HttpResponse::InternalServerError().body(error.to_string()));
  }

  let option = result.unwrap();
  if let None = option {
    let res_data = template.render("not_found.html", &base_context(&site))
      .map_err(|e|error::ErrorInternalServerError(e))?;

    return Ok(HttpResponse::NotFound().content_type("text/html").body(res_data));
  }

  let app = option.unwrap();

  let mut context = base_context(&site);
  context.insert("app", &app);
  context.insert("channel_label", app.channel_label());
  context.insert("ad_key", &ads.app_detail_page_ad_key());
  context.insert("meta_description", &meta_description_for(&app));
  context.insert("meta_keywords", &app.meta_keywords);
  context.insert("structured_data", &app_json_ld(&app));

  let res_data = template.render("app.html", &context)
    .map_err(|e|error::ErrorInternalServerError(e))?;

  Ok(HttpResponse::Ok().content_type("text/html").body(res_data))
}

pub async fn sign_in(template: web::Data<Tera>) -> Result<HttpResponse, Error> {
  let site = site_settings().await;

  if !site.login_enabled() {
    return Ok(HttpResponse::Found().insert_header((LOCATION, "/")).finish());
  }

  let res_data = template.render("admin/auth.html", &base_context(&site))
    .map_err(|e|error::ErrorInternalServerError(e))?;

  Ok(HttpResponse::Ok().content_type("text/html").body(res_data))
}

/// Admin shell. Unlike the JSON handlers, a browser navigation gets
/// redirected: no session lands on the login page, a session outside the
/// allow-list goes back to the public site.
pub async fn admin_dashboard(
  req: actix_web::HttpRequest,
  config: web::Data<Config>,
  identity: web::Data<IdentityClient>,
  template: web::Data<Tera>,
) -> Result<HttpResponse, Error> {
  let token = match session_token(&req) {
    Some(token) => token,
    None => {
      return Ok(HttpResponse::Found().insert_header((LOCATION, "/login")).finish());
    },
  };

  let session = match identity.lookup(&token).await {
    Ok(session) => session,
    Err(error) => {
      log::error!("{:?}", error);
      return Ok(HttpResponse::Found().insert_header((LOCATION, "/login")).finish());
    },
  };

  if !config.is_admin_email(&session.email) {
    return Ok(HttpResponse::Found().insert_header((LOCATION, "/")).finish());
  }

  let site = site_settings().await;

  let mut context = base_context(&site);
  context.insert("admin_email", &session.email);

  let res_data = template.render("admin/dashboard.html", &context)
    .map_err(|e|error::ErrorInternalServerError(e))?;

  Ok(HttpResponse::Ok().content_type("text/html").body(res_data))
}

pub async fn privacy_policy(template: web::Data<Tera>) -> Result<HttpResponse, Error> {
  let site = site_settings().await;

  let res_data = template.render("privacy_policy.html", &base_context(&site))
    .map_err(|e|error::ErrorInternalServerError(e))?;

  Ok(HttpResponse::Ok().content_type("text/html").body(res_data))
}

pub async fn terms_of_service(template: web::Data<Tera>) -> Result<HttpResponse, Error> {
  let site = site_settings().await;

  let res_data = template.render("terms_of_service.html", &base_context(&site))
    .map_err(|e|error::ErrorInternalServerError(e))?;

  Ok(HttpResponse::Ok().content_type("text/html").body(res_data))
}

pub fn meta_description_for(app: &AppRecord) -> String {
  match app.meta_description.as_deref() {
    Some(meta) if !meta.is_empty() => meta.to_string(),
    _ => truncate_chars(&app.description, META_DESCRIPTION_LIMIT),
  }
}

pub fn website_json_ld(site: &SiteSettings) -> String {
  json!({
    "@context": "https://schema.org",
    "@type": "WebSite",
    "name": site.site_name(),
    "description": site.tagline(),
  }).to_string()
}

pub fn app_json_ld(app: &AppRecord) -> String {
  let mut data = json!({
    "@context": "https://schema.org",
    "@type": "SoftwareApplication",
    "name": app.name,
    "description": app.description,
    "image": app.icon_url,
    "operatingSystem": if app.has_apk() { "Android" } else { "Any" },
    "applicationCategory": "MobileApplication",
    "interactionStatistic": {
      "@type": "InteractionCounter",
      "interactionType": "https://schema.org/DownloadAction",
      "userInteractionCount": app.downloads,
    },
  });

  if app.has_apk() {
    data["downloadUrl"] = json!(app.apk_url);
  }
  if app.has_website() {
    data["url"] = json!(app.website_url);
  }
  if let Some(version) = &app.version {
    data["softwareVersion"] = json!(version);
  }

  data.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn app(apk: Option<&str>, website: Option<&str>) -> AppRecord {
    AppRecord {
      uuid: "u1".to_string(),
      name: "Orbit".to_string(),
      website_url: website.map(str::to_string),
      apk_url: apk.map(str::to_string),
      icon_url: "https://example.com/icon.png".to_string(),
      description: "A podcast player with offline sync.".to_string(),
      feature_highlights: "Offline sync".to_string(),
      created_at: 1700000000000,
      version: Some("1.2.0".to_string()),
      downloads: 42,
      tags: Vec::new(),
      screenshots: Vec::new(),
      featured: false,
      meta_description: None,
      meta_keywords: None,
    }
  }

  #[test]
  fn app_structured_data_reflects_distribution() {
    let with_apk = app(Some("https://cdn.example.com/orbit.apk"), None);
    let data: serde_json::Value = serde_json::from_str(&app_json_ld(&with_apk)).unwrap();

    assert_eq!(data["@type"], "SoftwareApplication");
    assert_eq!(data["operatingSystem"], "Android");
    assert_eq!(data["downloadUrl"], "https://cdn.example.com/orbit.apk");
    assert_eq!(data["softwareVersion"], "1.2.0");
    assert_eq!(data["interactionStatistic"]["userInteractionCount"], 42);

    let web_only = app(None, Some("https://orbit.example.com"));
    let data: serde_json::Value = serde_json::from_str(&app_json_ld(&web_only)).unwrap();

    assert_eq!(data["operatingSystem"], "Any");
    assert!(data.get("downloadUrl").is_none());
    assert_eq!(data["url"], "https://orbit.example.com");
  }

  #[test]
  fn website_structured_data_uses_branding_defaults() {
    let data: serde_json::Value =
      serde_json::from_str(&website_json_ld(&SiteSettings::default())).unwrap();

    assert_eq!(data["@type"], "WebSite");
    assert_eq!(data["name"], "App Showcase");
  }

  #[test]
  fn meta_description_falls_back_to_clamped_description() {
    let mut record = app(None, Some("https://orbit.example.com"));
    assert_eq!(meta_description_for(&record), record.description);

    record.description = "x".repeat(400);
    assert_eq!(meta_description_for(&record).chars().count(), META_DESCRIPTION_LIMIT);

    record.meta_description = Some("Hand written meta".to_string());
    assert_eq!(meta_description_for(&record), "Hand written meta");
  }
}
