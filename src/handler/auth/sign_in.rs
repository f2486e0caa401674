use serde::{ Serialize, Deserialize };
use serde_json::json;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, Error, HttpResponse};

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;
use crate::Middleware::Auth::SESSION_COOKIE;
use crate::utils::response::Response;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReqBody {
    email: String,
    password: String,
}

/// Password sign-in relay. The identity provider owns the credential; this
/// handler only gates the resulting account against the admin allow-list.
/// A non-allow-listed account gets "Access Denied" and no session cookie,
/// which discards the vendor session it just created.
pub async fn task(
    config: web::Data<Config>,
    identity: web::Data<IdentityClient>,
    form_data: web::Json<ReqBody>,
) -> Result<HttpResponse, Error> {
    let email = form_data.email.trim().to_lowercase();

    if let Err(error) = check_fields(&email, &form_data.password) {
        return Ok(Response::bad_request(&error));
    }

    let result = identity.sign_in_with_password(&email, &form_data.password).await;

    if let Err(error) = result {
        if error.is_invalid_credential() {
            return Ok(Response::bad_request(
                "Invalid email or password. Please try again."
            ));
        }

        log::error!("{:?}", error);
        return Ok(Response::internal_server_error(
            "Failed to sign in. Please try again."
        ));
    }

    let session = result.unwrap();

    if !config.is_admin_email(&session.email) {
        return Ok(Response::forbidden(
            "Access Denied. This panel is for administrators only."
        ));
    }

    let cookie = session_cookie(&session.id_token);

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .cookie(cookie)
        .json(json!({
            "email": session.email,
            "user_id": session.local_id,
        })))
}

pub fn session_cookie(id_token: &str) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id_token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

fn check_fields(email: &str, password: &str) -> Result<(), String> {
    if !email.contains('@') {
        return Err("Please enter a valid email address".to_string());
    }

    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_obviously_invalid_credentials() {
        assert!(check_fields("not-an-email", "hunter22").is_err());
        assert_eq!(
            check_fields("admin@example.com", "short").unwrap_err(),
            "Password must be at least 6 characters"
        );
        assert!(check_fields("admin@example.com", "hunter22").is_ok());
    }

    #[test]
    fn session_cookie_is_http_only_and_site_wide() {
        let cookie = session_cookie("token-123");

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "token-123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
