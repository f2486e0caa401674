use actix_web::{Error, HttpRequest};
use serde_json::json;

use crate::builtins::config::Config;
use crate::builtins::identity::IdentityClient;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug)]
pub struct AdminUser {
    pub user_id: String,
    pub email: String,
}

/// Pulls the vendor ID token off the request: `Authorization: Bearer` wins,
/// the session cookie is the fallback for browser navigation.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .map(|header| header.trim_start_matches("Bearer ").trim().to_string())
        .filter(|token| !token.is_empty());

    if bearer.is_some() {
        return bearer;
    }

    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Admin gate: resolve the session with the identity provider, then check
/// the account email against the configured allow-list. There are no roles
/// beyond this set.
pub async fn require_admin(
    req: &HttpRequest,
    config: &Config,
    identity: &IdentityClient,
) -> Result<AdminUser, Error> {
    let token = match session_token(req) {
        Some(token) => token,
        None => {
            return Err(actix_web::error::ErrorUnauthorized(
                json!({ "error": "Missing session token" }),
            ));
        },
    };

    let session = identity.lookup(&token).await.map_err(|error| {
        log::error!("{:?}", error);
        actix_web::error::ErrorUnauthorized(
            json!({ "error": "Invalid session token" }),
        )
    })?;

    if !config.is_admin_email(&session.email) {
        return Err(actix_web::error::ErrorForbidden(
            json!({ "error": "Access Denied. This panel is for administrators only." }),
        ));
    }

    Ok(AdminUser {
        user_id: session.user_id,
        email: session.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer header-token"))
            .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, "cookie-token"))
            .to_http_request();

        assert_eq!(session_token(&req), Some("header-token".to_string()));
    }

    #[test]
    fn cookie_is_the_fallback() {
        let req = TestRequest::default()
            .cookie(actix_web::cookie::Cookie::new(SESSION_COOKIE, "cookie-token"))
            .to_http_request();

        assert_eq!(session_token(&req), Some("cookie-token".to_string()));
    }

    #[test]
    fn missing_credentials_yield_none() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(session_token(&req), None);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer "))
            .to_http_request();
        assert_eq!(session_token(&req), None);
    }
}
