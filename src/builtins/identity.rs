use serde::{Deserialize, Serialize};
use thiserror::Error;

const IDENTITY_API: &str = "https://identitytoolkit.googleapis.com/v1";

/// Errors returned by the hosted identity provider.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("identity provider rejected the request: {0}")]
    Api(String),
    #[error("no account matched the supplied token")]
    UnknownAccount,
}

impl IdentityError {
    /// True when the provider refused the credential itself, as opposed to a
    /// transport or server failure.
    pub fn is_invalid_credential(&self) -> bool {
        match self {
            IdentityError::Api(message) => {
                message.contains("INVALID_LOGIN_CREDENTIALS")
                    || message.contains("INVALID_PASSWORD")
                    || message.contains("EMAIL_NOT_FOUND")
                    || message.contains("INVALID_ID_TOKEN")
            },
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub email_verified: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub id_token: String,
    pub email: String,
    pub local_id: String,
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: String,
    #[serde(default)]
    email_verified: bool,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Thin client for the vendor identity provider. Sign-in and token lookup
/// only; account management stays on the vendor console.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(api_key: &str) -> IdentityClient {
        IdentityClient::with_base_url(IDENTITY_API, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> IdentityClient {
        IdentityClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInResponse, IdentityError> {
        let url = format!(
            "{}/accounts:signInWithPassword?key={}",
            self.base_url, self.api_key
        );

        let response = self.client
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::Api(api_error_message(response).await));
        }

        Ok(response.json::<SignInResponse>().await?)
    }

    /// Resolves an ID token to the account it was minted for.
    pub async fn lookup(&self, id_token: &str) -> Result<Session, IdentityError> {
        let url = format!("{}/accounts:lookup?key={}", self.base_url, self.api_key);

        let response = self.client
            .post(&url)
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::Api(api_error_message(response).await));
        }

        let body = response.json::<LookupResponse>().await?;

        match body.users.into_iter().next() {
            Some(user) => Ok(Session {
                user_id: user.local_id,
                email: user.email,
                email_verified: user.email_verified,
            }),
            None => Err(IdentityError::UnknownAccount),
        }
    }
}

async fn api_error_message(response: reqwest::Response) -> String {
    let status = response.status();

    match response.json::<ApiErrorBody>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("unexpected status {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn sign_in_returns_token_and_email() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/accounts:signInWithPassword")
                .query_param("key", "test-key")
                .json_body_partial(r#"{"email": "admin@example.com"}"#);
            then.status(200).json_body(json!({
                "idToken": "token-123",
                "email": "admin@example.com",
                "localId": "uid-1",
                "refreshToken": "refresh-1"
            }));
        });

        let client = IdentityClient::with_base_url(&server.base_url(), "test-key");
        let response = client
            .sign_in_with_password("admin@example.com", "hunter22")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(response.id_token, "token-123");
        assert_eq!(response.email, "admin@example.com");
        assert_eq!(response.local_id, "uid-1");
    }

    #[tokio::test]
    async fn sign_in_surfaces_provider_rejection() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/accounts:signInWithPassword");
            then.status(400).json_body(json!({
                "error": { "message": "INVALID_LOGIN_CREDENTIALS" }
            }));
        });

        let client = IdentityClient::with_base_url(&server.base_url(), "test-key");
        let error = client
            .sign_in_with_password("admin@example.com", "wrong")
            .await
            .unwrap_err();

        assert!(error.is_invalid_credential());
    }

    #[tokio::test]
    async fn lookup_resolves_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/accounts:lookup");
            then.status(200).json_body(json!({
                "users": [{
                    "localId": "uid-1",
                    "email": "admin@example.com",
                    "emailVerified": true
                }]
            }));
        });

        let client = IdentityClient::with_base_url(&server.base_url(), "test-key");
        let session = client.lookup("token-123").await.unwrap();

        assert_eq!(session.user_id, "uid-1");
        assert_eq!(session.email, "admin@example.com");
        assert!(session.email_verified);
    }

    #[tokio::test]
    async fn lookup_without_matching_account_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/accounts:lookup");
            then.status(200).json_body(json!({ "users": [] }));
        });

        let client = IdentityClient::with_base_url(&server.base_url(), "test-key");
        let error = client.lookup("stale-token").await.unwrap_err();

        assert!(matches!(error, IdentityError::UnknownAccount));
    }
}
