use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

const UPLOAD_API: &str = "https://api.cloudinary.com/v1_1";
const UPLOAD_TAG: &str = "app-showcase";

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("media host rejected the upload: {0}")]
    Api(String),
}

/// Resource type hint forwarded to the media host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType { Image, Raw, Video, Auto }

impl ResourceType {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Raw => "raw",
            ResourceType::Video => "video",
            ResourceType::Auto => "auto",
        }
    }

    pub fn from_str(s: &str) -> ResourceType {
        match s {
            "image" => ResourceType::Image,
            "raw" => ResourceType::Raw,
            "video" => ResourceType::Video,
            _ => ResourceType::Auto,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for the hosted asset store. One signed multipart POST per file,
/// returning the public URL.
#[derive(Debug, Clone)]
pub struct MediaClient {
    client: reqwest::Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl MediaClient {
    pub fn new(cloud_name: &str, api_key: &str, api_secret: &str) -> MediaClient {
        MediaClient::with_base_url(UPLOAD_API, cloud_name, api_key, api_secret)
    }

    pub fn with_base_url(
        base_url: &str,
        cloud_name: &str,
        api_key: &str,
        api_secret: &str,
    ) -> MediaClient {
        MediaClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        resource_type: ResourceType,
    ) -> Result<UploadResponse, MediaError> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign_upload(UPLOAD_TAG, timestamp, &self.api_secret);

        let file = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string());

        let form = reqwest::multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("tags", UPLOAD_TAG)
            .text("signature_algorithm", "sha256")
            .text("signature", signature)
            .part("file", file);

        let url = format!(
            "{}/{}/{}/upload",
            self.base_url,
            self.cloud_name,
            resource_type.as_str()
        );

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("unexpected status {}", status),
            };
            return Err(MediaError::Api(message));
        }

        Ok(response.json::<UploadResponse>().await?)
    }
}

/// Signature over the signed params (sorted, `&`-joined) with the API secret
/// appended, hex encoded.
fn sign_upload(tags: &str, timestamp: i64, api_secret: &str) -> String {
    let payload = format!("tags={}&timestamp={}{}", tags, timestamp, api_secret);

    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());

    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn signature_matches_known_vector() {
        let signature = sign_upload("app-showcase", 1700000000, "shhh");
        assert_eq!(
            signature,
            "079f57401110c0010efe72914e44b7da48039437bac45892f4c3a7be96e4bb9c"
        );
    }

    #[test]
    fn resource_type_round_trips_and_defaults() {
        assert_eq!(ResourceType::from_str("image"), ResourceType::Image);
        assert_eq!(ResourceType::from_str("raw"), ResourceType::Raw);
        assert_eq!(ResourceType::from_str("video"), ResourceType::Video);
        assert_eq!(ResourceType::from_str("anything-else"), ResourceType::Auto);
        assert_eq!(ResourceType::Raw.as_str(), "raw");
    }

    #[tokio::test]
    async fn upload_returns_public_url() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/demo/raw/upload");
            then.status(200).json_body(json!({
                "secure_url": "https://assets.example.com/apks/app.apk"
            }));
        });

        let client = MediaClient::with_base_url(&server.base_url(), "demo", "key", "secret");
        let response = client
            .upload("app.apk", b"payload".to_vec(), ResourceType::Raw)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(response.secure_url, "https://assets.example.com/apks/app.apk");
    }

    #[tokio::test]
    async fn upload_surfaces_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/demo/image/upload");
            then.status(401).json_body(json!({
                "error": { "message": "Invalid Signature" }
            }));
        });

        let client = MediaClient::with_base_url(&server.base_url(), "demo", "key", "bad-secret");
        let error = client
            .upload("icon.png", b"png".to_vec(), ResourceType::Image)
            .await
            .unwrap_err();

        match error {
            MediaError::Api(message) => assert_eq!(message, "Invalid Signature"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
