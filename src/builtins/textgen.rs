use serde::Deserialize;
use thiserror::Error;

use crate::utils::string::{join_keywords, parse_keywords, truncate_chars};

const TEXTGEN_API: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const META_DESCRIPTION_LIMIT: usize = 160;

#[derive(Error, Debug)]
pub enum TextGenError {
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation API rejected the request: {0}")]
    Api(String),
    #[error("generation API returned no candidates")]
    Empty,
    #[error("generation API returned malformed output: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppCopy {
    pub description: String,
    pub feature_highlights: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeoMetadata {
    pub meta_description: String,
    pub meta_keywords: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// One-shot prompt completion client. Two fixed templates, JSON output,
/// no conversation state and no retry.
#[derive(Debug, Clone)]
pub struct TextGenClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl TextGenClient {
    pub fn new(api_key: &str, model: &str) -> TextGenClient {
        TextGenClient::with_base_url(TEXTGEN_API, api_key, model)
    }

    pub fn with_base_url(base_url: &str, api_key: &str, model: &str) -> TextGenClient {
        TextGenClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub async fn generate_app_description(
        &self,
        app_name: &str,
        app_details: &str,
    ) -> Result<AppCopy, TextGenError> {
        let prompt = description_prompt(app_name, app_details);

        self.complete::<AppCopy>(&prompt).await
    }

    pub async fn generate_seo_metadata(
        &self,
        app_name: &str,
        app_description: &str,
    ) -> Result<SeoMetadata, TextGenError> {
        let prompt = seo_prompt(app_name, app_description);

        let metadata = self.complete::<SeoMetadata>(&prompt).await?;

        Ok(SeoMetadata {
            meta_description: truncate_chars(&metadata.meta_description, META_DESCRIPTION_LIMIT),
            meta_keywords: join_keywords(&parse_keywords(&metadata.meta_keywords)),
        })
    }

    async fn complete<T: serde::de::DeserializeOwned>(
        &self,
        prompt: &str,
    ) -> Result<T, TextGenError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self.client
            .post(&url)
            .json(&serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": { "responseMimeType": "application/json" }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("unexpected status {}", status),
            };
            return Err(TextGenError::Api(message));
        }

        let body = response.json::<CompletionResponse>().await?;

        let text = body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(TextGenError::Empty)?;

        Ok(serde_json::from_str::<T>(&text)?)
    }
}

fn description_prompt(app_name: &str, app_details: &str) -> String {
    format!(
        "You are an assistant that writes engaging and informative app store copy.\n\
        Based on the app name and details below, write a compelling public description \
        and a list of key feature highlights.\n\n\
        App Name: {}\n\
        App Details: {}\n\n\
        Respond with a JSON object containing exactly two string fields: \
        \"description\" and \"feature_highlights\".",
        app_name, app_details
    )
}

fn seo_prompt(app_name: &str, app_description: &str) -> String {
    format!(
        "You are an SEO expert for the mobile app market.\n\
        Based on the app name and description below, write:\n\
        1. A compelling meta description under 160 characters with strong keywords \
        and a call to action.\n\
        2. A comma-separated list of 5-7 highly relevant search keywords.\n\n\
        App Name: {}\n\
        App Description: {}\n\n\
        Respond with a JSON object containing exactly two string fields: \
        \"meta_description\" and \"meta_keywords\".",
        app_name, app_description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn prompts_carry_the_form_input() {
        let prompt = description_prompt("Orbit", "A podcast player with offline sync");
        assert!(prompt.contains("App Name: Orbit"));
        assert!(prompt.contains("offline sync"));

        let prompt = seo_prompt("Orbit", "A podcast player");
        assert!(prompt.contains("App Name: Orbit"));
        assert!(prompt.contains("meta_keywords"));
    }

    #[tokio::test]
    async fn generates_description_and_highlights() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/test-model:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "text": "{\"description\": \"A polished podcast player.\", \"feature_highlights\": \"Offline sync\\nSleep timer\"}"
                        }]
                    }
                }]
            }));
        });

        let client = TextGenClient::with_base_url(&server.base_url(), "key", "test-model");
        let copy = client
            .generate_app_description("Orbit", "podcast player")
            .await
            .unwrap();

        assert_eq!(copy.description, "A polished podcast player.");
        assert!(copy.feature_highlights.contains("Sleep timer"));
    }

    #[tokio::test]
    async fn seo_output_is_clamped_and_normalized() {
        let long_description = "x".repeat(300);
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/test-model:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "text": format!(
                                "{{\"meta_description\": \"{}\", \"meta_keywords\": \" podcast ,, player , offline \"}}",
                                long_description
                            )
                        }]
                    }
                }]
            }));
        });

        let client = TextGenClient::with_base_url(&server.base_url(), "key", "test-model");
        let metadata = client
            .generate_seo_metadata("Orbit", "podcast player")
            .await
            .unwrap();

        assert_eq!(metadata.meta_description.chars().count(), META_DESCRIPTION_LIMIT);
        assert_eq!(metadata.meta_keywords, "podcast, player, offline");
    }

    #[tokio::test]
    async fn malformed_candidate_text_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/test-model:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "not json at all" }] }
                }]
            }));
        });

        let client = TextGenClient::with_base_url(&server.base_url(), "key", "test-model");
        let error = client
            .generate_app_description("Orbit", "podcast player")
            .await
            .unwrap_err();

        assert!(matches!(error, TextGenError::Malformed(_)));
    }

    #[tokio::test]
    async fn api_rejection_is_surfaced() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/test-model:generateContent");
            then.status(429).json_body(json!({
                "error": { "message": "Resource has been exhausted" }
            }));
        });

        let client = TextGenClient::with_base_url(&server.base_url(), "key", "test-model");
        let error = client
            .generate_app_description("Orbit", "podcast player")
            .await
            .unwrap_err();

        assert!(matches!(error, TextGenError::Api(_)));
    }
}
