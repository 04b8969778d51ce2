use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Placeholder VLibras endpoint; overridable through the settings file.
pub const DEFAULT_BASE_URL: &str = "https://vlibras.gov.br/api/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum RemoteServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation service returned status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    gloss: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoStatusResponse {
    status: Option<String>,
}

/// HTTP client for the text -> Libras direction. Every operation returns a
/// plain success/failure result; nothing is retried automatically and no
/// failure crosses the boundary as a panic.
pub struct VLibrasClient {
    http: Client,
    base_url: String,
}

impl VLibrasClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteServiceError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Translate Portuguese text into a Libras gloss. Falls back to the
    /// input text when the service answers without a gloss.
    pub async fn translate_to_gloss(&self, text: &str) -> Result<String, RemoteServiceError> {
        let response = self
            .http
            .get(self.endpoint("translate"))
            .query(&[("text", text)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RemoteServiceError::Status(response.status()));
        }
        let body: TranslateResponse = response.json().await?;
        Ok(body.gloss.unwrap_or_else(|| text.to_string()))
    }

    /// Ask the service to render a video for a gloss, returning the video id.
    pub async fn request_video(&self, gloss: &str) -> Result<String, RemoteServiceError> {
        let response = self
            .http
            .post(self.endpoint("video"))
            .form(&[("gloss", gloss)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RemoteServiceError::Status(response.status()));
        }
        let body: VideoResponse = response.json().await?;
        Ok(body.id.unwrap_or_default())
    }

    /// Poll the render status of a previously requested video.
    pub async fn video_status(&self, video_id: &str) -> Result<String, RemoteServiceError> {
        let response = self
            .http
            .get(self.endpoint(&format!("video/status/{video_id}")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RemoteServiceError::Status(response.status()));
        }
        let body: VideoStatusResponse = response.json().await?;
        Ok(body.status.unwrap_or_else(|| "unknown".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_doubled_slashes() {
        let client = VLibrasClient::new("https://vlibras.gov.br/api/").unwrap();
        assert_eq!(
            client.endpoint("translate"),
            "https://vlibras.gov.br/api/translate"
        );
        assert_eq!(
            client.endpoint("video/status/abc"),
            "https://vlibras.gov.br/api/video/status/abc"
        );
    }

    #[test]
    fn translate_response_tolerates_missing_gloss() {
        let body: TranslateResponse = serde_json::from_str(r#"{"text": "oi"}"#).unwrap();
        assert!(body.gloss.is_none());

        let body: TranslateResponse =
            serde_json::from_str(r#"{"gloss": "OI", "text": "oi"}"#).unwrap();
        assert_eq!(body.gloss.as_deref(), Some("OI"));
    }

    #[test]
    fn video_status_response_tolerates_extra_fields() {
        let body: VideoStatusResponse = serde_json::from_str(
            r#"{"status": "processing", "filename": "a.mp4", "size": 1024}"#,
        )
        .unwrap();
        assert_eq!(body.status.as_deref(), Some("processing"));
    }
}
