use crate::{
    codec,
    config::SegmindConfig,
    error::{GenerationError, Result},
    logger,
    models::{
        GenerationResult, ImageAsset, ProviderKind, SOURCE_IMAGE_FIELD, TARGET_IMAGE_FIELD,
    },
};
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;
use serde_json::Value;

pub const FACE_SWAP_PATH: &str = "/v1/faceswap-v2";
pub const FACE_RESTORE_MODEL: &str = "codeformer-v0.1.0.pth";

#[derive(Debug, Serialize)]
pub struct FaceSwapPayload {
    pub source_img: String,
    pub target_img: String,
    pub input_faces_index: u32,
    pub source_faces_index: u32,
    pub face_restore: String,
    pub base64: bool,
}

impl FaceSwapPayload {
    pub fn new(source: &ImageAsset, target: &ImageAsset) -> Self {
        Self {
            source_img: codec::encode(source),
            target_img: codec::encode(target),
            input_faces_index: 0,
            source_faces_index: 0,
            face_restore: FACE_RESTORE_MODEL.to_string(),
            // binary image body instead of base64 JSON
            base64: false,
        }
    }
}

/// Pulls the most useful message out of an error body: the JSON `message`
/// field, the JSON itself, or the raw text.
pub fn extract_error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => match value.get("message").and_then(Value::as_str) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => value.to_string(),
        },
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                "Unknown error".to_string()
            } else {
                text
            }
        }
    }
}

/// Face swap through the Segmind `faceswap-v2` endpoint.
#[derive(Clone)]
pub struct SegmindClient {
    client: Client,
    config: SegmindConfig,
}

impl SegmindClient {
    pub fn new(client: Client, config: SegmindConfig) -> Self {
        Self { client, config }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            FACE_SWAP_PATH
        )
    }

    /// Server-held key, used when a caller does not bring their own.
    pub fn configured_api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    pub async fn generate(
        &self,
        source: &ImageAsset,
        target: &ImageAsset,
        credential: &str,
    ) -> Result<GenerationResult> {
        if credential.trim().is_empty() {
            return Err(GenerationError::MissingCredential(
                "API key is not configured for the Segmind provider.".into(),
            ));
        }
        source.validate(SOURCE_IMAGE_FIELD)?;
        target.validate(TARGET_IMAGE_FIELD)?;

        let payload = FaceSwapPayload::new(source, target);

        log::info!(
            "Generating face swap: {} ({} bytes) -> {} ({} bytes)",
            source.display_name(),
            source.len(),
            target.display_name(),
            target.len()
        );
        let _timer = logger::timer("Segmind face swap");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", credential)
            .json(&payload)
            .send()
            .await
            .map_err(|e| unavailable(None, e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or_default().trim().to_string());
        let body = response
            .bytes()
            .await
            .map_err(|e| unavailable(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            log::error!("Segmind API error (status {}): {}", status.as_u16(), message);
            return Err(GenerationError::UpstreamStatus {
                provider: ProviderKind::FaceSwap,
                status: status.as_u16(),
                message,
            });
        }

        // Segmind can report failures as JSON behind a 200.
        match content_type {
            Some(mime_type) if mime_type.to_ascii_lowercase().starts_with("image/") => {
                Ok(GenerationResult::from_bytes(&mime_type, &body))
            }
            other => {
                let text = String::from_utf8_lossy(&body).into_owned();
                log::error!(
                    "Segmind returned {} instead of an image: {}",
                    other.as_deref().unwrap_or("no content type"),
                    text
                );
                Err(GenerationError::UnexpectedResponse {
                    provider: ProviderKind::FaceSwap,
                    body: text,
                })
            }
        }
    }
}

fn unavailable(status: Option<u16>, detail: String) -> GenerationError {
    log::error!("Error calling Segmind API (status {:?}): {}", status, detail);
    GenerationError::Unavailable {
        provider: ProviderKind::FaceSwap,
        status,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_shape() {
        let source = ImageAsset::new(vec![1, 2, 3], "image/jpeg");
        let target = ImageAsset::new(vec![4, 5, 6], "image/png");
        let value = serde_json::to_value(FaceSwapPayload::new(&source, &target)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "source_img": "AQID",
                "target_img": "BAUG",
                "input_faces_index": 0,
                "source_faces_index": 0,
                "face_restore": "codeformer-v0.1.0.pth",
                "base64": false
            })
        );
    }

    #[test]
    fn error_message_extraction() {
        assert_eq!(extract_error_message(br#"{"message":"invalid key"}"#), "invalid key");
        assert_eq!(
            extract_error_message(br#"{"error":"quota"}"#),
            r#"{"error":"quota"}"#
        );
        assert_eq!(extract_error_message(b"Bad Gateway"), "Bad Gateway");
        assert_eq!(extract_error_message(b""), "Unknown error");
    }

    #[test]
    fn configured_key_ignores_blank() {
        let client = SegmindClient::new(Client::new(), SegmindConfig::new().with_api_key("  "));
        assert_eq!(client.configured_api_key(), None);
        assert_eq!(client.endpoint(), "https://api.segmind.com/v1/faceswap-v2");
    }
}
