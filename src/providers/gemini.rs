use crate::{
    codec,
    config::GeminiConfig,
    error::{GenerationError, Result},
    logger,
    models::{GenerationResult, ImageAsset, ProviderKind, SUBJECT_IMAGE_FIELD},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_MIME: &str = "image/png";

pub const BRIDAL_PROMPT: &str = "
Take the woman from the provided image and Change her pose, her clothes to wedding dress and background to make it like a stunning wedding photograph.

**Instructions:**
1.  **Attire:** Change her current clothes into an elegant and beautiful wedding dress. The style should be classic and romantic.
2.  **Background:** Replace the original background completely with a picturesque and romantic wedding venue. This could be a blooming garden, a grand cathedral interior, or a scenic beachfront at sunset.
3.  **Style & Quality:** The final image must be a high-quality, realistic, and professional-looking photograph with soft, flattering lighting.
";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRating {
    pub category: String,
    #[serde(default)]
    pub probability: Option<String>,
    #[serde(default)]
    pub blocked: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentRequest {
    pub fn bridal_portrait(subject: &ImageAsset) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: Some(subject.mime_type.clone()),
                            data: codec::encode(subject),
                        }),
                        ..Default::default()
                    },
                    Part {
                        text: Some(BRIDAL_PROMPT.to_string()),
                        ..Default::default()
                    },
                ],
                role: None,
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        }
    }
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
    }

    /// Turns a provider reply into a data URI, or explains why there is none.
    pub fn into_result(self) -> Result<GenerationResult> {
        if let Some(inline) = self.parts().find_map(|p| p.inline_data.as_ref()) {
            let mime_type = inline
                .mime_type
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MIME);
            return Ok(GenerationResult::from_base64(mime_type, &inline.data));
        }

        let blocked = self
            .candidates
            .iter()
            .flat_map(|c| c.safety_ratings.iter())
            .find(|rating| rating.blocked)
            .map(|rating| rating.category.clone())
            .or_else(|| {
                self.prompt_feedback
                    .as_ref()
                    .and_then(|feedback| feedback.block_reason.clone())
            });
        if let Some(category) = blocked {
            return Err(GenerationError::SafetyBlocked { category });
        }

        if let Some(text) = self
            .parts()
            .filter_map(|p| p.text.as_deref())
            .find(|t| !t.trim().is_empty())
        {
            return Err(GenerationError::TextInsteadOfImage(text.to_string()));
        }

        Err(GenerationError::NoImage)
    }
}

/// Bridal portrait stylization through Gemini `generateContent`.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    pub async fn generate(&self, subject: &ImageAsset) -> Result<GenerationResult> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::Configuration(
                    "Gemini API key is not configured. Please set GEMINI_API_KEY or API_KEY environment variable.".into(),
                )
            })?;
        subject.validate(SUBJECT_IMAGE_FIELD)?;

        let payload = GenerateContentRequest::bridal_portrait(subject);

        log::info!(
            "Generating bridal portrait with model {} ({} bytes, {})",
            self.config.model,
            subject.len(),
            subject.mime_type
        );
        let _timer = logger::timer("Gemini portrait generation");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| unavailable(None, e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| unavailable(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            return Err(unavailable(
                Some(status.as_u16()),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&body).map_err(|e| {
            unavailable(
                Some(status.as_u16()),
                format!("unparseable generateContent response: {}", e),
            )
        })?;

        parsed.into_result().map_err(|err| {
            log::warn!("Gemini returned no image ({}): {}", err.kind(), err);
            err
        })
    }
}

fn unavailable(status: Option<u16>, detail: String) -> GenerationError {
    log::error!("Error calling Gemini API (status {:?}): {}", status, detail);
    GenerationError::Unavailable {
        provider: ProviderKind::Portrait,
        status,
        detail,
    }
}
