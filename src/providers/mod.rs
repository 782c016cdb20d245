pub mod gemini;
pub mod segmind;

use crate::{
    config::Config,
    error::{GenerationError, Result},
    models::{GenerationRequest, GenerationResult},
};
use async_trait::async_trait;
use reqwest::Client;

pub use gemini::GeminiClient;
pub use segmind::SegmindClient;

/// The single capability every generation backend offers.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult>;
}

/// Routes a [`GenerationRequest`] to the adapter for its variant.
#[derive(Clone)]
pub struct ImageStudio {
    portrait: GeminiClient,
    face_swap: SegmindClient,
}

impl ImageStudio {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                GenerationError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            portrait: GeminiClient::new(client.clone(), config.gemini.clone()),
            face_swap: SegmindClient::new(client, config.segmind.clone()),
        })
    }

    pub fn from_clients(portrait: GeminiClient, face_swap: SegmindClient) -> Self {
        Self {
            portrait,
            face_swap,
        }
    }

    pub fn portrait(&self) -> &GeminiClient {
        &self.portrait
    }

    pub fn face_swap(&self) -> &SegmindClient {
        &self.face_swap
    }

    /// Validates, then performs exactly one provider call. Invalid requests
    /// never reach the network.
    pub async fn dispatch(&self, request: GenerationRequest) -> Result<GenerationResult> {
        if let Err(err) = request.validate() {
            log::warn!("Rejected {} request: {}", request.kind(), err);
            return Err(err);
        }

        log::debug!("Dispatching {} request", request.kind());
        match request {
            GenerationRequest::Portrait { subject_image } => {
                self.portrait.generate(&subject_image).await
            }
            GenerationRequest::FaceSwap {
                source_image,
                target_image,
                credential,
            } => {
                self.face_swap
                    .generate(&source_image, &target_image, &credential)
                    .await
            }
        }
    }

    /// Dispatches the JSON request form; unknown kinds fail before any call.
    pub async fn dispatch_json(&self, input: &str) -> Result<GenerationResult> {
        let request = GenerationRequest::from_json(input)?;
        self.dispatch(request).await
    }
}

#[async_trait]
impl ImageGenerator for ImageStudio {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult> {
        self.dispatch(request).await
    }
}
