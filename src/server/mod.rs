//! Upload relay: validates multipart uploads, injects server-held
//! credentials and forwards to an [`ImageGenerator`].

pub mod docs;
pub mod routes;
pub mod upload;

use actix_cors::Cors;
use actix_web::{http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;

use crate::{
    config::Config,
    error::{ErrorKind, GenerationError},
    models::ErrorResponse,
    providers::{ImageGenerator, ImageStudio},
};

pub use routes::{configure, FACE_SWAP_KEY_HEADER};

pub struct AppState {
    pub generator: Arc<dyn ImageGenerator>,
    /// Fallback when a face-swap request carries no key header.
    pub face_swap_api_key: Option<String>,
}

impl AppState {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            generator,
            face_swap_api_key: None,
        }
    }

    pub fn with_face_swap_api_key(mut self, api_key: Option<String>) -> Self {
        self.face_swap_api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }
}

/// Maps the structured error kind to the relay's HTTP status.
pub fn status_for(err: &GenerationError) -> StatusCode {
    match err.kind() {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Credential => StatusCode::UNAUTHORIZED,
        ErrorKind::UpstreamStatus => match err.upstream_status() {
            Some(401) | Some(403) => StatusCode::UNAUTHORIZED,
            Some(400..=499) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        ErrorKind::UpstreamShape
        | ErrorKind::SafetyBlocked
        | ErrorKind::Transport
        | ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_title(err: &GenerationError) -> &'static str {
    match err {
        GenerationError::MissingImage { .. } => "Missing required parameter",
        GenerationError::InvalidImageType { .. } => "Invalid file type",
        GenerationError::MissingCredential(_) => "Missing API key",
        GenerationError::UnsupportedProvider(_) | GenerationError::MalformedRequest(_) => {
            "Invalid request"
        }
        GenerationError::UpstreamStatus { status, .. } if matches!(status, 401 | 403) => {
            "API key error"
        }
        GenerationError::UpstreamStatus { status, .. } if (400..500).contains(status) => {
            "Bad request to provider"
        }
        _ => "Generation failed",
    }
}

pub fn error_response(err: &GenerationError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(ErrorResponse::new(error_title(err), err.to_string()))
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let studio = ImageStudio::new(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let state = web::Data::new(
        AppState::new(Arc::new(studio)).with_face_swap_api_key(config.segmind.api_key.clone()),
    );
    let max_upload_bytes = config.max_upload_bytes;

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(|cfg| configure(cfg, max_upload_bytes))
    })
    .bind((config.host.as_str(), config.port()))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderKind;

    fn upstream(status: u16) -> GenerationError {
        GenerationError::UpstreamStatus {
            provider: ProviderKind::FaceSwap,
            status,
            message: "nope".into(),
        }
    }

    #[test]
    fn upstream_statuses_map_to_relay_statuses() {
        assert_eq!(status_for(&upstream(403)), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&upstream(401)), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&upstream(422)), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&upstream(502)), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_text_does_not_drive_status() {
        let err = GenerationError::TextInsteadOfImage(
            "Your API key looks fine but status 4 photos failed".into(),
        );
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_title(&err), "Generation failed");
    }

    #[test]
    fn validation_and_credential_statuses() {
        assert_eq!(
            status_for(&GenerationError::MissingImage { field: "userImage" }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&GenerationError::MissingCredential("missing".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(error_title(&upstream(403)), "API key error");
        assert_eq!(error_title(&upstream(404)), "Bad request to provider");
    }
}
