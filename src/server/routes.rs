use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use super::{
    docs::{api_docs, AVAILABLE_ENDPOINTS},
    error_response,
    upload::{into_asset, invalid_upload, upload_config, FaceSwapUpload, PortraitUpload},
    AppState,
};
use crate::{
    error::GenerationError,
    models::{
        GenerateResponse, GenerationRequest, HealthResponse, NotFoundResponse, ProviderKind,
        SOURCE_IMAGE_FIELD, SUBJECT_IMAGE_FIELD, TARGET_IMAGE_FIELD,
    },
};

pub const FACE_SWAP_KEY_HEADER: &str = "X-Segmind-API-Key";

pub fn configure(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    cfg.app_data(upload_config(max_upload_bytes))
        .route("/health", web::get().to(health))
        .route("/docs", web::get().to(docs))
        .route("/api/docs", web::get().to(docs))
        .route("/generate/portrait", web::post().to(generate_portrait))
        .route("/api/generate/gemini", web::post().to(generate_portrait))
        .route("/generate/faceswap", web::post().to(generate_face_swap))
        .route("/api/generate/segmind", web::post().to(generate_face_swap))
        .default_service(web::route().to(not_found));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}

async fn docs() -> HttpResponse {
    HttpResponse::Ok().json(api_docs())
}

async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(NotFoundResponse {
        error: "Not found".to_string(),
        message: format!("Route {} {} not found", req.method(), req.path()),
        available_endpoints: AVAILABLE_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

async fn generate_portrait(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: Result<MultipartForm<PortraitUpload>, actix_web::Error>,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let form = match form {
        Ok(MultipartForm(form)) => form,
        Err(err) => return invalid_upload(&req, &err),
    };

    let Some(upload) = form.user_image else {
        return error_response(&GenerationError::MissingImage {
            field: SUBJECT_IMAGE_FIELD,
        });
    };
    let subject = into_asset(upload);
    if let Err(err) = subject.validate(SUBJECT_IMAGE_FIELD) {
        return error_response(&err);
    }

    log::info!(
        "[req:{}] Generating bridal portrait for {} ({} bytes)",
        request_id,
        subject.display_name(),
        subject.len()
    );

    respond(
        &state,
        request_id,
        GenerationRequest::portrait(subject),
    )
    .await
}

async fn generate_face_swap(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: Result<MultipartForm<FaceSwapUpload>, actix_web::Error>,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let form = match form {
        Ok(MultipartForm(form)) => form,
        Err(err) => return invalid_upload(&req, &err),
    };

    let Some(source) = form.source_image else {
        return error_response(&GenerationError::MissingImage {
            field: SOURCE_IMAGE_FIELD,
        });
    };
    let Some(target) = form.target_image else {
        return error_response(&GenerationError::MissingImage {
            field: TARGET_IMAGE_FIELD,
        });
    };

    let header_key = req
        .headers()
        .get(FACE_SWAP_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty());
    let Some(credential) = header_key
        .map(str::to_string)
        .or_else(|| state.face_swap_api_key.clone())
    else {
        return error_response(&GenerationError::MissingCredential(format!(
            "{} header is required",
            FACE_SWAP_KEY_HEADER
        )));
    };

    let source = into_asset(source);
    let target = into_asset(target);
    for (asset, field) in [(&source, SOURCE_IMAGE_FIELD), (&target, TARGET_IMAGE_FIELD)] {
        if let Err(err) = asset.validate(field) {
            return error_response(&err);
        }
    }

    log::info!(
        "[req:{}] Generating face swap: {} ({} bytes) -> {} ({} bytes)",
        request_id,
        source.display_name(),
        source.len(),
        target.display_name(),
        target.len()
    );

    respond(
        &state,
        request_id,
        GenerationRequest::face_swap(source, target, credential),
    )
    .await
}

async fn respond(state: &AppState, request_id: Uuid, request: GenerationRequest) -> HttpResponse {
    let kind: ProviderKind = request.kind();
    match state.generator.generate(request).await {
        Ok(result) => {
            log::info!("[req:{}] {} generation succeeded", request_id, kind);
            HttpResponse::Ok().json(GenerateResponse::new(kind, result))
        }
        Err(err) => {
            log::error!(
                "[req:{}] {} generation failed ({}): {:?}",
                request_id,
                kind,
                err.kind(),
                err
            );
            error_response(&err)
        }
    }
}
