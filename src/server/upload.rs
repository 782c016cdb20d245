use actix_multipart::form::{bytes::Bytes, MultipartForm, MultipartFormConfig};
use actix_web::{HttpRequest, HttpResponse};

use crate::models::{ErrorResponse, ImageAsset};

#[derive(Debug, MultipartForm)]
pub struct PortraitUpload {
    #[multipart(rename = "userImage")]
    pub user_image: Option<Bytes>,
}

#[derive(Debug, MultipartForm)]
pub struct FaceSwapUpload {
    #[multipart(rename = "sourceImage")]
    pub source_image: Option<Bytes>,
    #[multipart(rename = "targetImage")]
    pub target_image: Option<Bytes>,
}

/// Buffers uploads in memory up to `max_bytes`.
pub fn upload_config(max_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_bytes)
        .memory_limit(max_bytes)
}

/// Renders any multipart extraction failure (wrong content type, missing
/// boundary, over the ceiling) as a 400 in the relay's error shape.
pub fn invalid_upload(req: &HttpRequest, err: &actix_web::Error) -> HttpResponse {
    log::warn!("Rejected upload to {}: {}", req.path(), err);
    HttpResponse::BadRequest().json(ErrorResponse::new("Invalid upload", err.to_string()))
}

pub fn into_asset(upload: Bytes) -> ImageAsset {
    ImageAsset {
        data: upload.data.to_vec(),
        mime_type: upload
            .content_type
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default(),
        file_name: upload.file_name,
    }
}
