use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    codec,
    error::{GenerationError, Result},
    models::ProviderKind,
};

/// Multipart field names, also used to name the offending input in errors.
pub const SUBJECT_IMAGE_FIELD: &str = "userImage";
pub const SOURCE_IMAGE_FIELD: &str = "sourceImage";
pub const TARGET_IMAGE_FIELD: &str = "targetImage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(with = "codec::base64_bytes")]
    pub data: Vec<u8>,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "fileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ImageAsset {
    pub fn new(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.trim().to_ascii_lowercase().starts_with("image/")
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn display_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("<unnamed>")
    }

    /// Checks the asset under the given field name: present, non-empty and
    /// carrying an image MIME type.
    pub fn validate(&self, field: &'static str) -> Result<()> {
        if self.is_empty() {
            return Err(GenerationError::MissingImage { field });
        }
        if !self.is_image() {
            return Err(GenerationError::InvalidImageType {
                field,
                mime_type: self.mime_type.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GenerationRequest {
    Portrait {
        #[serde(rename = "subjectImage")]
        subject_image: ImageAsset,
    },
    FaceSwap {
        #[serde(rename = "sourceImage")]
        source_image: ImageAsset,
        #[serde(rename = "targetImage")]
        target_image: ImageAsset,
        credential: String,
    },
}

impl GenerationRequest {
    pub fn portrait(subject_image: ImageAsset) -> Self {
        GenerationRequest::Portrait { subject_image }
    }

    pub fn face_swap(
        source_image: ImageAsset,
        target_image: ImageAsset,
        credential: impl Into<String>,
    ) -> Self {
        GenerationRequest::FaceSwap {
            source_image,
            target_image,
            credential: credential.into(),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            GenerationRequest::Portrait { .. } => ProviderKind::Portrait,
            GenerationRequest::FaceSwap { .. } => ProviderKind::FaceSwap,
        }
    }

    /// Runs every check that can fail without touching the network.
    pub fn validate(&self) -> Result<()> {
        match self {
            GenerationRequest::Portrait { subject_image } => {
                subject_image.validate(SUBJECT_IMAGE_FIELD)
            }
            GenerationRequest::FaceSwap {
                source_image,
                target_image,
                credential,
            } => {
                if source_image.is_empty() {
                    return Err(GenerationError::MissingImage {
                        field: SOURCE_IMAGE_FIELD,
                    });
                }
                if target_image.is_empty() {
                    return Err(GenerationError::MissingImage {
                        field: TARGET_IMAGE_FIELD,
                    });
                }
                if credential.trim().is_empty() {
                    return Err(GenerationError::MissingCredential(
                        "API key is not configured for the Segmind provider.".into(),
                    ));
                }
                source_image.validate(SOURCE_IMAGE_FIELD)?;
                target_image.validate(TARGET_IMAGE_FIELD)
            }
        }
    }

    /// Parses the JSON form `{"kind": "...", ...}`. An unknown or missing tag
    /// is rejected as an unsupported provider; a known tag with the wrong
    /// fields is a malformed request.
    pub fn from_json(input: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(input)
            .map_err(|e| GenerationError::MalformedRequest(e.to_string()))?;

        let tag = value
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let kind: ProviderKind = tag.parse()?;

        if let Some(obj) = value.as_object_mut() {
            obj.insert("kind".into(), Value::String(kind.as_str().into()));
        }

        serde_json::from_value(value).map_err(|e| GenerationError::MalformedRequest(e.to_string()))
    }
}

/// A produced image as a `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationResult(String);

impl GenerationResult {
    pub fn from_base64(mime_type: &str, payload: &str) -> Self {
        Self(codec::to_data_uri(payload, mime_type))
    }

    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self::from_base64(mime_type, &codec::encode_bytes(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> Option<&str> {
        codec::parse_data_uri(&self.0).map(|(mime, _)| mime)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for GenerationResult {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(len: usize) -> ImageAsset {
        ImageAsset::new(vec![0xAB; len], "image/jpeg")
    }

    #[test]
    fn face_swap_requires_credential() {
        let request = GenerationRequest::face_swap(jpeg(10), jpeg(12), "  ");
        let err = request.validate().unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential(_)));
    }

    #[test]
    fn empty_asset_counts_as_missing() {
        let request = GenerationRequest::face_swap(jpeg(10), jpeg(0), "abc");
        assert!(matches!(
            request.validate(),
            Err(GenerationError::MissingImage { field }) if field == TARGET_IMAGE_FIELD
        ));
    }

    #[test]
    fn rejects_non_image_mime() {
        let request = GenerationRequest::portrait(ImageAsset::new(b"%PDF".to_vec(), "application/pdf"));
        assert!(matches!(
            request.validate(),
            Err(GenerationError::InvalidImageType { field, .. }) if field == SUBJECT_IMAGE_FIELD
        ));
    }

    #[test]
    fn parses_json_form() {
        let input = r#"{
            "kind": "faceswap",
            "sourceImage": {"mimeType": "image/png", "data": "AQID"},
            "targetImage": {"mimeType": "image/png", "data": "BAUG"},
            "credential": "abc"
        }"#;
        let request = GenerationRequest::from_json(input).unwrap();
        assert_eq!(request.kind(), ProviderKind::FaceSwap);
        match request {
            GenerationRequest::FaceSwap { source_image, credential, .. } => {
                assert_eq!(source_image.data, vec![1, 2, 3]);
                assert_eq!(credential, "abc");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn unknown_tag_is_unsupported_provider() {
        let err = GenerationRequest::from_json(r#"{"kind":"dalle","prompt":"x"}"#).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedProvider(_)));

        let err = GenerationRequest::from_json(r#"{"subjectImage":{}}"#).unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedProvider(_)));
    }

    #[test]
    fn partial_union_is_malformed() {
        let err = GenerationRequest::from_json(
            r#"{"kind":"faceswap","sourceImage":{"mimeType":"image/png","data":"AQID"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedRequest(_)));
    }

    #[test]
    fn result_exposes_mime_type() {
        let result = GenerationResult::from_bytes("image/jpeg", &[0xFF, 0xD8, 0xFF]);
        assert_eq!(result, "data:image/jpeg;base64,/9j/");
        assert_eq!(result.mime_type(), Some("image/jpeg"));
    }
}
