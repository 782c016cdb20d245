//! Base64 and data URI helpers shared by both provider adapters.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    error::{GenerationError, Result},
    models::ImageAsset,
};

pub fn encode(asset: &ImageAsset) -> String {
    encode_bytes(&asset.data)
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode(payload: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| GenerationError::MalformedRequest(format!("invalid base64 payload: {}", e)))
}

/// Builds `data:<mime>;base64,<payload>`. The payload is not checked.
pub fn to_data_uri(payload: &str, mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, payload)
}

/// Splits a base64 data URI into its MIME type and payload.
pub fn parse_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    Some((mime_type, payload))
}

/// Serde adapter carrying raw bytes as base64 text.
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.trim()).map_err(D::Error::custom)
    }
}
