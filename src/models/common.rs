use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GenerationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Portrait,
    FaceSwap,
}

impl ProviderKind {
    /// Wire tag used in requests and relay routes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Portrait => "portrait",
            ProviderKind::FaceSwap => "faceswap",
        }
    }

    /// Upstream service name reported back to relay clients.
    pub fn provider_name(&self) -> &'static str {
        match self {
            ProviderKind::Portrait => "gemini",
            ProviderKind::FaceSwap => "segmind",
        }
    }

    pub fn failure_prefix(&self) -> &'static str {
        match self {
            ProviderKind::Portrait => "Failed to generate image",
            ProviderKind::FaceSwap => "Failed to generate face-swapped image",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GenerationError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "portrait" | "gemini" => Ok(ProviderKind::Portrait),
            "faceswap" | "segmind" => Ok(ProviderKind::FaceSwap),
            other => Err(GenerationError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_and_legacy_names() {
        assert_eq!("portrait".parse::<ProviderKind>().unwrap(), ProviderKind::Portrait);
        assert_eq!("SEGMIND".parse::<ProviderKind>().unwrap(), ProviderKind::FaceSwap);
        assert!(matches!(
            "midjourney".parse::<ProviderKind>(),
            Err(GenerationError::UnsupportedProvider(tag)) if tag == "midjourney"
        ));
    }
}
