use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_SEGMIND_BASE_URL: &str = "https://api.segmind.com";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct SegmindConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: Option<u16>,
    pub max_upload_bytes: usize,
    pub request_timeout: Duration,
    pub gemini: GeminiConfig,
    pub segmind: SegmindConfig,
}

/// Reads a variable, treating blank values as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY"));
        let model = non_empty_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());
        let base_url =
            non_empty_var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into());

        GeminiConfig {
            api_key,
            model,
            base_url,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for SegmindConfig {
    fn default() -> Self {
        SegmindConfig {
            api_key: None,
            base_url: DEFAULT_SEGMIND_BASE_URL.to_string(),
        }
    }
}

impl SegmindConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = non_empty_var("SEGMIND_API_KEY");
        let base_url =
            non_empty_var("SEGMIND_BASE_URL").unwrap_or_else(|| DEFAULT_SEGMIND_BASE_URL.into());

        SegmindConfig { api_key, base_url }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            gemini: GeminiConfig::default(),
            segmind: SegmindConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = non_empty_var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = non_empty_var("PORT").and_then(|port| port.parse().ok());
        let max_upload_bytes = non_empty_var("MAX_UPLOAD_MB")
            .and_then(|mb| mb.parse::<usize>().ok())
            .map_or(DEFAULT_MAX_UPLOAD_BYTES, |mb| mb * 1024 * 1024);
        let request_timeout = non_empty_var("REQUEST_TIMEOUT_SECS")
            .and_then(|secs| secs.parse().ok())
            .map_or(
                Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                Duration::from_secs,
            );

        Config {
            host,
            port,
            max_upload_bytes,
            request_timeout,
            gemini: GeminiConfig::from_env(),
            segmind: SegmindConfig::from_env(),
        }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_segmind(mut self, config: SegmindConfig) -> Self {
        self.segmind = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_override_defaults() {
        let config = Config::new()
            .with_port(8080)
            .with_max_upload_bytes(1024)
            .with_gemini(GeminiConfig::new().with_api_key("g-key").with_model("custom"))
            .with_segmind(SegmindConfig::new().with_base_url("http://localhost:9999"));

        assert_eq!(config.port(), 8080);
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.gemini.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.gemini.model, "custom");
        assert_eq!(config.gemini.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.segmind.base_url, "http://localhost:9999");
        assert!(config.segmind.api_key.is_none());
    }

    #[test]
    fn default_port_when_unset() {
        assert_eq!(Config::default().port(), DEFAULT_PORT);
        assert_eq!(Config::default().max_upload_bytes, 50 * 1024 * 1024);
    }
}
