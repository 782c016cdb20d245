//! Provider adapters that turn uploaded photos into AI-generated images.
//!
//! A [`GenerationRequest`] names one of two providers: a Gemini bridal
//! portrait or a Segmind face swap. [`ImageStudio`] validates it, calls the
//! matching adapter once, and returns a [`GenerationResult`] data URI. The
//! optional `server` feature wraps the same contract in an upload relay.

pub mod codec;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod providers;
#[cfg(feature = "server")]
pub mod server;

pub use config::{Config, GeminiConfig, SegmindConfig};
pub use error::{ErrorKind, GenerationError, Result};
pub use models::*;
pub use providers::{GeminiClient, ImageGenerator, ImageStudio, SegmindClient};
