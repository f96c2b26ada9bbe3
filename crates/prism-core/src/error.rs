//! Error types for prism-core.

use thiserror::Error;

/// Errors that can occur when configuring or running a downsampler.
#[derive(Debug, Error)]
pub enum DownsampleError {
    /// Threshold was zero or negative.
    #[error("invalid threshold {0}: must be a positive integer")]
    InvalidThreshold(i64),

    /// YAML config could not be parsed.
    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON config could not be parsed.
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),
}
