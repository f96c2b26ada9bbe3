//! Declarative downsampling settings.
//!
//! Charts declare their downsampling next to their other settings:
//!
//! ```yaml
//! threshold: 120
//! series: [revenue, cost]
//! mixed_values: skip_non_numeric
//! ```

use crate::downsample::{Downsampler, MixedValuePolicy};
use crate::error::DownsampleError;
use crate::series::SeriesKeys;
use serde::{Deserialize, Serialize};

/// Downsampling settings as written in a chart manifest.
///
/// `threshold` is kept signed so a negative value in a manifest surfaces as
/// [`DownsampleError::InvalidThreshold`] rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DownsampleConfig {
    /// Maximum number of output points.
    pub threshold: i64,
    /// Fields to average.
    #[serde(default)]
    pub series: Vec<String>,
    /// Handling of mixed numeric/non-numeric values within a bucket.
    #[serde(default)]
    pub mixed_values: MixedValuePolicy,
}

impl DownsampleConfig {
    /// Create a config with the default mixed-value policy.
    #[must_use]
    pub fn new<I, S>(threshold: i64, series: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            threshold,
            series: series.into_iter().map(Into::into).collect(),
            mixed_values: MixedValuePolicy::default(),
        }
    }

    /// Parse from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, DownsampleError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, DownsampleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and turn into a [`Downsampler`].
    pub fn build(&self) -> Result<Downsampler, DownsampleError> {
        let threshold = usize::try_from(self.threshold)
            .ok()
            .filter(|&t| t > 0)
            .ok_or(DownsampleError::InvalidThreshold(self.threshold))?;
        let keys: SeriesKeys = self.series.iter().map(String::as_str).collect();
        Ok(Downsampler::new(threshold, keys)?.with_policy(self.mixed_values))
    }
}
