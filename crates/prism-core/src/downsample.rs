//! Bucket downsampling for chart data.
//!
//! Charts that receive more rows than they can usefully draw ask for a reduced
//! point set first. The input is split into contiguous buckets of
//! `ceil(len / threshold)` rows and each bucket collapses into one row:
//! - series fields become the mean of the bucket's numeric values
//! - every other field is copied from the bucket's first row
//!
//! A series field that is not numeric in the first row of a bucket is left as
//! it is.
//!
//! # Example
//!
//! ```
//! use prism_core::{downsample, DataPoint, SeriesKeys};
//!
//! let data: Vec<DataPoint> = (1..=4i32)
//!     .map(|i| DataPoint::new().with("x", i).with("v", i * 10))
//!     .collect();
//! let keys = SeriesKeys::new().with("v");
//!
//! let reduced = downsample(&data, 2, &keys).unwrap();
//! assert_eq!(reduced.len(), 2);
//! assert_eq!(reduced[0].number("v"), Some(15.0));
//! assert_eq!(reduced[1].number("v"), Some(35.0));
//! ```

use crate::error::DownsampleError;
use crate::series::SeriesKeys;
use crate::value::DataPoint;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// How a bucket is averaged when a series key is numeric in the first row but
/// missing or non-numeric in later rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixedValuePolicy {
    /// Average only the rows holding a number at the key.
    #[default]
    SkipNonNumeric,
    /// Divide by the full bucket length; a missing or non-numeric entry
    /// counts as NaN, so the bucket mean becomes NaN.
    Strict,
}

impl MixedValuePolicy {
    /// Mean of `key` across `bucket`, or `None` when no row is numeric.
    fn mean(self, bucket: &[DataPoint], key: &str) -> Option<f64> {
        let values: Vec<f64> = match self {
            Self::SkipNonNumeric => bucket.iter().filter_map(|p| p.number(key)).collect(),
            Self::Strict => bucket
                .iter()
                .map(|p| p.number(key).unwrap_or(f64::NAN))
                .collect(),
        };
        mean(&values)
    }
}

/// Arithmetic mean that stays finite when the plain sum would overflow.
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() || values.iter().any(|v| !v.is_finite()) {
        Some(sum / n)
    } else {
        Some(values.iter().map(|v| v / n).sum())
    }
}

/// Rows per bucket when reducing `len` rows to at most `threshold`.
///
/// Returns `None` for a zero threshold.
#[must_use]
pub const fn bucket_size(len: usize, threshold: usize) -> Option<usize> {
    if threshold == 0 {
        None
    } else {
        Some(len.div_ceil(threshold))
    }
}

/// Reduce `data` to at most `threshold` rows, averaging `series_keys`.
///
/// Uses [`MixedValuePolicy::SkipNonNumeric`]. Input shorter than or equal to
/// the threshold is returned as an unchanged copy.
pub fn downsample(
    data: &[DataPoint],
    threshold: usize,
    series_keys: &SeriesKeys,
) -> Result<Vec<DataPoint>, DownsampleError> {
    downsample_with(data, threshold, series_keys, MixedValuePolicy::default())
}

/// [`downsample`] with an explicit mixed-value policy.
pub fn downsample_with(
    data: &[DataPoint],
    threshold: usize,
    series_keys: &SeriesKeys,
    policy: MixedValuePolicy,
) -> Result<Vec<DataPoint>, DownsampleError> {
    let threshold = NonZeroUsize::new(threshold).ok_or(DownsampleError::InvalidThreshold(0))?;
    Ok(resample(data, threshold, series_keys, policy))
}

fn resample(
    data: &[DataPoint],
    threshold: NonZeroUsize,
    series_keys: &SeriesKeys,
    policy: MixedValuePolicy,
) -> Vec<DataPoint> {
    let threshold = threshold.get();
    if data.len() <= threshold {
        tracing::trace!(
            len = data.len(),
            threshold,
            "data within threshold, not downsampling"
        );
        return data.to_vec();
    }

    let size = data.len().div_ceil(threshold);
    let reduced: Vec<DataPoint> = data
        .chunks(size)
        .map(|bucket| collapse_bucket(bucket, series_keys, policy))
        .collect();

    tracing::debug!(
        original = data.len(),
        reduced = reduced.len(),
        bucket_size = size,
        "downsampled chart data"
    );
    reduced
}

/// Collapse one bucket into a copy of its first row with series fields averaged.
fn collapse_bucket(
    bucket: &[DataPoint],
    series_keys: &SeriesKeys,
    policy: MixedValuePolicy,
) -> DataPoint {
    let Some(first) = bucket.first() else {
        return DataPoint::new();
    };

    let mut item = first.clone();
    for key in series_keys.iter() {
        if first.number(key).is_none() {
            continue;
        }
        if let Some(mean) = policy.mean(bucket, key) {
            item.insert(key, mean);
        }
    }
    item
}

/// A validated, reusable downsampling setup.
///
/// # Example
///
/// ```
/// use prism_core::{DataPoint, Downsampler, MixedValuePolicy, SeriesKeys};
///
/// let sampler = Downsampler::new(100, SeriesKeys::new().with("cpu"))
///     .unwrap()
///     .with_policy(MixedValuePolicy::Strict);
///
/// let rows: Vec<DataPoint> = (0..1000i32)
///     .map(|i| DataPoint::new().with("t", i).with("cpu", 50.0))
///     .collect();
/// assert_eq!(sampler.apply(&rows).len(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downsampler {
    threshold: NonZeroUsize,
    series_keys: SeriesKeys,
    policy: MixedValuePolicy,
}

impl Downsampler {
    /// Create a downsampler. Fails on a zero threshold.
    pub fn new(threshold: usize, series_keys: SeriesKeys) -> Result<Self, DownsampleError> {
        let threshold =
            NonZeroUsize::new(threshold).ok_or(DownsampleError::InvalidThreshold(0))?;
        Ok(Self {
            threshold,
            series_keys,
            policy: MixedValuePolicy::default(),
        })
    }

    /// Set the mixed-value policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MixedValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn threshold(&self) -> usize {
        self.threshold.get()
    }

    #[must_use]
    pub const fn series_keys(&self) -> &SeriesKeys {
        &self.series_keys
    }

    #[must_use]
    pub const fn policy(&self) -> MixedValuePolicy {
        self.policy
    }

    /// Reduce `data` to at most [`threshold`](Self::threshold) rows.
    #[must_use]
    pub fn apply(&self, data: &[DataPoint]) -> Vec<DataPoint> {
        resample(data, self.threshold, &self.series_keys, self.policy)
    }
}
