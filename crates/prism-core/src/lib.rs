//! Chart data helpers for Prism UI components.
//!
//! Chart widgets hand this crate their rows before rendering when there are
//! more rows than the chart can draw. It provides:
//! - Row types: [`DataPoint`] and [`FieldValue`]
//! - Series selection: [`SeriesKeys`]
//! - Bucket downsampling: [`downsample`], [`downsample_with`], [`Downsampler`]
//! - Manifest settings: [`DownsampleConfig`]
//!
//! Downsampling is pure. Inputs are never mutated and every call allocates its
//! own output, so it is safe to call from any thread.

mod config;
mod downsample;
mod error;
mod series;
mod value;

pub use config::DownsampleConfig;
pub use downsample::{bucket_size, downsample, downsample_with, Downsampler, MixedValuePolicy};
pub use error::DownsampleError;
pub use series::SeriesKeys;
pub use value::{DataPoint, FieldValue};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<DataPoint>();
        assert_send_sync::<FieldValue>();
        assert_send_sync::<SeriesKeys>();
        assert_send_sync::<Downsampler>();
        assert_send_sync::<DownsampleConfig>();
        assert_send_sync::<DownsampleError>();
    }

    #[test]
    fn test_concurrent_callers_get_identical_results() {
        let data: Vec<DataPoint> = (0..100i32)
            .map(|i| DataPoint::new().with("t", i).with("v", i * 2))
            .collect();
        let sampler = Downsampler::new(7, SeriesKeys::new().with("v")).unwrap();
        let expected = sampler.apply(&data);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| sampler.apply(&data))).collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
