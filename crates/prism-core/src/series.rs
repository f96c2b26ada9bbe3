//! Series key selection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Names of the fields whose values are averaged when downsampling.
///
/// All other fields of a [`DataPoint`](crate::DataPoint) are metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesKeys {
    keys: BTreeSet<String>,
}

impl SeriesKeys {
    /// Empty key set. Downsampling with it keeps only first-of-bucket rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SeriesKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
