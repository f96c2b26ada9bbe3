//! Chart row values.
//!
//! A chart row is a [`DataPoint`]: a mapping from field name to [`FieldValue`].
//! Fields are either numeric, and therefore candidates for averaging, or opaque
//! metadata such as labels, flags and nested structures that are carried
//! through untouched.
//!
//! # Example
//!
//! ```
//! use prism_core::{DataPoint, FieldValue};
//!
//! let row = DataPoint::new().with("month", "Jan").with("sales", 120.0);
//!
//! assert_eq!(row.number("sales"), Some(120.0));
//! assert_eq!(row.number("month"), None);
//! assert!(matches!(row.get("month"), Some(FieldValue::Opaque(_))));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A single field value in a chart row.
///
/// Numbers read from JSON or YAML keep their exact representation, so integer
/// ids and timestamps above 2^53 survive a pass through the downsampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum FieldValue {
    /// Numeric value, eligible for averaging.
    Number(serde_json::Number),
    /// NaN or an infinity, which JSON cannot hold. Serializes as `null`.
    NonFinite(f64),
    /// Any non-numeric value (string, bool, null, array, object).
    Opaque(serde_json::Value),
}

impl FieldValue {
    /// Numeric view of this value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::NonFinite(n) => Some(*n),
            Self::Opaque(_) => None,
        }
    }

    /// Whether this value is numeric.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_) | Self::NonFinite(_))
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => Self::Number(n),
            other => Self::Opaque(other),
        }
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Number(n) => Self::Number(n),
            FieldValue::NonFinite(_) => Self::Null,
            FieldValue::Opaque(v) => v,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Self::NonFinite(n), Self::Number)
    }
}

impl From<f32> for FieldValue {
    fn from(n: f32) -> Self {
        Self::from(f64::from(n))
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Opaque(serde_json::Value::String(s.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Opaque(serde_json::Value::String(s))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Opaque(serde_json::Value::Bool(b))
    }
}

/// One sample on a chart's time or category axis.
///
/// Keys are kept in sorted order so serialized rows are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPoint {
    fields: BTreeMap<String, FieldValue>,
}

impl DataPoint {
    /// Create an empty data point.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a field, returning the previous value if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Get a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get a field if it holds a number.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }

    /// Whether the field exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the point has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for DataPoint
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DataPoint {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_from_json_number() {
        assert_eq!(FieldValue::from(json!(10)), FieldValue::from(10));
        assert_eq!(FieldValue::from(json!(-2.5)), FieldValue::from(-2.5));
        assert_eq!(FieldValue::from(json!(10)).as_number(), Some(10.0));
    }

    #[test]
    fn test_integer_and_float_stay_distinct() {
        assert_ne!(FieldValue::from(1), FieldValue::from(1.0));
        let v: serde_json::Value = FieldValue::from(1).into();
        assert_eq!(v, json!(1));
        assert!(v.is_u64());
    }

    #[test]
    fn test_large_integer_kept_exact() {
        let id = 9_007_199_254_740_993_u64;
        let v = FieldValue::from(json!(id));
        assert_eq!(serde_json::Value::from(v), json!(id));
    }

    #[test]
    fn test_field_value_from_json_non_number() {
        assert_eq!(
            FieldValue::from(json!("n/a")),
            FieldValue::Opaque(json!("n/a"))
        );
        assert!(!FieldValue::from(json!(true)).is_number());
        assert!(!FieldValue::from(json!(null)).is_number());
        assert!(!FieldValue::from(json!([1, 2])).is_number());
        assert!(!FieldValue::from(json!({"v": 1})).is_number());
    }

    #[test]
    fn test_numeric_string_is_opaque() {
        assert_eq!(FieldValue::from(json!("42")).as_number(), None);
    }

    #[test]
    fn test_non_finite_serializes_as_null() {
        let nan = FieldValue::from(f64::NAN);
        assert!(matches!(nan, FieldValue::NonFinite(_)));
        assert!(nan.is_number());
        assert!(nan.as_number().is_some_and(f64::is_nan));

        let v: serde_json::Value = nan.into();
        assert_eq!(v, serde_json::Value::Null);
        let inf: serde_json::Value = FieldValue::from(f64::INFINITY).into();
        assert_eq!(inf, serde_json::Value::Null);
    }

    #[test]
    fn test_data_point_builder() {
        let p = DataPoint::new().with("x", 1).with("label", "a");
        assert_eq!(p.len(), 2);
        assert_eq!(p.number("x"), Some(1.0));
        assert_eq!(p.number("label"), None);
        assert_eq!(p.number("missing"), None);
        assert!(p.contains_key("label"));
    }

    #[test]
    fn test_data_point_insert_returns_previous() {
        let mut p = DataPoint::new().with("v", 1.0);
        let prev = p.insert("v", 2.0);
        assert_eq!(prev, Some(FieldValue::from(1.0)));
        assert_eq!(p.number("v"), Some(2.0));
    }

    #[test]
    fn test_data_point_from_iter() {
        let p: DataPoint = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(p.number("a"), Some(1.0));
        assert_eq!(p.number("b"), Some(2.0));
    }

    #[test]
    fn test_data_point_iter_sorted() {
        let p = DataPoint::new().with("z", 1).with("a", 2).with("m", 3);
        let keys: Vec<&str> = p.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_data_point_json_roundtrip() {
        let p: DataPoint =
            serde_json::from_value(json!({"month": "Feb", "sales": 12, "meta": {"q": 1}}))
                .unwrap();
        assert_eq!(p.number("sales"), Some(12.0));
        assert_eq!(p.get("meta"), Some(&FieldValue::Opaque(json!({"q": 1}))));

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back, json!({"month": "Feb", "sales": 12, "meta": {"q": 1}}));
    }

    #[test]
    fn test_empty_data_point() {
        let p = DataPoint::new();
        assert!(p.is_empty());
        assert_eq!(serde_json::to_string(&p).unwrap(), "{}");
    }
}
