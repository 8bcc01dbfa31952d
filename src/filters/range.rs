//! Range clause - matches field values within supplied bounds

use serde_json::Value;
use serde::{Deserialize, Serialize};

use super::keyed;

/// Value type for range bounds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    /// 64-bit integer
    Long(i64),
    /// 64-bit floating point
    Double(f64),
    /// String (for dates, keywords)
    String(String),
}

impl From<i64> for RangeValue {
    fn from(value: i64) -> Self {
        RangeValue::Long(value)
    }
}

impl From<f64> for RangeValue {
    fn from(value: f64) -> Self {
        RangeValue::Double(value)
    }
}

impl From<&str> for RangeValue {
    fn from(value: &str) -> Self {
        RangeValue::String(value.to_string())
    }
}

impl From<String> for RangeValue {
    fn from(value: String) -> Self {
        RangeValue::String(value)
    }
}

/// Bounds for a range clause; absent bounds are omitted from the wire
/// form rather than serialized as null
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<RangeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<RangeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<RangeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<RangeValue>,
}

/// Matches documents whose field value falls within the supplied bounds
#[derive(Clone, Debug, PartialEq)]
pub struct Range {
    pub field: String,
    pub bounds: RangeBounds,
}

impl Range {
    /// Create a range clause with no bounds; add them with the builder
    /// methods below
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            bounds: RangeBounds::default(),
        }
    }

    /// Set the greater-than-or-equal bound
    pub fn gte(mut self, value: impl Into<RangeValue>) -> Self {
        self.bounds.gte = Some(value.into());
        self
    }

    /// Set the greater-than bound
    pub fn gt(mut self, value: impl Into<RangeValue>) -> Self {
        self.bounds.gt = Some(value.into());
        self
    }

    /// Set the less-than-or-equal bound
    pub fn lte(mut self, value: impl Into<RangeValue>) -> Self {
        self.bounds.lte = Some(value.into());
        self
    }

    /// Set the less-than bound
    pub fn lt(mut self, value: impl Into<RangeValue>) -> Self {
        self.bounds.lt = Some(value.into());
        self
    }

    /// Set the bounds from a `RangeBounds` struct
    pub fn with_bounds(mut self, bounds: RangeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn to_query(&self) -> Value {
        let criteria = serde_json::to_value(&self.bounds).unwrap_or_default();
        keyed("range", keyed(&self.field, criteria))
    }
}
