//! Term and terms clauses - exact value matching

use serde_json::{json, Value};

use super::keyed;

/// Matches documents whose field contains an exact value
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub field: String,
    pub value: Value,
}

impl Term {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn to_query(&self) -> Value {
        keyed("term", keyed(&self.field, self.value.clone()))
    }
}

/// Matches documents whose field contains any of several exact values
#[derive(Clone, Debug, PartialEq)]
pub struct Terms {
    pub field: String,
    pub values: Vec<Value>,
}

impl Terms {
    pub fn new<V>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        Self {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_query(&self) -> Value {
        keyed("terms", keyed(&self.field, json!(self.values)))
    }
}
