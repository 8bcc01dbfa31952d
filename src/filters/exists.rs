//! Field presence and absence clauses

use serde_json::{json, Value};

/// Matches documents that contain the given field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exists {
    pub field: String,
}

impl Exists {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn to_query(&self) -> Value {
        json!({"exists": {"field": self.field}})
    }
}

/// Matches documents that do not contain the given field
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Missing {
    pub field: String,
}

impl Missing {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn to_query(&self) -> Value {
        json!({"missing": {"field": self.field}})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists_query() {
        let exists = Exists::new("modified_at");
        assert_eq!(
            exists.to_query(),
            json!({"exists": {"field": "modified_at"}})
        );
    }

    #[test]
    fn test_missing_query() {
        let missing = Missing::new("deleted_at");
        assert_eq!(
            missing.to_query(),
            json!({"missing": {"field": "deleted_at"}})
        );
    }
}
