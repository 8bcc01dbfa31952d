//! Source-field selection for the query builder

use serde_json::Value;

/// Ordered collection of field names to request in `_source`
#[derive(Clone, Debug, Default)]
pub struct Fields {
    fields: Vec<String>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field name
    pub fn add_field(&mut self, field: impl Into<String>) -> &mut Self {
        self.fields.push(field.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn to_query(&self) -> Value {
        Value::Array(
            self.fields
                .iter()
                .map(|field| Value::String(field.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_serialize_as_name_array() {
        let mut fields = Fields::new();
        fields.add_field("title").add_field("created_at");
        assert_eq!(fields.to_query(), json!(["title", "created_at"]));
    }

    #[test]
    fn test_empty_fields() {
        let fields = Fields::new();
        assert!(fields.is_empty());
        assert_eq!(fields.to_query(), json!([]));
    }
}
