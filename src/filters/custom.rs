//! Custom clause - verbatim passthrough of a caller-supplied object

use serde_json::Value;

/// An entirely caller-supplied clause, emitted verbatim
///
/// The escape hatch for wire forms the crate has no dedicated clause for.
#[derive(Clone, Debug, PartialEq)]
pub struct Custom {
    pub query: Value,
}

impl Custom {
    pub fn new(query: Value) -> Self {
        Self { query }
    }

    pub fn to_query(&self) -> Value {
        self.query.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_custom_passthrough() {
        let raw = json!({"fquery": {"query": {"query_string": {"query": "a AND b"}}}});
        let custom = Custom::new(raw.clone());
        assert_eq!(custom.to_query(), raw);
    }
}
