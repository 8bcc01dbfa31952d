//! Regular expression clause

use regex::Regex;
use serde_json::Value;

use super::keyed;
use crate::error::Result;

/// Matches documents whose field matches a regular expression
///
/// The pattern is compiled once at construction purely to validate it;
/// the actual matching happens server-side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegExp {
    pub field: String,
    pub pattern: String,
}

impl RegExp {
    /// Create a regexp clause; fails with `InvalidPattern` if the pattern
    /// does not compile
    pub fn new(field: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        Regex::new(&pattern)?;
        Ok(Self {
            field: field.into(),
            pattern,
        })
    }

    pub fn to_query(&self) -> Value {
        keyed("regexp", keyed(&self.field, Value::String(self.pattern.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EsFluentError;
    use serde_json::json;

    #[test]
    fn test_regexp_query() {
        let regexp = RegExp::new("field", r".*test_Exp$").unwrap();
        assert_eq!(
            regexp.to_query(),
            json!({"regexp": {"field": ".*test_Exp$"}})
        );
    }

    #[test]
    fn test_invalid_pattern_fails_at_construction() {
        let err = RegExp::new("field", "[$").unwrap_err();
        assert!(matches!(err, EsFluentError::InvalidPattern(_)));
    }
}
