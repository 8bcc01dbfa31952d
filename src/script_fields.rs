//! Script-field management for the query builder

use serde_json::{json, Map, Value};

use crate::filters::keyed;
use crate::filters::script::DEFAULT_SCRIPT_LANG;

/// A single requested script field, either inline source or a
/// pre-indexed script referenced by id
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptField {
    Inline {
        name: String,
        script: String,
        lang: String,
        params: Map<String, Value>,
    },
    Indexed {
        name: String,
        script_id: String,
        lang: String,
        params: Map<String, Value>,
    },
}

impl ScriptField {
    /// A script field computed from inline script source
    pub fn inline(name: impl Into<String>, script: impl Into<String>) -> Self {
        ScriptField::Inline {
            name: name.into(),
            script: script.into(),
            lang: DEFAULT_SCRIPT_LANG.to_string(),
            params: Map::new(),
        }
    }

    /// A script field computed from a pre-indexed script
    pub fn indexed(name: impl Into<String>, script_id: impl Into<String>) -> Self {
        ScriptField::Indexed {
            name: name.into(),
            script_id: script_id.into(),
            lang: DEFAULT_SCRIPT_LANG.to_string(),
            params: Map::new(),
        }
    }

    pub fn with_lang(mut self, new_lang: impl Into<String>) -> Self {
        match &mut self {
            ScriptField::Inline { lang, .. } | ScriptField::Indexed { lang, .. } => {
                *lang = new_lang.into();
            }
        }
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        match &mut self {
            ScriptField::Inline { params, .. } | ScriptField::Indexed { params, .. } => {
                params.insert(key.into(), value.into());
            }
        }
        self
    }

    /// The resulting field name
    pub fn name(&self) -> &str {
        match self {
            ScriptField::Inline { name, .. } | ScriptField::Indexed { name, .. } => name,
        }
    }

    pub fn to_query(&self) -> Value {
        match self {
            ScriptField::Inline {
                name,
                script,
                lang,
                params,
            } => keyed(
                name,
                json!({"lang": lang, "script": script, "params": params}),
            ),
            ScriptField::Indexed {
                name,
                script_id,
                lang,
                params,
            } => keyed(
                name,
                json!({"lang": lang, "script_id": script_id, "params": params}),
            ),
        }
    }
}

/// Ordered collection of requested script fields
#[derive(Clone, Debug, Default)]
pub struct ScriptFields {
    fields: Vec<ScriptField>,
}

impl ScriptFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a script field
    pub fn add_field(&mut self, field: ScriptField) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Merge every script field's entry into one object
    pub fn to_query(&self) -> Value {
        let mut query = Map::new();
        for field in &self.fields {
            if let Value::Object(entries) = field.to_query() {
                query.extend(entries);
            }
        }
        Value::Object(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_script_field() {
        let field = ScriptField::inline("doubled", "doc['count'].value * 2");
        assert_eq!(
            field.to_query(),
            json!({"doubled": {
                "lang": "groovy",
                "script": "doc['count'].value * 2",
                "params": {}
            }})
        );
    }

    #[test]
    fn test_indexed_script_field_with_params() {
        let field = ScriptField::indexed("distance", "haversine")
            .with_lang("painless")
            .with_param("lat", 51.5);
        assert_eq!(
            field.to_query(),
            json!({"distance": {
                "lang": "painless",
                "script_id": "haversine",
                "params": {"lat": 51.5}
            }})
        );
    }

    #[test]
    fn test_script_fields_merge() {
        let mut fields = ScriptFields::new();
        fields.add_field(ScriptField::inline("a", "1"));
        fields.add_field(ScriptField::inline("b", "2"));

        let query = fields.to_query();
        assert_eq!(query["a"]["script"], "1");
        assert_eq!(query["b"]["script"], "2");
    }

    #[test]
    fn test_empty_script_fields() {
        let fields = ScriptFields::new();
        assert!(fields.is_empty());
        assert_eq!(fields.to_query(), json!({}));
    }
}
