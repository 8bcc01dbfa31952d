//! Pre-indexed script clause

use serde_json::{json, Map, Value};

use super::keyed;

/// Default script language for script clauses and script fields
pub const DEFAULT_SCRIPT_LANG: &str = "groovy";

/// References a script previously indexed in the cluster
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptId {
    /// Name of the script's generated field
    pub name: String,
    /// Identifier within the cluster's indexed scripts
    pub script_id: String,
    pub lang: String,
    pub params: Map<String, Value>,
}

impl ScriptId {
    pub fn new(name: impl Into<String>, script_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script_id: script_id.into(),
            lang: DEFAULT_SCRIPT_LANG.to_string(),
            params: Map::new(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }

    pub fn to_query(&self) -> Value {
        keyed(
            &self.name,
            json!({
                "lang": self.lang,
                "script_id": self.script_id,
                "params": self.params,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_id_defaults() {
        let script = ScriptId::new("distance", "haversine");
        assert_eq!(
            script.to_query(),
            json!({"distance": {
                "lang": "groovy",
                "script_id": "haversine",
                "params": {}
            }})
        );
    }

    #[test]
    fn test_script_id_with_params_and_lang() {
        let script = ScriptId::new("distance", "haversine")
            .with_lang("painless")
            .with_param("lat", 51.5)
            .with_param("lon", 0.12);
        assert_eq!(
            script.to_query(),
            json!({"distance": {
                "lang": "painless",
                "script_id": "haversine",
                "params": {"lat": 51.5, "lon": 0.12}
            }})
        );
    }
}
