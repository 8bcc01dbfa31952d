//! Sort-list management for the query builder

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EsFluentError, Result};
use crate::filters::keyed;

/// Sort direction for a single field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = EsFluentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(EsFluentError::InvalidArgument(format!(
                "sort direction must be \"asc\" or \"desc\", got {other:?}"
            ))),
        }
    }
}

/// A single sort entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Ordered list of sort entries
///
/// Insertion order is preserved and duplicate fields are not deduplicated.
#[derive(Clone, Debug, Default)]
pub struct Sorts {
    entries: Vec<SortSpec>,
}

impl Sorts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a sort entry
    pub fn add(&mut self, field: impl Into<String>, direction: SortDirection) -> &mut Self {
        self.entries.push(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    /// Drop every entry for the given field
    pub fn remove(&mut self, field: &str) -> &mut Self {
        self.entries.retain(|entry| entry.field != field);
        self
    }

    /// Drop all entries
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    pub fn to_query(&self) -> Value {
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                keyed(
                    &entry.field,
                    Value::String(entry.direction.as_str().to_string()),
                )
            })
            .collect();
        Value::Array(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);

        let err = "ascending".parse::<SortDirection>().unwrap_err();
        assert!(matches!(err, EsFluentError::InvalidArgument(_)));
    }

    #[test]
    fn test_sorts_preserve_order_and_duplicates() {
        let mut sorts = Sorts::new();
        sorts.add("a", SortDirection::Desc);
        sorts.add("b", SortDirection::Asc);
        sorts.add("a", SortDirection::Asc);
        assert_eq!(
            sorts.to_query(),
            json!([{"a": "desc"}, {"b": "asc"}, {"a": "asc"}])
        );
    }

    #[test]
    fn test_remove_drops_every_entry_for_field() {
        let mut sorts = Sorts::new();
        sorts.add("a", SortDirection::Desc);
        sorts.add("b", SortDirection::Asc);
        sorts.add("a", SortDirection::Asc);
        sorts.remove("a");
        assert_eq!(sorts.to_query(), json!([{"b": "asc"}]));
    }

    #[test]
    fn test_clear() {
        let mut sorts = Sorts::new();
        sorts.add("a", SortDirection::Asc);
        sorts.clear();
        assert!(sorts.is_empty());
    }
}
