//! Query builder façade
//!
//! Owns one root container plus the sibling sections of a query document
//! (source fields, script fields, sort list, result size) and assembles
//! the final JSON document on demand.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Result;
use crate::fields::Fields;
use crate::filters::registry::{build_filter, FilterSpec};
use crate::filters::{system_clock, Clock, Filter, FilterKind, Generic};
use crate::script_fields::{ScriptField, ScriptFields};
use crate::sort::{SortDirection, Sorts};

/// Fluent builder for a single query document
///
/// Constructed once per logical query, mutated through its fluent methods,
/// and serialized any number of times with [`QueryBuilder::to_query`] -
/// each call recomputes the document from current state.
///
/// # Example
///
/// ```rust
/// use es_fluent::QueryBuilder;
/// use es_fluent::filters::{Exists, Term};
///
/// let mut builder = QueryBuilder::new();
/// builder.and_filter(Term::new("status", "active"))?;
/// builder.and_filter(Exists::new("modified_at"))?;
/// builder.sort("modified_at", "desc")?;
///
/// let query = builder.to_query();
/// assert_eq!(query["filter"]["and"][0]["term"]["status"], "active");
/// # Ok::<(), es_fluent::EsFluentError>(())
/// ```
#[derive(Clone)]
pub struct QueryBuilder {
    root: Generic,
    fields: Fields,
    script_fields: ScriptFields,
    sorts: Sorts,
    include_source: bool,
    size: Option<u64>,
    clock: Clock,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            root: Generic::new(),
            fields: Fields::new(),
            script_fields: ScriptFields::new(),
            sorts: Sorts::new(),
            include_source: true,
            size: None,
            clock: system_clock(),
        }
    }

    /// Substitute the time source used by `age` clauses added through this
    /// builder
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Append a clause directly to the root container
    ///
    /// The root merges its children's key-value pairs into one flat
    /// object, so same-keyed clauses clobber one another; use
    /// [`QueryBuilder::and_filter`] to keep clauses isolated.
    pub fn add_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Self> {
        let mut clause = build_filter(spec)?;
        bind_clock(&mut clause, &self.clock);
        self.root.add(clause);
        Ok(self)
    }

    /// Append a clause under the root's shared `and` node
    pub fn and_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Self> {
        let mut clause = build_filter(spec)?;
        bind_clock(&mut clause, &self.clock);
        self.root.and_filter(clause)?;
        Ok(self)
    }

    /// Append a clause under the root's shared `or` node
    pub fn or_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Self> {
        let mut clause = build_filter(spec)?;
        bind_clock(&mut clause, &self.clock);
        self.root.or_filter(clause)?;
        Ok(self)
    }

    /// Append a clause under the root's shared `not` node
    pub fn not_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Self> {
        let mut clause = build_filter(spec)?;
        bind_clock(&mut clause, &self.clock);
        self.root.not_filter(clause)?;
        Ok(self)
    }

    /// Find the first immediate child of the root with the given kind
    pub fn find_filter(&mut self, kind: FilterKind) -> Option<&mut Filter> {
        self.root.find_filter(kind)
    }

    /// Request a source field; switches `_source` from the boolean flag to
    /// an explicit field-name array
    pub fn add_field(&mut self, field: impl Into<String>) -> &mut Self {
        self.fields.add_field(field);
        self
    }

    /// Request a script field
    pub fn add_script_field(&mut self, field: ScriptField) -> &mut Self {
        self.script_fields.add_field(field);
        self
    }

    /// Append a sort entry; direction must be `"asc"` or `"desc"`
    ///
    /// Insertion order is preserved and duplicate fields are kept.
    pub fn sort(&mut self, field: impl Into<String>, direction: &str) -> Result<&mut Self> {
        let direction: SortDirection = direction.parse()?;
        self.sorts.add(field, direction);
        Ok(self)
    }

    /// Drop every sort entry for the given field
    pub fn remove_sort(&mut self, field: &str) -> &mut Self {
        self.sorts.remove(field);
        self
    }

    /// Drop all sort entries
    pub fn reset_sort(&mut self) -> &mut Self {
        self.sorts.clear();
        self
    }

    /// Limit the number of results; unset by default and omitted from the
    /// document until set
    pub fn size(&mut self, size: u64) -> &mut Self {
        self.size = Some(size);
        self
    }

    /// Include the document source in results (the default)
    pub fn enable_source(&mut self) -> &mut Self {
        self.include_source = true;
        self
    }

    /// Exclude the document source from results
    pub fn disable_source(&mut self) -> &mut Self {
        self.include_source = false;
        self
    }

    /// Assemble the query document
    ///
    /// Absent sections are omitted entirely rather than serialized as
    /// empty placeholders: `filter` appears only if the root is non-empty,
    /// `script_fields` and `sort` only if non-empty, `size` only if set.
    /// `_source` is always present - as the field-name array when explicit
    /// fields were requested, otherwise as the boolean flag.
    pub fn to_query(&self) -> Value {
        let mut query = Map::new();

        if !self.root.is_empty() {
            query.insert(
                "filter".to_string(),
                Value::Object(self.root.to_merged_object()),
            );
        }

        if !self.script_fields.is_empty() {
            query.insert("script_fields".to_string(), self.script_fields.to_query());
        }

        if self.fields.is_empty() {
            query.insert("_source".to_string(), Value::Bool(self.include_source));
        } else {
            query.insert("_source".to_string(), self.fields.to_query());
        }

        if !self.sorts.is_empty() {
            query.insert("sort".to_string(), self.sorts.to_query());
        }

        if let Some(size) = self.size {
            query.insert("size".to_string(), Value::from(size));
        }

        debug!(sections = query.len(), "assembled query document");
        Value::Object(query)
    }
}

impl std::fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("root", &self.root)
            .field("fields", &self.fields)
            .field("script_fields", &self.script_fields)
            .field("sorts", &self.sorts)
            .field("include_source", &self.include_source)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

// Age clauses convert bounds at serialization time, so any age clause
// entering the tree picks up the builder's clock, including ones nested
// inside containers.
fn bind_clock(filter: &mut Filter, clock: &Clock) {
    if let Filter::Age(age) = filter {
        age.set_clock(clock.clone());
    } else if let Some(generic) = filter.as_generic_mut() {
        for child in generic.iter_mut() {
            bind_clock(child, clock);
        }
    }
}
