//! Generic container clause - an ordered list of child filters

use serde_json::{Map, Value};

use super::registry::{build_filter, FilterSpec};
use super::{Filter, FilterKind};
use crate::error::Result;

/// Ordered container of child clauses
///
/// Insertion order is serialization order and duplicates are permitted.
/// A `Generic` owns its children exclusively; the filter tree is a tree,
/// not a graph. The surrounding [`Filter`] variant decides the wire form
/// (`and` array, `or` array, `not` wrapper, or flat dict merge).
#[derive(Clone, Debug, Default)]
pub struct Generic {
    filters: Vec<Filter>,
}

impl Generic {
    /// Create an empty container
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Number of immediate children
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether this container contributes nothing to a query
    ///
    /// True iff there are no children or every child is itself empty.
    pub fn is_empty(&self) -> bool {
        self.filters.iter().all(Filter::is_empty)
    }

    /// Iterate over immediate children
    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Iterate mutably over immediate children
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Filter> {
        self.filters.iter_mut()
    }

    /// Append an already-built clause
    pub fn add(&mut self, filter: Filter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    /// Resolve a clause through the registry if named, then append it
    pub fn add_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Self> {
        let clause = build_filter(spec)?;
        self.filters.push(clause);
        Ok(self)
    }

    /// Append a clause under this container's `and` child
    ///
    /// Find-or-create: the first immediate `and` child is reused if one
    /// exists, otherwise an empty one is created and appended. Returns the
    /// `and` container (not `self`), so repeated calls accumulate clauses
    /// under one shared node.
    pub fn and_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Generic> {
        self.nested_filter(FilterKind::And, || Filter::And(Generic::new()), spec.into())
    }

    /// Append a clause under this container's `or` child; find-or-create
    /// semantics as in [`Generic::and_filter`]
    pub fn or_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Generic> {
        self.nested_filter(FilterKind::Or, || Filter::Or(Generic::new()), spec.into())
    }

    /// Append a clause under this container's `not` child; find-or-create
    /// semantics as in [`Generic::and_filter`]
    pub fn not_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Generic> {
        self.nested_filter(FilterKind::Not, || Filter::Not(Generic::new()), spec.into())
    }

    fn nested_filter(
        &mut self,
        kind: FilterKind,
        make: fn() -> Filter,
        spec: FilterSpec,
    ) -> Result<&mut Generic> {
        let clause = build_filter(spec)?;
        let index = match self.filters.iter().position(|f| f.kind() == kind) {
            Some(index) => index,
            None => {
                self.filters.push(make());
                self.filters.len() - 1
            }
        };
        match &mut self.filters[index] {
            Filter::And(g) | Filter::Or(g) | Filter::Not(g) | Filter::Dict(g)
            | Filter::Script(g) => {
                g.filters.push(clause);
                Ok(g)
            }
            // position() matched a container kind, so the variant holds a Generic
            _ => unreachable!(),
        }
    }

    /// Find the first immediate child of the given kind
    ///
    /// Linear scan, no recursion into grandchildren.
    pub fn find_filter(&mut self, kind: FilterKind) -> Option<&mut Filter> {
        self.filters.iter_mut().find(|f| f.kind() == kind)
    }

    /// Serialize non-empty children into an ordered array (`and`/`or` form)
    pub(crate) fn to_clause_array(&self) -> Value {
        let clauses: Vec<Value> = self
            .filters
            .iter()
            .filter(|f| !f.is_empty())
            .map(Filter::to_query)
            .collect();
        Value::Array(clauses)
    }

    /// Merge non-empty children's key-value pairs into one flat object
    ///
    /// Later children's keys silently overwrite earlier ones. Clauses that
    /// must not clobber one another belong inside an `and`/`or` container.
    pub(crate) fn to_merged_object(&self) -> Map<String, Value> {
        let mut merged = Map::new();
        for filter in self.filters.iter().filter(|f| !f.is_empty()) {
            if let Value::Object(entries) = filter.to_query() {
                merged.extend(entries);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Exists, Missing, Term};
    use serde_json::json;

    #[test]
    fn test_empty_container_is_empty() {
        assert!(Generic::new().is_empty());
    }

    #[test]
    fn test_container_with_terminal_is_not_empty() {
        let mut generic = Generic::new();
        generic.add(Exists::new("a").into());
        assert!(!generic.is_empty());
    }

    #[test]
    fn test_emptiness_recursion() {
        // A container holding only empty containers is itself empty.
        let mut generic = Generic::new();
        generic.add(Filter::And(Generic::new()));
        generic.add(Filter::Or(Generic::new()));
        assert!(generic.is_empty());
    }

    #[test]
    fn test_empty_children_excluded_from_serialization() {
        let mut outer = Generic::new();
        outer.add(Filter::And(Generic::new()));
        outer.add(Exists::new("a").into());
        assert_eq!(
            Filter::And(outer).to_query(),
            json!({"and": [{"exists": {"field": "a"}}]})
        );
    }

    #[test]
    fn test_and_filter_reuses_single_node() {
        let mut root = Generic::new();
        root.and_filter(Exists::new("a")).unwrap();
        root.and_filter(Exists::new("b")).unwrap();

        // Both clauses land under one shared `and` node.
        assert_eq!(root.len(), 1);
        assert_eq!(
            Filter::Dict(root).to_query(),
            json!({"and": [
                {"exists": {"field": "a"}},
                {"exists": {"field": "b"}}
            ]})
        );
    }

    #[test]
    fn test_or_and_not_create_separate_nodes() {
        let mut root = Generic::new();
        root.and_filter(Exists::new("a")).unwrap();
        root.or_filter(Exists::new("b")).unwrap();
        root.not_filter(Missing::new("c")).unwrap();
        assert_eq!(root.len(), 3);
    }

    #[test]
    fn test_nested_boolean_containers() {
        let mut root = Generic::new();
        root.or_filter(Exists::new("field")).unwrap();

        let or_filter = root.find_filter(FilterKind::Or).unwrap();
        or_filter.or_filter(Exists::new("nested_field")).unwrap();

        assert_eq!(
            Filter::Dict(root).to_query(),
            json!({"or": [
                {"exists": {"field": "field"}},
                {"or": [{"exists": {"field": "nested_field"}}]}
            ]})
        );
    }

    #[test]
    fn test_find_filter_scans_immediate_children_only() {
        let mut root = Generic::new();
        root.and_filter(Exists::new("a")).unwrap();

        // The `or` lives under `and`, not under the root.
        let and_filter = root.find_filter(FilterKind::And).unwrap();
        and_filter.or_filter(Exists::new("b")).unwrap();

        assert!(root.find_filter(FilterKind::Or).is_none());
    }

    #[test]
    fn test_merged_object_clobbers_key_for_key() {
        let mut root = Generic::new();
        root.add(Exists::new("a").into());
        root.add(Exists::new("b").into());
        assert_eq!(
            Filter::Dict(root).to_query(),
            json!({"exists": {"field": "b"}})
        );
    }

    #[test]
    fn test_duplicate_clauses_preserved_in_arrays() {
        let mut and = Generic::new();
        and.add(Term::new("status", "active").into());
        and.add(Term::new("status", "active").into());
        assert_eq!(
            Filter::And(and).to_query(),
            json!({"and": [
                {"term": {"status": "active"}},
                {"term": {"status": "active"}}
            ]})
        );
    }
}
