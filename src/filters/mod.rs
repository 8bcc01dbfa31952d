//! Filter clause hierarchy
//!
//! Filters form a tree: container clauses (`and`, `or`, `not`, `dict`,
//! `script`) own an ordered list of child clauses, while terminal clauses
//! (`term`, `range`, `exists`, ...) are self-contained leaves. Every clause
//! serializes deterministically into the legacy Elasticsearch 1.x filter
//! DSL via [`Filter::to_query`].
//!
//! # Example
//!
//! ```json
//! {
//!   "and": [
//!     { "term": { "status": "active" } },
//!     { "range": { "year": { "gte": 2024 } } }
//!   ]
//! }
//! ```

pub mod age;
pub mod custom;
pub mod exists;
pub mod generic;
pub mod geometry;
pub mod range;
pub mod registry;
pub mod regexp;
pub mod script;
pub mod term;

pub use age::{system_clock, Age, AgeBounds, Clock};
pub use custom::Custom;
pub use exists::{Exists, Missing};
pub use generic::Generic;
pub use geometry::{prepare_geojson, GeoJson, IndexedShape};
pub use range::{Range, RangeBounds, RangeValue};
pub use registry::{build_filter, register_filter, FilterFactory, FilterSpec};
pub use regexp::RegExp;
pub use script::ScriptId;
pub use term::{Term, Terms};

use serde_json::{Map, Value};

use crate::error::{EsFluentError, Result};

/// A single unit of search criteria, either a container or a terminal leaf
///
/// Dispatch is by `match` per variant; there are no trait objects in the
/// tree, and [`FilterKind`] is the discriminant used for child lookup.
#[derive(Clone, Debug)]
pub enum Filter {
    /// Conjunction; serializes as `{"and": [...]}`
    And(Generic),
    /// Disjunction; serializes as `{"or": [...]}`
    Or(Generic),
    /// Inverts the conjunction of its children; `{"not": {...}}`
    Not(Generic),
    /// Anonymous container merging its children into one flat object
    Dict(Generic),
    /// Script criteria container; merges children without a wrapper key
    Script(Generic),
    Term(Term),
    Terms(Terms),
    Exists(Exists),
    Missing(Missing),
    Range(Range),
    Age(Age),
    RegExp(RegExp),
    Custom(Custom),
    ScriptId(ScriptId),
    GeoJson(GeoJson),
    IndexedShape(IndexedShape),
}

/// Runtime discriminant for [`Filter`], used by `find_filter`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    And,
    Or,
    Not,
    Dict,
    Script,
    Term,
    Terms,
    Exists,
    Missing,
    Range,
    Age,
    RegExp,
    Custom,
    ScriptId,
    GeoJson,
    IndexedShape,
}

impl FilterKind {
    /// The shorthand name for this clause type
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::And => "and",
            FilterKind::Or => "or",
            FilterKind::Not => "not",
            FilterKind::Dict => "dict",
            FilterKind::Script => "script",
            FilterKind::Term => "term",
            FilterKind::Terms => "terms",
            FilterKind::Exists => "exists",
            FilterKind::Missing => "missing",
            FilterKind::Range => "range",
            FilterKind::Age => "age",
            FilterKind::RegExp => "regexp",
            FilterKind::Custom => "custom",
            FilterKind::ScriptId => "script_id",
            FilterKind::GeoJson => "geometry",
            FilterKind::IndexedShape => "indexed_geometry",
        }
    }
}

impl Filter {
    /// The runtime kind of this clause
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::And(_) => FilterKind::And,
            Filter::Or(_) => FilterKind::Or,
            Filter::Not(_) => FilterKind::Not,
            Filter::Dict(_) => FilterKind::Dict,
            Filter::Script(_) => FilterKind::Script,
            Filter::Term(_) => FilterKind::Term,
            Filter::Terms(_) => FilterKind::Terms,
            Filter::Exists(_) => FilterKind::Exists,
            Filter::Missing(_) => FilterKind::Missing,
            Filter::Range(_) => FilterKind::Range,
            Filter::Age(_) => FilterKind::Age,
            Filter::RegExp(_) => FilterKind::RegExp,
            Filter::Custom(_) => FilterKind::Custom,
            Filter::ScriptId(_) => FilterKind::ScriptId,
            Filter::GeoJson(_) => FilterKind::GeoJson,
            Filter::IndexedShape(_) => FilterKind::IndexedShape,
        }
    }

    /// The shorthand name for this clause type
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Borrow the child container, if this is a container clause
    pub fn as_generic(&self) -> Option<&Generic> {
        match self {
            Filter::And(g)
            | Filter::Or(g)
            | Filter::Not(g)
            | Filter::Dict(g)
            | Filter::Script(g) => Some(g),
            _ => None,
        }
    }

    /// Mutably borrow the child container, if this is a container clause
    pub fn as_generic_mut(&mut self) -> Option<&mut Generic> {
        match self {
            Filter::And(g)
            | Filter::Or(g)
            | Filter::Not(g)
            | Filter::Dict(g)
            | Filter::Script(g) => Some(g),
            _ => None,
        }
    }

    /// Whether this clause contributes nothing to a query
    ///
    /// Terminals are never empty. A container is empty iff it has no
    /// children or every child is itself empty (recursive vacuity).
    pub fn is_empty(&self) -> bool {
        match self.as_generic() {
            Some(generic) => generic.is_empty(),
            None => false,
        }
    }

    /// Append a clause to this container
    ///
    /// Fails with `UnsupportedOperation` on terminal clauses, which are
    /// leaves by construction.
    pub fn add_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Self> {
        let name = self.name();
        let Some(generic) = self.as_generic_mut() else {
            return Err(EsFluentError::UnsupportedOperation(name));
        };
        generic.add_filter(spec)?;
        Ok(self)
    }

    /// Find the first immediate child of the given kind
    ///
    /// The scan does not recurse into grandchildren. Fails with
    /// `UnsupportedOperation` on terminal clauses.
    pub fn find_filter(&mut self, kind: FilterKind) -> Result<Option<&mut Filter>> {
        let name = self.name();
        match self.as_generic_mut() {
            Some(generic) => Ok(generic.find_filter(kind)),
            None => Err(EsFluentError::UnsupportedOperation(name)),
        }
    }

    /// Append a clause under this container's `and` child, creating it if
    /// absent; see [`Generic::and_filter`]
    pub fn and_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Generic> {
        let name = self.name();
        match self.as_generic_mut() {
            Some(generic) => generic.and_filter(spec),
            None => Err(EsFluentError::UnsupportedOperation(name)),
        }
    }

    /// Append a clause under this container's `or` child, creating it if
    /// absent; see [`Generic::or_filter`]
    pub fn or_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Generic> {
        let name = self.name();
        match self.as_generic_mut() {
            Some(generic) => generic.or_filter(spec),
            None => Err(EsFluentError::UnsupportedOperation(name)),
        }
    }

    /// Append a clause under this container's `not` child, creating it if
    /// absent; see [`Generic::not_filter`]
    pub fn not_filter(&mut self, spec: impl Into<FilterSpec>) -> Result<&mut Generic> {
        let name = self.name();
        match self.as_generic_mut() {
            Some(generic) => generic.not_filter(spec),
            None => Err(EsFluentError::UnsupportedOperation(name)),
        }
    }

    /// Serialize this clause and its descendants into a JSON value
    ///
    /// The document is recomputed on every call; nothing is cached. Each
    /// container picks its legacy wire form: `and`/`or` collect non-empty
    /// children into an array, `not` merges its children like a dict and
    /// wraps the result, and `dict`/`script` merge children's key-value
    /// pairs into one flat object.
    pub fn to_query(&self) -> Value {
        match self {
            Filter::And(g) => keyed("and", g.to_clause_array()),
            Filter::Or(g) => keyed("or", g.to_clause_array()),
            Filter::Not(g) => keyed("not", Value::Object(g.to_merged_object())),
            Filter::Dict(g) | Filter::Script(g) => Value::Object(g.to_merged_object()),
            Filter::Term(t) => t.to_query(),
            Filter::Terms(t) => t.to_query(),
            Filter::Exists(e) => e.to_query(),
            Filter::Missing(m) => m.to_query(),
            Filter::Range(r) => r.to_query(),
            Filter::Age(a) => a.to_query(),
            Filter::RegExp(r) => r.to_query(),
            Filter::Custom(c) => c.to_query(),
            Filter::ScriptId(s) => s.to_query(),
            Filter::GeoJson(g) => g.to_query(),
            Filter::IndexedShape(i) => i.to_query(),
        }
    }
}

/// Wrap a filter in a fresh `not` container
///
/// The explicit spelling of the `~` shorthand prefix:
/// `negate(Exists::new("f"))` serializes as `{"not": {"exists": {"field": "f"}}}`.
pub fn negate(filter: impl Into<Filter>) -> Filter {
    let mut inner = Generic::new();
    inner.add(filter.into());
    Filter::Not(inner)
}

/// Build a one-entry JSON object; clause serializers use this for
/// field-keyed payloads where the key is not a literal
pub(crate) fn keyed(key: &str, value: Value) -> Value {
    let mut object = Map::new();
    object.insert(key.to_string(), value);
    Value::Object(object)
}

// Conversions so concrete clause values can be passed anywhere a
// `FilterSpec` is accepted.
macro_rules! impl_filter_from {
    ($($variant:ident),* $(,)?) => {$(
        impl From<$variant> for Filter {
            fn from(filter: $variant) -> Self {
                Filter::$variant(filter)
            }
        }

        impl From<$variant> for FilterSpec {
            fn from(filter: $variant) -> Self {
                FilterSpec::Instance(Filter::$variant(filter))
            }
        }
    )*};
}

impl_filter_from!(
    Term,
    Terms,
    Exists,
    Missing,
    Range,
    Age,
    RegExp,
    Custom,
    ScriptId,
    GeoJson,
    IndexedShape,
);
