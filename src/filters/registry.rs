//! Filter shorthand registry
//!
//! Maps short string names (`"term"`, `"range"`, ...) to clause factories
//! so callers can build clauses by name without importing concrete types:
//!
//! ```rust
//! use es_fluent::filters::registry::{build_filter, FilterSpec};
//! use serde_json::json;
//!
//! let filter = build_filter(FilterSpec::named("term", [json!("status"), json!("active")]))?;
//! assert_eq!(filter.to_query(), json!({"term": {"status": "active"}}));
//! # Ok::<(), es_fluent::EsFluentError>(())
//! ```
//!
//! A leading `~` on a name negates the built clause by wrapping it in
//! `not`. The built-in set is installed once at first use; additional
//! factories can be registered explicitly with [`register_filter`].

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::trace;

use super::{
    negate, Age, AgeBounds, Custom, Exists, Filter, Generic, GeoJson, IndexedShape, Missing,
    Range, RangeBounds, RegExp, ScriptId, Term, Terms,
};
use crate::error::{EsFluentError, Result};

/// Factory signature for registry-constructed clauses
///
/// Positional arguments arrive as JSON values, mirroring the shorthand
/// call shape `("term", field, value)`.
pub type FilterFactory = fn(&[Value]) -> Result<Filter>;

/// Overloaded construction argument: an already-built clause passes
/// through untouched, a name goes through the registry
#[derive(Clone, Debug)]
pub enum FilterSpec {
    /// Identity passthrough
    Instance(Filter),
    /// Registry lookup by shorthand name plus positional arguments
    Named { name: String, args: Vec<Value> },
}

impl FilterSpec {
    /// A shorthand name with positional JSON arguments
    pub fn named(name: impl Into<String>, args: impl IntoIterator<Item = Value>) -> Self {
        FilterSpec::Named {
            name: name.into(),
            args: args.into_iter().collect(),
        }
    }
}

impl From<Filter> for FilterSpec {
    fn from(filter: Filter) -> Self {
        FilterSpec::Instance(filter)
    }
}

impl From<&str> for FilterSpec {
    fn from(name: &str) -> Self {
        FilterSpec::Named {
            name: name.to_string(),
            args: Vec::new(),
        }
    }
}

impl From<String> for FilterSpec {
    fn from(name: String) -> Self {
        FilterSpec::Named {
            name,
            args: Vec::new(),
        }
    }
}

static REGISTRY: OnceLock<RwLock<HashMap<String, FilterFactory>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<String, FilterFactory>> {
    REGISTRY.get_or_init(|| RwLock::new(builtin_factories()))
}

fn builtin_factories() -> HashMap<String, FilterFactory> {
    let builtins: [(&str, FilterFactory); 15] = [
        ("term", build_term),
        ("terms", build_terms),
        ("range", build_range),
        ("age", build_age),
        ("exists", build_exists),
        ("missing", build_missing),
        ("regexp", build_regexp),
        ("custom", build_custom),
        ("script", build_script),
        ("script_id", build_script_id),
        ("and", build_and),
        ("or", build_or),
        ("not", build_not),
        ("geometry", build_geometry),
        ("indexed_geometry", build_indexed_geometry),
    ];
    builtins
        .into_iter()
        .map(|(name, factory)| (name.to_string(), factory))
        .collect()
}

/// Register a clause factory under a unique shorthand name
///
/// Fails with `DuplicateFilter` if the name is already taken, including
/// the built-in names.
pub fn register_filter(name: &str, factory: FilterFactory) -> Result<()> {
    let mut map = registry().write();
    if map.contains_key(name) {
        return Err(EsFluentError::DuplicateFilter(name.to_string()));
    }
    map.insert(name.to_string(), factory);
    Ok(())
}

/// Overloaded clause construction
///
/// Already-built clauses pass through unchanged. Names are resolved
/// through the registry; a leading `~` strips the marker, builds the
/// clause, and wraps it in `not`. Unknown names fail with
/// `UnknownFilter`.
pub fn build_filter(spec: impl Into<FilterSpec>) -> Result<Filter> {
    match spec.into() {
        FilterSpec::Instance(filter) => Ok(filter),
        FilterSpec::Named { name, args } => {
            if let Some(stripped) = name.strip_prefix('~') {
                Ok(negate(construct(stripped, &args)?))
            } else {
                construct(&name, &args)
            }
        }
    }
}

fn construct(name: &str, args: &[Value]) -> Result<Filter> {
    let factory = registry()
        .read()
        .get(name)
        .copied()
        .ok_or_else(|| EsFluentError::UnknownFilter(name.to_string()))?;
    trace!(filter = name, "resolved filter shorthand");
    factory(args)
}

// Positional argument decoding; errors surface as `InvalidArgument`.

fn str_arg<'a>(args: &'a [Value], index: usize, what: &str) -> Result<&'a str> {
    args.get(index).and_then(Value::as_str).ok_or_else(|| {
        EsFluentError::InvalidArgument(format!("{what} must be a string (argument {index})"))
    })
}

fn value_arg<'a>(args: &'a [Value], index: usize, what: &str) -> Result<&'a Value> {
    args.get(index).ok_or_else(|| {
        EsFluentError::InvalidArgument(format!("missing {what} (argument {index})"))
    })
}

fn object_arg(args: &[Value], index: usize, what: &str) -> Result<Map<String, Value>> {
    args.get(index)
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| {
            EsFluentError::InvalidArgument(format!("{what} must be an object (argument {index})"))
        })
}

fn no_args(args: &[Value], name: &str) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(EsFluentError::InvalidArgument(format!(
            "{name} takes no arguments, got {}",
            args.len()
        )))
    }
}

fn build_term(args: &[Value]) -> Result<Filter> {
    let field = str_arg(args, 0, "field")?;
    let value = value_arg(args, 1, "value")?;
    Ok(Term::new(field, value.clone()).into())
}

fn build_terms(args: &[Value]) -> Result<Filter> {
    let field = str_arg(args, 0, "field")?;
    let values = value_arg(args, 1, "values")?
        .as_array()
        .cloned()
        .ok_or_else(|| {
            EsFluentError::InvalidArgument("values must be an array (argument 1)".to_string())
        })?;
    Ok(Terms::new(field, values).into())
}

fn build_range(args: &[Value]) -> Result<Filter> {
    let field = str_arg(args, 0, "field")?;
    let bounds = match args.get(1) {
        Some(value) => serde_json::from_value::<RangeBounds>(value.clone())
            .map_err(|e| EsFluentError::InvalidArgument(format!("invalid range bounds: {e}")))?,
        None => RangeBounds::default(),
    };
    Ok(Range::new(field).with_bounds(bounds).into())
}

fn build_age(args: &[Value]) -> Result<Filter> {
    let field = str_arg(args, 0, "field")?;
    let bounds = match args.get(1) {
        Some(value) => serde_json::from_value::<AgeBounds>(value.clone())
            .map_err(|e| EsFluentError::InvalidArgument(format!("invalid age bounds: {e}")))?,
        None => AgeBounds::default(),
    };
    Ok(Age::from_bounds(field, bounds).into())
}

fn build_exists(args: &[Value]) -> Result<Filter> {
    Ok(Exists::new(str_arg(args, 0, "field")?).into())
}

fn build_missing(args: &[Value]) -> Result<Filter> {
    Ok(Missing::new(str_arg(args, 0, "field")?).into())
}

fn build_regexp(args: &[Value]) -> Result<Filter> {
    let field = str_arg(args, 0, "field")?;
    let pattern = str_arg(args, 1, "pattern")?;
    Ok(RegExp::new(field, pattern)?.into())
}

fn build_custom(args: &[Value]) -> Result<Filter> {
    Ok(Custom::new(value_arg(args, 0, "query")?.clone()).into())
}

fn build_script(args: &[Value]) -> Result<Filter> {
    no_args(args, "script")?;
    Ok(Filter::Script(Generic::new()))
}

fn build_script_id(args: &[Value]) -> Result<Filter> {
    let name = str_arg(args, 0, "name")?;
    let script_id = str_arg(args, 1, "script_id")?;
    let mut script = ScriptId::new(name, script_id);
    if args.len() > 2 {
        script = script.with_params(object_arg(args, 2, "params")?);
    }
    if args.len() > 3 {
        script = script.with_lang(str_arg(args, 3, "lang")?);
    }
    Ok(script.into())
}

fn build_and(args: &[Value]) -> Result<Filter> {
    no_args(args, "and")?;
    Ok(Filter::And(Generic::new()))
}

fn build_or(args: &[Value]) -> Result<Filter> {
    no_args(args, "or")?;
    Ok(Filter::Or(Generic::new()))
}

fn build_not(args: &[Value]) -> Result<Filter> {
    no_args(args, "not")?;
    Ok(Filter::Not(Generic::new()))
}

fn build_geometry(args: &[Value]) -> Result<Filter> {
    let field = str_arg(args, 0, "field")?;
    let geojson = value_arg(args, 1, "geojson")?;
    Ok(GeoJson::new(field, geojson)?.into())
}

fn build_indexed_geometry(args: &[Value]) -> Result<Filter> {
    Ok(IndexedShape::new(
        str_arg(args, 0, "field")?,
        str_arg(args, 1, "shape_id")?,
        str_arg(args, 2, "index")?,
        str_arg(args, 3, "doc_type")?,
        str_arg(args, 4, "path")?,
    )
    .into())
}
