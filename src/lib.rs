//! # es-fluent
//!
//! A fluent construction layer for Elasticsearch 1.x-style filter query
//! documents. The crate builds JSON-serializable query documents out of
//! composable filter clauses; it never talks to a network and never
//! executes queries.
//!
//! - Container clauses (`and`, `or`, `not`) own ordered child lists and
//!   are reused across calls, so repeated `and_filter` calls accumulate
//!   clauses under one shared node.
//! - Terminal clauses (`term`, `terms`, `range`, `age`, `exists`,
//!   `missing`, `regexp`, geometry, ...) serialize deterministically into
//!   the legacy filter DSL.
//! - A shorthand registry lets clauses be built by name, with a leading
//!   `~` negating the result.
//!
//! ## Quick start
//!
//! ```rust
//! use es_fluent::QueryBuilder;
//! use es_fluent::filters::{Exists, Range, Term};
//!
//! let mut builder = QueryBuilder::new();
//! builder.and_filter(Term::new("status", "active"))?;
//! builder.and_filter(Range::new("year").gte(2024))?;
//! builder.not_filter(Exists::new("deleted_at"))?;
//! builder.sort("year", "desc")?;
//! builder.size(25);
//!
//! let query = builder.to_query();
//! assert_eq!(query["filter"]["and"][0]["term"]["status"], "active");
//! assert_eq!(query["size"], 25);
//! # Ok::<(), es_fluent::EsFluentError>(())
//! ```

pub mod builder;
pub mod error;
pub mod fields;
pub mod filters;
pub mod script_fields;
pub mod sort;

pub use builder::QueryBuilder;
pub use error::{EsFluentError, Result};
pub use fields::Fields;
pub use filters::registry::{build_filter, register_filter, FilterFactory, FilterSpec};
pub use filters::{negate, Clock, Filter, FilterKind};
pub use script_fields::{ScriptField, ScriptFields};
pub use sort::{SortDirection, SortSpec, Sorts};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
