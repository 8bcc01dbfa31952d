//! Integration tests for query-document assembly
//!
//! Exercises the public API end to end: clause composition through the
//! builder, registry shorthands, and the omit-empty document shaping.

use std::sync::Arc;

use chrono::NaiveDateTime;
use es_fluent::filters::{Exists, GeoJson, Range, RegExp, Term, Terms};
use es_fluent::{
    build_filter, negate, Clock, FilterKind, FilterSpec, QueryBuilder, ScriptField,
};
use serde_json::json;

fn fixed_clock(datetime: &str) -> Clock {
    let instant = NaiveDateTime::parse_from_str(datetime, "%Y-%m-%dT%H:%M:%S").unwrap();
    Arc::new(move || instant)
}

#[test]
fn test_untouched_builder_serializes_to_source_flag_only() {
    let builder = QueryBuilder::new();
    assert_eq!(builder.to_query(), json!({"_source": true}));
}

#[test]
fn test_full_document_assembly() {
    let mut builder = QueryBuilder::new();
    builder.and_filter(Term::new("status", "active")).unwrap();
    builder.and_filter(Range::new("year").gte(2024)).unwrap();
    builder.not_filter(Exists::new("deleted_at")).unwrap();
    builder
        .add_script_field(ScriptField::inline("doubled", "doc['count'].value * 2"))
        .add_field("title")
        .add_field("year");
    builder.sort("year", "desc").unwrap();
    builder.size(50);

    assert_eq!(
        builder.to_query(),
        json!({
            "filter": {
                "and": [
                    {"term": {"status": "active"}},
                    {"range": {"year": {"gte": 2024}}}
                ],
                "not": {"exists": {"field": "deleted_at"}}
            },
            "script_fields": {
                "doubled": {
                    "lang": "groovy",
                    "script": "doc['count'].value * 2",
                    "params": {}
                }
            },
            "_source": ["title", "year"],
            "sort": [{"year": "desc"}],
            "size": 50
        })
    );
}

#[test]
fn test_idempotent_container_reuse() {
    let mut builder = QueryBuilder::new();
    builder.and_filter(Exists::new("a")).unwrap();
    builder.and_filter(Exists::new("b")).unwrap();

    // Both clauses share one `and` node; no sibling `and` is created.
    assert_eq!(
        builder.to_query()["filter"],
        json!({"and": [
            {"exists": {"field": "a"}},
            {"exists": {"field": "b"}}
        ]})
    );
}

#[test]
fn test_add_filter_clobber_semantics() {
    let mut builder = QueryBuilder::new();
    builder.add_filter(Exists::new("a")).unwrap();
    builder.add_filter(Exists::new("b")).unwrap();
    assert_eq!(
        builder.to_query()["filter"],
        json!({"exists": {"field": "b"}})
    );
}

#[test]
fn test_vacuous_containers_excluded() {
    let mut builder = QueryBuilder::new();
    builder.add_filter("and").unwrap();
    builder.add_filter("or").unwrap();

    // A root holding only empty containers is itself empty.
    assert_eq!(builder.to_query(), json!({"_source": true}));
}

#[test]
fn test_negation_shorthand_round_trip() {
    let shorthand = build_filter(FilterSpec::named("~exists", [json!("f")])).unwrap();
    let manual = negate(Exists::new("f"));
    assert_eq!(shorthand.to_query(), manual.to_query());
    assert_eq!(
        shorthand.to_query(),
        json!({"not": {"exists": {"field": "f"}}})
    );
}

#[test]
fn test_age_inversion_through_builder() {
    let mut builder = QueryBuilder::new().with_clock(fixed_clock("2015-01-01T02:00:00"));
    builder
        .add_filter(FilterSpec::named("age", [json!("f"), json!({"gte": 3600})]))
        .unwrap();

    // Age >= 1 hour becomes timestamp <= now - 1h.
    assert_eq!(
        builder.to_query()["filter"],
        json!({"range": {"f": {"lte": "2015-01-01T01:00:00"}}})
    );
}

#[test]
fn test_nested_container_growth() {
    let mut builder = QueryBuilder::new();
    builder.or_filter(Exists::new("field")).unwrap();

    let or_filter = builder.find_filter(FilterKind::Or).unwrap();
    or_filter.or_filter(Exists::new("nested_field")).unwrap();

    assert_eq!(
        builder.to_query()["filter"],
        json!({"or": [
            {"exists": {"field": "field"}},
            {"or": [{"exists": {"field": "nested_field"}}]}
        ]})
    );
}

#[test]
fn test_mixed_shorthand_and_typed_clauses() {
    let mut builder = QueryBuilder::new();
    builder
        .and_filter(FilterSpec::named("terms", [json!("tags"), json!(["a", "b"])]))
        .unwrap();
    builder.and_filter(Terms::new("lang", ["en"])).unwrap();
    builder
        .and_filter(RegExp::new("path", r"^/api/.*").unwrap())
        .unwrap();

    assert_eq!(
        builder.to_query()["filter"],
        json!({"and": [
            {"terms": {"tags": ["a", "b"]}},
            {"terms": {"lang": ["en"]}},
            {"regexp": {"path": "^/api/.*"}}
        ]})
    );
}

#[test]
fn test_geometry_clause_through_builder() {
    let feature = json!({
        "type": "Feature",
        "properties": {"ignored": true},
        "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
    });

    let mut builder = QueryBuilder::new();
    builder
        .and_filter(GeoJson::new("geom", &feature).unwrap())
        .unwrap();

    assert_eq!(
        builder.to_query()["filter"],
        json!({"and": [{"geo_shape": {"geom": {"shape": {
            "type": "Point",
            "coordinates": [1.0, 2.0]
        }}}}]})
    );
}

#[test]
fn test_document_is_valid_json_text() {
    let mut builder = QueryBuilder::new();
    builder.and_filter(Term::new("status", "active")).unwrap();
    builder.sort("year", "asc").unwrap();

    let text = serde_json::to_string(&builder.to_query()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, builder.to_query());
}
