//! Geometry clauses - GeoJSON shapes and pre-indexed shapes

use serde_json::{json, Value};

use super::keyed;
use crate::error::{EsFluentError, Result};

/// Normalize incoming GeoJSON into bare geometry suitable for a
/// `geo_shape` clause
///
/// `Feature` wrappers are recast to their bare `geometry` and
/// `FeatureCollection` to a `GeometryCollection`, dropping non-geometry
/// properties along the way. Anything already a geometry passes through
/// unchanged. Fails with `InvalidArgument` on structurally malformed
/// input.
pub fn prepare_geojson(geojson: &Value) -> Result<Value> {
    let kind = geojson
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            EsFluentError::InvalidArgument("GeoJSON object must have a string \"type\"".to_string())
        })?;

    match kind {
        "Feature" => geojson.get("geometry").cloned().ok_or_else(|| {
            EsFluentError::InvalidArgument("GeoJSON Feature has no \"geometry\"".to_string())
        }),
        "FeatureCollection" => {
            let features = geojson
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    EsFluentError::InvalidArgument(
                        "GeoJSON FeatureCollection has no \"features\" array".to_string(),
                    )
                })?;
            let geometries = features
                .iter()
                .map(|feature| {
                    feature.get("geometry").cloned().ok_or_else(|| {
                        EsFluentError::InvalidArgument(
                            "GeoJSON Feature has no \"geometry\"".to_string(),
                        )
                    })
                })
                .collect::<Result<Vec<Value>>>()?;
            Ok(json!({
                "type": "GeometryCollection",
                "geometries": geometries,
            }))
        }
        _ => Ok(geojson.clone()),
    }
}

/// Matches documents whose shape field intersects the given GeoJSON
/// geometry
#[derive(Clone, Debug, PartialEq)]
pub struct GeoJson {
    pub field: String,
    /// Normalized geometry, prepared at construction
    pub shape: Value,
}

impl GeoJson {
    /// Create a geometry clause; the GeoJSON is normalized immediately and
    /// malformed input fails with `InvalidArgument`
    pub fn new(field: impl Into<String>, geojson: &Value) -> Result<Self> {
        Ok(Self {
            field: field.into(),
            shape: prepare_geojson(geojson)?,
        })
    }

    pub fn to_query(&self) -> Value {
        keyed(
            "geo_shape",
            keyed(&self.field, json!({"shape": self.shape})),
        )
    }
}

/// Matches against a shape previously indexed in the cluster
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedShape {
    /// Field to match against the target shape
    pub field: String,
    /// Id of the indexed shape within the index
    pub shape_id: String,
    /// Name of the index containing the shape
    pub index: String,
    /// Document type within the index
    pub doc_type: String,
    /// Location of the geometry field within the indexed document
    pub path: String,
}

impl IndexedShape {
    pub fn new(
        field: impl Into<String>,
        shape_id: impl Into<String>,
        index: impl Into<String>,
        doc_type: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            shape_id: shape_id.into(),
            index: index.into(),
            doc_type: doc_type.into(),
            path: path.into(),
        }
    }

    pub fn to_query(&self) -> Value {
        keyed(
            "geo_shape",
            keyed(
                &self.field,
                json!({
                    "indexed_shape": {
                        "index": self.index,
                        "type": self.doc_type,
                        "id": self.shape_id,
                        "path": self.path,
                    }
                }),
            ),
        )
    }
}
