//! GeoJSON street-network source.
//!
//! One feature per edge: a `street_edge_id` property and a LineString (or
//! MultiLineString) geometry. MultiLineString coordinates are flattened into
//! a single vertex sequence, matching how the upstream export behaves.

use std::fs;
use std::path::Path;

use geo::{Coord, LineString};
use geojson::{Feature, GeoJson, Value};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Edge, EdgeId};

/// Load all edges from a GeoJSON FeatureCollection file.
pub fn load_street_network(path: &Path) -> Result<Vec<Edge>> {
    info!("Loading street network from {}", path.display());

    let contents = fs::read_to_string(path)?;
    let gj: GeoJson = contents.parse()?;
    let GeoJson::FeatureCollection(collection) = gj else {
        return Err(Error::Format(format!(
            "{}: expected a GeoJSON FeatureCollection",
            path.display()
        )));
    };

    let mut edges = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        edges.push(parse_edge(feature)?);
    }

    info!("Loaded {} edges", edges.len());
    Ok(edges)
}

fn parse_edge(feature: Feature) -> Result<Edge> {
    let id = edge_id(&feature)
        .ok_or_else(|| Error::Format("feature missing a street_edge_id property".to_string()))?;

    let geometry = feature
        .geometry
        .ok_or_else(|| Error::Format(format!("edge {id} has no geometry")))?;

    let coords: Vec<Coord<f64>> = match geometry.value {
        Value::LineString { coordinates } => {
            coordinates.iter().map(position_to_coord).collect()
        }
        Value::MultiLineString { coordinates } => coordinates
            .iter()
            .flatten()
            .map(position_to_coord)
            .collect(),
        other => {
            return Err(Error::Format(format!(
                "edge {id} has unsupported geometry type {}",
                other.type_name()
            )));
        }
    };

    if coords.len() < 2 {
        return Err(Error::Format(format!(
            "edge {id} has fewer than two vertices"
        )));
    }

    Ok(Edge {
        id,
        geometry: LineString::new(coords),
    })
}

/// The id property is numeric in some exports and a string in others.
fn edge_id(feature: &Feature) -> Option<EdgeId> {
    let value = feature.property("street_edge_id")?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn position_to_coord(position: &geojson::Position) -> Coord<f64> {
    Coord {
        x: position[0],
        y: position[1],
    }
}
