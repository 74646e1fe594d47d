//! Minimal GeoJSON `FeatureCollection` of building polygons.
//!
//! Only `Polygon` geometries are read (exterior ring). Other features are
//! returned as rejected records. Feature properties `building_id` and
//! `height` are optional.

use crate::building::RawBuilding;
use crate::error::{Result, ShadowError};
use crate::geom::footprint::Footprint;
use crate::io::{FootprintSink, FootprintSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    building_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// GeoJSON file used both as a footprint source and a sink.
#[derive(Debug, Clone)]
pub struct GeoJsonFile {
    pub path: PathBuf,
}

impl GeoJsonFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FootprintSource for GeoJsonFile {
    fn load(&self) -> Result<Vec<Result<RawBuilding>>> {
        let file = File::open(&self.path).map_err(|e| {
            ShadowError::data(format!("Failed to open file: {}: {e}", self.path.display()))
        })?;
        let reader = BufReader::new(file);
        let collection: FeatureCollection = serde_json::from_reader(reader).map_err(|e| {
            ShadowError::data(format!("Failed to parse GeoJSON: {}: {e}", self.path.display()))
        })?;
        let records = from_collection(collection)?;
        info!(
            "Loaded {} footprints from {} ({} rejected)",
            records.len(),
            self.path.display(),
            records.iter().filter(|r| r.is_err()).count()
        );
        Ok(records)
    }
}

impl FootprintSink for GeoJsonFile {
    fn save(&self, buildings: &[RawBuilding]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &to_collection(buildings))?;
        info!("Saved {} footprints to {}", buildings.len(), self.path.display());
        Ok(())
    }
}

/// Parses a GeoJSON string into one record per feature.
pub fn from_geojson_str(json: &str) -> Result<Vec<Result<RawBuilding>>> {
    let collection: FeatureCollection = serde_json::from_str(json)
        .map_err(|e| ShadowError::data(format!("Failed to parse GeoJSON: {e}")))?;
    from_collection(collection)
}

/// Serializes raw buildings into a GeoJSON string.
pub fn to_geojson_string(buildings: &[RawBuilding]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_collection(buildings))?)
}

fn from_collection(collection: FeatureCollection) -> Result<Vec<Result<RawBuilding>>> {
    if collection.kind != "FeatureCollection" {
        return Err(ShadowError::data(format!(
            "expected a FeatureCollection, got {}",
            collection.kind
        )));
    }

    Ok(collection
        .features
        .into_iter()
        .enumerate()
        .map(|(i, feature)| {
            from_feature(feature).map_err(|e| ShadowError::geometry(format!("feature {i}: {e}")))
        })
        .collect())
}

fn from_feature(feature: Feature) -> std::result::Result<RawBuilding, String> {
    let id = feature.properties.building_id.map(|v| match v {
        Value::String(s) => s,
        other => other.to_string(),
    });
    let label = id.as_deref().map(|id| format!(" (building {id})")).unwrap_or_default();

    let geometry = match feature.geometry {
        Some(g) if g.kind == "Polygon" => g,
        Some(g) => return Err(format!("unsupported geometry type {}{label}", g.kind)),
        None => return Err(format!("no geometry{label}")),
    };
    let ring = exterior_ring(&geometry.coordinates).map_err(|e| format!("{e}{label}"))?;
    let footprint = Footprint::new(ring).map_err(|e| format!("{e}{label}"))?;

    Ok(RawBuilding {
        id,
        footprint,
        height: feature.properties.height,
    })
}

fn exterior_ring(coordinates: &Value) -> std::result::Result<Vec<(f64, f64)>, String> {
    let exterior = coordinates
        .as_array()
        .and_then(|rings| rings.first())
        .and_then(|ring| ring.as_array())
        .ok_or_else(|| "polygon has no exterior ring".to_string())?;

    exterior
        .iter()
        .map(|pos| {
            let xy = pos.as_array().filter(|p| p.len() >= 2);
            match xy.map(|p| (p[0].as_f64(), p[1].as_f64())) {
                Some((Some(x), Some(y))) => Ok((x, y)),
                _ => Err(format!("invalid position: {pos}")),
            }
        })
        .collect()
}

fn to_collection(buildings: &[RawBuilding]) -> FeatureCollection {
    let features = buildings
        .iter()
        .map(|b| {
            let ring: Vec<[f64; 2]> = b.footprint.ring().iter().map(|&(x, y)| [x, y]).collect();
            Feature {
                kind: "Feature".to_string(),
                properties: Properties {
                    building_id: b.id.clone().map(Value::String),
                    height: b.height,
                },
                geometry: Some(Geometry {
                    kind: "Polygon".to_string(),
                    coordinates: serde_json::json!([ring]),
                }),
            }
        })
        .collect();

    FeatureCollection {
        kind: "FeatureCollection".to_string(),
        features,
    }
}
