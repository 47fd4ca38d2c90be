//! Wire format for the locations endpoint.
//!
//! The endpoint serves either an envelope `{ "success": bool, "data": [...] }`
//! or a bare array of records. Geometries are GeoJSON objects with
//! coordinates in `[lng, lat]` order. Records are decoded into serde DTOs
//! here and converted to `scene::Entity`; malformed individual records are
//! skipped with a warning so one bad row never blanks the whole set.

use foundation::geo::LatLng;
use foundation::ids::LocationId;
use scene::entity::{Category, Entity, Geometry};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadError {
    /// The body was not valid JSON or matched neither payload shape.
    Json(String),
    /// The envelope reported `success: false`.
    Endpoint(String),
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadError::Json(msg) => write!(f, "locations payload malformed: {msg}"),
            PayloadError::Endpoint(msg) => write!(f, "locations endpoint error: {msg}"),
        }
    }
}

impl std::error::Error for PayloadError {}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocationsPayload {
    Envelope {
        success: bool,
        #[serde(default)]
        data: Vec<LocationRecord>,
        #[serde(default)]
        error: Option<String>,
    },
    Bare(Vec<LocationRecord>),
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    id: u64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    geometry: Option<GeoJsonGeometry>,
    // Older rows say `type`, newer ones `location_type`.
    #[serde(rename = "type", alias = "location_type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJsonGeometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

fn lat_lng(pos: [f64; 2]) -> LatLng {
    // GeoJSON positions are [lng, lat].
    LatLng::new(pos[1], pos[0])
}

impl GeoJsonGeometry {
    fn into_geometry(self) -> Geometry {
        match self {
            GeoJsonGeometry::Point { coordinates } => Geometry::Point(lat_lng(coordinates)),
            GeoJsonGeometry::LineString { coordinates } => {
                Geometry::LineString(coordinates.into_iter().map(lat_lng).collect())
            }
            GeoJsonGeometry::Polygon { coordinates } => Geometry::Polygon(
                coordinates
                    .into_iter()
                    .map(|ring| ring.into_iter().map(lat_lng).collect())
                    .collect(),
            ),
            GeoJsonGeometry::MultiPolygon { coordinates } => Geometry::MultiPolygon(
                coordinates
                    .into_iter()
                    .map(|poly| {
                        poly.into_iter()
                            .map(|ring| ring.into_iter().map(lat_lng).collect())
                            .collect()
                    })
                    .collect(),
            ),
        }
    }
}

impl LocationRecord {
    fn into_entity(self) -> Option<Entity> {
        let id = LocationId::new(self.id);

        let coords = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            (None, None) => None,
            _ => {
                warn!(%id, name = %self.name, "record has only one of lat/lng, treating as no coordinates");
                None
            }
        };

        let geometry = match (self.geometry, coords) {
            (Some(g), _) => g.into_geometry(),
            (None, Some(p)) => Geometry::Point(p),
            (None, None) => {
                warn!(%id, name = %self.name, "record has neither geometry nor coordinates, skipping");
                return None;
            }
        };

        if coords.is_none() {
            warn!(%id, name = %self.name, "record has no center coordinates, excluded from map rendering");
        }

        let category = self
            .kind
            .as_deref()
            .map(Category::from_wire)
            .unwrap_or(Category::Other);

        Some(Entity {
            id,
            name: self.name,
            description: self.description,
            coords,
            geometry,
            category,
        })
    }
}

/// Decodes a locations response body into entities.
pub fn parse_locations(body: &str) -> Result<Vec<Entity>, PayloadError> {
    let payload: LocationsPayload =
        serde_json::from_str(body).map_err(|e| PayloadError::Json(e.to_string()))?;

    let records = match payload {
        LocationsPayload::Envelope {
            success: false,
            error,
            ..
        } => {
            return Err(PayloadError::Endpoint(
                error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        LocationsPayload::Envelope { data, .. } => data,
        LocationsPayload::Bare(records) => records,
    };

    Ok(records
        .into_iter()
        .filter_map(LocationRecord::into_entity)
        .collect())
}
