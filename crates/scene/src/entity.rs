use foundation::geo::LatLng;
use foundation::ids::LocationId;

/// Category of a point of interest; drives marker icon and geometry styling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    DogPark,
    Vet,
    Other,
}

impl Category {
    /// Parses the `type`/`location_type` strings the endpoint serves.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "dog_park" => Category::DogPark,
            "vet" => Category::Vet,
            _ => Category::Other,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPolygon,
}

/// Full extent of an entity: the shape rendered as its geometry layer,
/// distinct from the single representative point marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(LatLng),
    LineString(Vec<LatLng>),
    /// Outer ring first, then holes.
    Polygon(Vec<Vec<LatLng>>),
    MultiPolygon(Vec<Vec<Vec<LatLng>>>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }
}

/// A point of interest with an optional representative point and a full
/// geometry.
///
/// Invariant: `coords` is `Some` only when the source record carried both a
/// latitude and a longitude. Entities without coords are excluded from map
/// rendering and viewport filtering but may still appear in lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: LocationId,
    pub name: String,
    pub description: Option<String>,
    pub coords: Option<LatLng>,
    pub geometry: Geometry,
    pub category: Category,
}
