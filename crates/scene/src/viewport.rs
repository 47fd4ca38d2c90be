use foundation::geo::LatLngBounds;
use foundation::ids::LocationId;

use crate::entity::Entity;

/// Selects the entities whose representative point lies inside `bounds`.
///
/// Pure and deterministic: no side effects, and output order equals input
/// order. Entities without coordinates are excluded. Edge containment is
/// inclusive (see `LatLngBounds::contains`).
///
/// Callers recompute this on every move/zoom end and once after the initial
/// load; the result feeds the paginated list.
pub fn filter<'a>(entities: &'a [Entity], bounds: LatLngBounds) -> Vec<&'a Entity> {
    entities
        .iter()
        .filter(|e| e.coords.is_some_and(|p| bounds.contains(p)))
        .collect()
}

/// Id-only variant of [`filter`], for callers that key downstream state by id.
pub fn filter_ids(entities: &[Entity], bounds: LatLngBounds) -> Vec<LocationId> {
    filter(entities, bounds).into_iter().map(|e| e.id).collect()
}
