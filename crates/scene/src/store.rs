use std::collections::BTreeMap;

use foundation::ids::LocationId;

use crate::entity::Entity;

/// Owner of the full fetched entity set.
///
/// Populated by replace-all on each fetch; there is no incremental diffing.
/// Everything downstream (viewport subset, pages, cluster membership,
/// geometry visibility) is recomputed from this store per triggering event.
///
/// Ordering contract:
/// - `entities()` preserves the order the source served, which is the order
///   the list views paginate in.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    by_id: BTreeMap<LocationId, usize>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full entity set. Later duplicates of an id win the
    /// id lookup but every record stays in source order.
    pub fn replace_all(&mut self, entities: Vec<Entity>) {
        self.by_id = entities
            .iter()
            .enumerate()
            .map(|(idx, e)| (e.id, idx))
            .collect();
        self.entities = entities;
    }

    pub fn get(&self, id: LocationId) -> Option<&Entity> {
        self.by_id.get(&id).map(|&idx| &self.entities[idx])
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities eligible for map rendering (those with coordinates).
    pub fn mappable(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.coords.is_some())
    }
}
