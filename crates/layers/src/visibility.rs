use std::collections::BTreeMap;

use foundation::ids::LocationId;
use scene::entity::Category;
use tracing::debug;

use crate::cluster::{ClusterIndex, MarkerState};
use crate::host::GeometryStyleSink;
use crate::symbology::{LayerStyle, category_style};

/// Below this zoom every geometry layer is hidden regardless of cluster
/// state: the outlines are too small to read and fight the cluster icons.
pub const MIN_GEOMETRY_ZOOM: f64 = 12.0;

/// Derived render state for one entity's geometry layer. Never persisted.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VisibleGeometryState {
    pub shown: bool,
    pub style: LayerStyle,
}

/// Keeps every tracked entity's geometry layer in lockstep with the cluster
/// index.
///
/// Policy per sync:
/// - `zoom < min_zoom` hides everything;
/// - otherwise a geometry is shown iff its marker is `Unclustered`;
/// - shown applies the category style, hidden fades the same style to zero
///   opacity so the host keeps the layer mounted.
///
/// Every sync is a full recompute over all tracked entities. A tracked id
/// with no layer on the host is skipped and the sweep continues; one
/// missing layer must not blank the rest of the view.
#[derive(Debug, Default)]
pub struct GeometryVisibility {
    tracked: BTreeMap<LocationId, Category>,
    states: BTreeMap<LocationId, VisibleGeometryState>,
}

impl GeometryVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity whose geometry layer the host renders.
    pub fn track(&mut self, id: LocationId, category: Category) {
        self.tracked.insert(id, category);
    }

    /// Drops all tracked entities (full entity-set replacement).
    pub fn clear(&mut self) {
        self.tracked.clear();
        self.states.clear();
    }

    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    /// Recomputes and applies visibility for every tracked entity.
    pub fn sync(
        &mut self,
        index: &ClusterIndex,
        zoom: f64,
        min_zoom: f64,
        sink: &mut impl GeometryStyleSink,
    ) {
        let zoomed_in = zoom >= min_zoom;
        let mut missing = 0usize;

        for (&id, &category) in &self.tracked {
            let shown = zoomed_in && index.state(id) == MarkerState::Unclustered;
            let style = if shown {
                category_style(category)
            } else {
                category_style(category).faded()
            };

            if !sink.apply_style(id, &style) {
                missing += 1;
            }
            self.states.insert(id, VisibleGeometryState { shown, style });
        }

        if missing > 0 {
            debug!(missing, "geometry layers absent during visibility sync");
        }
    }

    pub fn shown(&self, id: LocationId) -> bool {
        self.states.get(&id).is_some_and(|s| s.shown)
    }

    pub fn state(&self, id: LocationId) -> Option<VisibleGeometryState> {
        self.states.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{GeometryVisibility, MIN_GEOMETRY_ZOOM};
    use crate::cluster::ClusterIndex;
    use crate::host::{ClusterScene, GeometryStyleSink, RenderedCluster};
    use crate::symbology::{DOG_PARK_STYLE, LayerStyle, VET_STYLE};
    use foundation::ids::LocationId;
    use scene::entity::Category;
    use std::collections::BTreeMap;

    struct FixedScene(Vec<RenderedCluster>);

    impl ClusterScene for FixedScene {
        fn rendered_clusters(&self) -> Vec<RenderedCluster> {
            self.0.clone()
        }
    }

    /// Records applied styles; ids not in `layers` report as missing.
    struct RecordingSink {
        layers: Vec<LocationId>,
        applied: BTreeMap<LocationId, LayerStyle>,
    }

    impl RecordingSink {
        fn with_layers(ids: &[u64]) -> Self {
            Self {
                layers: ids.iter().map(|&n| LocationId::new(n)).collect(),
                applied: BTreeMap::new(),
            }
        }
    }

    impl GeometryStyleSink for RecordingSink {
        fn apply_style(&mut self, id: LocationId, style: &LayerStyle) -> bool {
            if !self.layers.contains(&id) {
                return false;
            }
            self.applied.insert(id, *style);
            true
        }
    }

    fn tracked(ids: &[(u64, Category)]) -> GeometryVisibility {
        let mut v = GeometryVisibility::new();
        for &(id, category) in ids {
            v.track(LocationId::new(id), category);
        }
        v
    }

    #[test]
    fn below_threshold_hides_everything_regardless_of_clusters() {
        let mut vis = tracked(&[(1, Category::DogPark), (2, Category::Vet)]);
        let index = ClusterIndex::new(); // everything unclustered

        let mut sink = RecordingSink::with_layers(&[1, 2]);
        vis.sync(&index, MIN_GEOMETRY_ZOOM - 1.0, MIN_GEOMETRY_ZOOM, &mut sink);

        for id in [1, 2] {
            let id = LocationId::new(id);
            assert!(!vis.shown(id));
            let applied = sink.applied.get(&id).unwrap();
            assert_eq!(applied.opacity, 0.0);
            assert_eq!(applied.fill_opacity, 0.0);
        }
    }

    #[test]
    fn shown_iff_unclustered_at_high_zoom() {
        let mut vis = tracked(&[(1, Category::DogPark), (2, Category::DogPark)]);
        let mut index = ClusterIndex::new();
        index.rebuild(&FixedScene(vec![RenderedCluster {
            members: vec![LocationId::new(2)],
        }]));

        let mut sink = RecordingSink::with_layers(&[1, 2]);
        vis.sync(&index, 14.0, MIN_GEOMETRY_ZOOM, &mut sink);

        assert!(vis.shown(LocationId::new(1)));
        assert!(!vis.shown(LocationId::new(2)));
        assert_eq!(
            sink.applied.get(&LocationId::new(1)),
            Some(&DOG_PARK_STYLE)
        );
    }

    #[test]
    fn shown_style_follows_the_category() {
        let mut vis = tracked(&[(1, Category::Vet)]);
        let index = ClusterIndex::new();
        let mut sink = RecordingSink::with_layers(&[1]);
        vis.sync(&index, 13.0, MIN_GEOMETRY_ZOOM, &mut sink);
        assert_eq!(sink.applied.get(&LocationId::new(1)), Some(&VET_STYLE));
    }

    #[test]
    fn missing_layer_is_skipped_and_the_rest_still_sync() {
        let mut vis = tracked(&[(1, Category::DogPark), (2, Category::DogPark)]);
        let index = ClusterIndex::new();
        // Only entity 2 has a layer on the host.
        let mut sink = RecordingSink::with_layers(&[2]);
        vis.sync(&index, 14.0, MIN_GEOMETRY_ZOOM, &mut sink);
        assert!(sink.applied.contains_key(&LocationId::new(2)));
    }

    #[test]
    fn invariant_shown_iff_zoomed_and_unclustered() {
        let all: Vec<(u64, Category)> = (1..=6).map(|i| (i, Category::DogPark)).collect();
        let mut vis = tracked(&all);
        let mut index = ClusterIndex::new();
        index.rebuild(&FixedScene(vec![RenderedCluster {
            members: vec![LocationId::new(3), LocationId::new(4)],
        }]));

        for zoom in [5.0, 11.9, 12.0, 16.0] {
            let mut sink = RecordingSink::with_layers(&[1, 2, 3, 4, 5, 6]);
            vis.sync(&index, zoom, MIN_GEOMETRY_ZOOM, &mut sink);
            for i in 1..=6u64 {
                let id = LocationId::new(i);
                let expected = zoom >= MIN_GEOMETRY_ZOOM && !index.is_clustered(id);
                assert_eq!(vis.shown(id), expected, "zoom {zoom} id {i}");
            }
        }
    }
}
