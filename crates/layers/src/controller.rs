use foundation::geo::LatLngBounds;
use foundation::ids::LocationId;
use runtime::events::MapEvent;
use runtime::timer::SettleTimer;
use scene::entity::Entity;
use scene::list::ListState;
use scene::pager::paginate;
use scene::store::EntityStore;
use scene::viewport;
use tracing::{debug, warn};

use crate::cluster::ClusterIndex;
use crate::host::MapHost;
use crate::markers::{MarkerFx, MarkerRegistry, PulseConfig, PulseTarget};
use crate::visibility::{GeometryVisibility, MIN_GEOMETRY_ZOOM};

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// List view page size.
    pub page_size: usize,
    /// Zoom below which geometry layers are hidden unconditionally.
    pub min_geometry_zoom: f64,
    /// Fallback delay before reading the cluster tree after move/zoom.
    /// Hosts that forward `ClusterAnimationEnd` rebuild immediately and
    /// never wait for this.
    pub settle_delay_ms: u64,
    pub pulse: PulseConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            page_size: 3,
            min_geometry_zoom: MIN_GEOMETRY_ZOOM,
            settle_delay_ms: 300,
            pulse: PulseConfig::default(),
        }
    }
}

/// What the external list UI renders: one page of the viewport-filtered
/// sequence plus the counts for the header.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub page_items: Vec<&'a Entity>,
    pub current_page: usize,
    pub total_pages: usize,
    pub visible_count: usize,
    pub total_count: usize,
}

/// Event-driven composition root: store → viewport filter → pager on one
/// side, cluster index → geometry visibility on the other, with the marker
/// registry bridging list hover to map highlight.
///
/// Single-threaded; every method takes an explicit `now_ms` where timing
/// matters, so behavior is reproducible in tests.
///
/// `M` is the host's marker object type, held but never inspected.
#[derive(Debug)]
pub struct MapController<M> {
    config: MapConfig,
    store: EntityStore,
    visible: Vec<LocationId>,
    list: ListState,
    clusters: ClusterIndex,
    visibility: GeometryVisibility,
    registry: MarkerRegistry<M>,
    settle: SettleTimer,
    view: Option<(LatLngBounds, f64)>,
}

impl<M> MapController<M> {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            store: EntityStore::new(),
            visible: Vec::new(),
            list: ListState::new(),
            clusters: ClusterIndex::new(),
            visibility: GeometryVisibility::new(),
            registry: MarkerRegistry::new(),
            settle: SettleTimer::new(),
            view: None,
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn clusters(&self) -> &ClusterIndex {
        &self.clusters
    }

    pub fn visibility(&self) -> &GeometryVisibility {
        &self.visibility
    }

    /// Replaces the full entity set (one fetch = one replace-all) and
    /// re-derives everything that hangs off it.
    pub fn load(&mut self, entities: Vec<Entity>) {
        self.registry.clear();
        self.visibility.clear();

        for e in &entities {
            match e.coords {
                Some(_) => self.visibility.track(e.id, e.category),
                None => warn!(id = %e.id, name = %e.name, "entity has no coordinates, not rendered on the map"),
            }
        }

        self.store.replace_all(entities);
        self.refilter();
    }

    /// Registers the host marker object created for `id`.
    pub fn register_marker(&mut self, id: LocationId, marker: M) {
        self.registry.register(id, marker);
    }

    pub fn marker(&self, id: LocationId) -> Option<&M> {
        self.registry.get(id)
    }

    /// Feeds one host event through the pipeline.
    pub fn handle_event(&mut self, event: MapEvent, now_ms: u64, host: &mut impl MapHost) {
        match event {
            MapEvent::MoveEnd { bounds, zoom } | MapEvent::ZoomEnd { bounds, zoom } => {
                self.view = Some((bounds, zoom));
                self.refilter();
                // The cluster layer is still animating; read it after it
                // settles rather than mid-transition.
                self.settle.arm(now_ms, self.config.settle_delay_ms);
                debug!(zoom, visible = self.visible.len(), "viewport changed");
            }
            MapEvent::ClusterAnimationEnd | MapEvent::Spiderfied | MapEvent::Unspiderfied => {
                self.settle.cancel();
                self.resync(host);
            }
        }
    }

    /// Advances the fallback settle timer. Call periodically (or once at
    /// `now + settle_delay_ms` after each movement event).
    pub fn tick(&mut self, now_ms: u64, host: &mut impl MapHost) {
        if self.settle.take_due(now_ms) {
            self.resync(host);
        }
    }

    /// The page the list UI should render right now.
    pub fn page_view(&self) -> PageView<'_> {
        let items: Vec<&Entity> = self
            .visible
            .iter()
            .filter_map(|&id| self.store.get(id))
            .collect();
        let paged = paginate(&items, self.config.page_size, self.list.page());
        PageView {
            page_items: paged.page_items.to_vec(),
            current_page: self.list.page(),
            total_pages: paged.total_pages,
            visible_count: items.len(),
            total_count: self.store.len(),
        }
    }

    pub fn next_page(&mut self) {
        let total = self.page_view().total_pages;
        self.list.next(total);
    }

    pub fn prev_page(&mut self) {
        self.list.prev();
    }

    /// List-item hover entered: pulse the entity's marker, or the cluster
    /// absorbing it.
    pub fn hover_enter(&mut self, id: LocationId, now_ms: u64) {
        self.registry
            .highlight(id, now_ms, &self.clusters, self.config.pulse);
    }

    /// List-item hover left: cancel the pulse and restore the base state.
    pub fn hover_leave(&mut self, id: LocationId) {
        self.registry.clear_highlight(id);
    }

    /// Transform the host should currently apply for the pulse, if any.
    pub fn marker_fx(&self, now_ms: u64) -> Option<(PulseTarget, MarkerFx)> {
        self.registry.fx_at(now_ms)
    }

    fn refilter(&mut self) {
        self.visible = match self.view {
            Some((bounds, _)) => viewport::filter_ids(self.store.entities(), bounds),
            None => Vec::new(),
        };
        // The filtered sequence changed; the old page may be out of range.
        self.list.reset();
    }

    fn resync(&mut self, host: &mut impl MapHost) {
        self.clusters.rebuild(host);
        let zoom = self.view.map(|(_, z)| z).unwrap_or(0.0);
        self.visibility
            .sync(&self.clusters, zoom, self.config.min_geometry_zoom, host);
    }
}

#[cfg(test)]
mod tests {
    use super::{MapConfig, MapController};
    use crate::host::{ClusterScene, GeometryStyleSink, RenderedCluster};
    use crate::symbology::LayerStyle;
    use foundation::geo::{LatLng, LatLngBounds};
    use foundation::ids::LocationId;
    use runtime::events::MapEvent;
    use scene::entity::{Category, Entity, Geometry};
    use std::collections::BTreeMap;

    /// Host double: scripted cluster tree, records the last style per layer.
    #[derive(Default)]
    struct FakeHost {
        clusters: Vec<RenderedCluster>,
        styles: BTreeMap<LocationId, LayerStyle>,
    }

    impl ClusterScene for FakeHost {
        fn rendered_clusters(&self) -> Vec<RenderedCluster> {
            self.clusters.clone()
        }
    }

    impl GeometryStyleSink for FakeHost {
        fn apply_style(&mut self, id: LocationId, style: &LayerStyle) -> bool {
            self.styles.insert(id, *style);
            true
        }
    }

    fn entity(id: u64, lat: f64, lng: f64) -> Entity {
        Entity {
            id: LocationId::new(id),
            name: format!("park {id}"),
            description: None,
            coords: Some(LatLng::new(lat, lng)),
            geometry: Geometry::Point(LatLng::new(lat, lng)),
            category: Category::DogPark,
        }
    }

    fn wellington() -> LatLngBounds {
        LatLngBounds::new(LatLng::new(-41.4, 174.6), LatLng::new(-41.1, 174.9))
    }

    fn controller_with_five() -> (MapController<()>, FakeHost) {
        let mut c = MapController::new(MapConfig::default());
        let entities: Vec<Entity> = (1..=5)
            .map(|i| entity(i, -41.3 + 0.01 * i as f64, 174.7 + 0.01 * i as f64))
            .collect();
        c.load(entities);
        for i in 1..=5 {
            c.register_marker(LocationId::new(i), ());
        }
        (c, FakeHost::default())
    }

    #[test]
    fn five_visible_entities_paginate_into_two_pages() {
        let (mut c, mut host) = controller_with_five();
        c.handle_event(
            MapEvent::MoveEnd {
                bounds: wellington(),
                zoom: 13.0,
            },
            0,
            &mut host,
        );

        let view = c.page_view();
        assert_eq!(view.page_items.len(), 3);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.visible_count, 5);
        assert_eq!(view.total_count, 5);

        c.next_page();
        let view = c.page_view();
        assert_eq!(view.current_page, 2);
        assert_eq!(view.page_items.len(), 2);

        c.next_page(); // clamped
        assert_eq!(c.page_view().current_page, 2);
    }

    #[test]
    fn shrinking_the_viewport_resets_to_page_one() {
        let (mut c, mut host) = controller_with_five();
        c.handle_event(
            MapEvent::MoveEnd {
                bounds: wellington(),
                zoom: 13.0,
            },
            0,
            &mut host,
        );
        c.next_page();
        assert_eq!(c.page_view().current_page, 2);

        // Pan so only entities 1-3 remain: one page total.
        let narrow = LatLngBounds::new(LatLng::new(-41.3, 174.7), LatLng::new(-41.265, 174.735));
        c.handle_event(
            MapEvent::MoveEnd {
                bounds: narrow,
                zoom: 13.0,
            },
            1000,
            &mut host,
        );
        let view = c.page_view();
        assert_eq!(view.current_page, 1);
        assert!(view.visible_count <= 3);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn cluster_rebuild_waits_for_the_settle_timer() {
        let (mut c, mut host) = controller_with_five();
        host.clusters = vec![RenderedCluster {
            members: vec![LocationId::new(1), LocationId::new(2)],
        }];
        c.handle_event(
            MapEvent::MoveEnd {
                bounds: wellington(),
                zoom: 13.0,
            },
            1000,
            &mut host,
        );
        // Not rebuilt yet: the cluster layer may still be animating.
        assert!(!c.clusters().is_clustered(LocationId::new(1)));

        c.tick(1100, &mut host);
        assert!(!c.clusters().is_clustered(LocationId::new(1)));

        c.tick(1300, &mut host);
        assert!(c.clusters().is_clustered(LocationId::new(1)));
        assert!(!c.visibility().shown(LocationId::new(1)));
        assert!(c.visibility().shown(LocationId::new(3)));
    }

    #[test]
    fn cluster_animation_end_resyncs_immediately() {
        let (mut c, mut host) = controller_with_five();
        c.handle_event(
            MapEvent::MoveEnd {
                bounds: wellington(),
                zoom: 13.0,
            },
            0,
            &mut host,
        );
        host.clusters = vec![RenderedCluster {
            members: vec![LocationId::new(4), LocationId::new(5)],
        }];
        c.handle_event(MapEvent::ClusterAnimationEnd, 50, &mut host);

        assert!(c.visibility().shown(LocationId::new(1)));
        assert!(!c.visibility().shown(LocationId::new(4)));

        // The pending settle rebuild was cancelled with it.
        host.clusters.clear();
        c.tick(10_000, &mut host);
        assert!(c.clusters().is_clustered(LocationId::new(4)));
    }

    #[test]
    fn zooming_below_threshold_hides_every_geometry() {
        let (mut c, mut host) = controller_with_five();
        c.handle_event(
            MapEvent::ZoomEnd {
                bounds: wellington(),
                zoom: 10.0,
            },
            0,
            &mut host,
        );
        c.handle_event(MapEvent::ClusterAnimationEnd, 10, &mut host);

        for i in 1..=5u64 {
            let id = LocationId::new(i);
            assert!(!c.visibility().shown(id));
            assert_eq!(host.styles.get(&id).unwrap().opacity, 0.0);
        }
    }

    #[test]
    fn hover_pulses_and_leave_restores() {
        let (mut c, mut host) = controller_with_five();
        c.handle_event(
            MapEvent::MoveEnd {
                bounds: wellington(),
                zoom: 13.0,
            },
            0,
            &mut host,
        );
        c.hover_enter(LocationId::new(2), 1000);
        assert!(c.marker_fx(1100).is_some());

        c.hover_leave(LocationId::new(2));
        assert!(c.marker_fx(1100).is_none());
    }

    #[test]
    fn fetch_failure_leaves_an_empty_map_but_a_working_pipeline() {
        let mut c: MapController<()> = MapController::new(MapConfig::default());
        let mut host = FakeHost::default();
        // No load() at all, as after a failed fetch.
        c.handle_event(
            MapEvent::MoveEnd {
                bounds: wellington(),
                zoom: 13.0,
            },
            0,
            &mut host,
        );
        let view = c.page_view();
        assert_eq!(view.visible_count, 0);
        assert_eq!(view.total_pages, 0);
        c.tick(300, &mut host); // rebuild over zero entities is fine
    }
}
