//! Headless demo: drives the map core along a scripted camera path against
//! a simulated cluster host, logging what the list and the geometry layers
//! would show at each step.

mod sim;

use foundation::geo::LatLng;
use layers::controller::{MapConfig, MapController};
use runtime::event_bus::EventBus;
use runtime::events::MapEvent;
use streaming::provider::{FixtureProvider, LocationProvider};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::sim::{SimHost, viewport_bounds};

const LOCATIONS_FIXTURE: &str = include_str!("../assets/locations.json");

const VIEWPORT_W: f64 = 1024.0;
const VIEWPORT_H: f64 = 768.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let provider = FixtureProvider::new(LOCATIONS_FIXTURE);
    let entities = match provider.fetch() {
        Ok(entities) => entities,
        Err(e) => {
            // A failed fetch surfaces inline; the map still runs, empty.
            warn!(error = %e, "locations fetch failed, rendering zero entities");
            Vec::new()
        }
    };
    info!(count = entities.len(), "locations loaded");

    let mut host = SimHost::new();
    let mut controller: MapController<()> = MapController::new(MapConfig::default());
    controller.load(entities);

    // External layer construction: one marker per mappable entity, one
    // geometry layer per entity keyed by id (SimHost keys both off the
    // marker set).
    let mappable: Vec<_> = controller
        .store()
        .mappable()
        .filter_map(|e| e.coords.map(|at| (e.id, at)))
        .collect();
    for (id, at) in mappable {
        host.add_marker(id, at);
        controller.register_marker(id, ());
    }

    let wellington = LatLng::new(-41.2905, 174.7820);
    let script = [
        ("country overview", wellington, 6.0),
        ("approaching the city", wellington, 11.0),
        ("city level", wellington, 13.0),
        ("suburb detail", LatLng::new(-41.2850, 174.7280), 15.0),
    ];

    let mut bus = EventBus::new();
    let mut now_ms: u64 = 0;
    for (label, center, zoom) in script {
        now_ms += 1000;
        host.set_zoom(zoom);
        let bounds = viewport_bounds(center, zoom, VIEWPORT_W, VIEWPORT_H);
        bus.emit(MapEvent::MoveEnd { bounds, zoom });
        for event in bus.drain() {
            controller.handle_event(event, now_ms, &mut host);
        }

        // Let the cluster layer settle, then fire the deferred rebuild.
        now_ms += controller.config().settle_delay_ms;
        controller.tick(now_ms, &mut host);

        let view = controller.page_view();
        info!(
            step = label,
            zoom,
            visible = view.visible_count,
            total = view.total_count,
            page = view.current_page,
            pages = view.total_pages,
            geometries_shown = host.visible_geometry_count(),
            "camera moved"
        );
        for entity in &view.page_items {
            info!(id = %entity.id, name = %entity.name, "  list item");
        }
    }

    // Page through whatever the last viewport shows.
    controller.next_page();
    let view = controller.page_view();
    info!(page = view.current_page, pages = view.total_pages, "next page");

    // Hover the first visible entity: its marker (or containing cluster)
    // pulses, then the hover ends and the transform resets.
    if let Some(first) = controller.page_view().page_items.first().map(|e| e.id) {
        controller.hover_enter(first, now_ms);
        if let Some((target, fx)) = controller.marker_fx(now_ms + 150) {
            info!(?target, scale = fx.scale, "pulse mid-grow");
        }
        controller.hover_leave(first);
        if controller.marker_fx(now_ms + 150).is_none() {
            info!(id = %first, "hover cleared, marker restored");
        }
    }
}
