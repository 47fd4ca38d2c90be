use foundation::geo::LatLngBounds;

/// Events the map host forwards into the core.
///
/// Movement events carry the post-movement view so the core never has to
/// query the host back; cluster lifecycle events carry nothing because the
/// core re-reads the rendered cluster tree on rebuild.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MapEvent {
    /// Pan finished (fires after zoom changes too, per the host library).
    MoveEnd { bounds: LatLngBounds, zoom: f64 },
    /// Zoom animation finished.
    ZoomEnd { bounds: LatLngBounds, zoom: f64 },
    /// Cluster layer finished its add/remove/merge animation.
    ClusterAnimationEnd,
    /// A cluster fanned its children out for inspection.
    Spiderfied,
    /// A spiderfied cluster collapsed back.
    Unspiderfied,
}

impl MapEvent {
    /// True for events that change which markers fall inside the viewport.
    pub fn moves_viewport(&self) -> bool {
        matches!(self, MapEvent::MoveEnd { .. } | MapEvent::ZoomEnd { .. })
    }
}
