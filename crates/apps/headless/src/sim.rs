//! Simulated map host: a greedy pixel-radius clusterer over Web Mercator
//! projections, plus a style sink that records what each geometry layer
//! would currently look like.

use std::collections::BTreeMap;

use foundation::geo::{LatLng, LatLngBounds};
use foundation::ids::LocationId;
use layers::host::{ClusterScene, GeometryStyleSink, RenderedCluster};
use layers::symbology::LayerStyle;

const TILE_SIZE: f64 = 256.0;
/// Screen-pixel cluster radius, matching the reference cluster layer.
const CLUSTER_RADIUS_PX: f64 = 50.0;

fn project(point: LatLng, zoom: f64) -> (f64, f64) {
    let world = TILE_SIZE * 2f64.powf(zoom);
    let x = (point.lng + 180.0) / 360.0 * world;
    let lat_rad = point.lat.to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * world;
    (x, y)
}

fn unproject(x: f64, y: f64, zoom: f64) -> LatLng {
    let world = TILE_SIZE * 2f64.powf(zoom);
    let lng = x / world * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / world);
    let lat = (0.5 * (n.exp() - (-n).exp())).atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Geographic bounds of a `width_px` x `height_px` viewport centered on
/// `center` at `zoom`.
pub fn viewport_bounds(center: LatLng, zoom: f64, width_px: f64, height_px: f64) -> LatLngBounds {
    let (cx, cy) = project(center, zoom);
    let south_west = unproject(cx - width_px / 2.0, cy + height_px / 2.0, zoom);
    let north_east = unproject(cx + width_px / 2.0, cy - height_px / 2.0, zoom);
    LatLngBounds::new(south_west, north_east)
}

/// Stand-in for the mapping library: owns marker positions and geometry
/// layer styles, and reports greedy distance clusters the way a
/// screen-pixel-radius cluster layer would.
#[derive(Debug, Default)]
pub struct SimHost {
    markers: BTreeMap<LocationId, LatLng>,
    styles: BTreeMap<LocationId, LayerStyle>,
    zoom: f64,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_marker(&mut self, id: LocationId, at: LatLng) {
        self.markers.insert(id, at);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn visible_geometry_count(&self) -> usize {
        self.styles.values().filter(|s| s.is_visible()).count()
    }
}

impl ClusterScene for SimHost {
    fn rendered_clusters(&self) -> Vec<RenderedCluster> {
        // Greedy: each marker joins the first cluster seed within radius,
        // in id order. Single-member groups are plain markers, not
        // clusters.
        let mut seeds: Vec<((f64, f64), Vec<LocationId>)> = Vec::new();
        for (&id, &at) in &self.markers {
            let p = project(at, self.zoom);
            match seeds.iter_mut().find(|(seed, _)| {
                let dx = seed.0 - p.0;
                let dy = seed.1 - p.1;
                (dx * dx + dy * dy).sqrt() <= CLUSTER_RADIUS_PX
            }) {
                Some((_, members)) => members.push(id),
                None => seeds.push((p, vec![id])),
            }
        }
        seeds
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(_, members)| RenderedCluster { members })
            .collect()
    }
}

impl GeometryStyleSink for SimHost {
    fn apply_style(&mut self, id: LocationId, style: &LayerStyle) -> bool {
        if !self.markers.contains_key(&id) {
            return false;
        }
        self.styles.insert(id, *style);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{SimHost, viewport_bounds};
    use foundation::geo::LatLng;
    use foundation::ids::LocationId;
    use layers::host::ClusterScene;

    #[test]
    fn nearby_markers_cluster_at_low_zoom_and_split_at_high_zoom() {
        let mut host = SimHost::new();
        host.add_marker(LocationId::new(1), LatLng::new(-41.29, 174.77));
        host.add_marker(LocationId::new(2), LatLng::new(-41.30, 174.78));

        host.set_zoom(6.0);
        assert_eq!(host.rendered_clusters().len(), 1);

        host.set_zoom(15.0);
        assert!(host.rendered_clusters().is_empty());
    }

    #[test]
    fn viewport_bounds_contain_the_center() {
        let center = LatLng::new(-41.2865, 174.7762);
        let bounds = viewport_bounds(center, 13.0, 1024.0, 768.0);
        assert!(bounds.contains(center));
        assert!(bounds.south_west.lat < center.lat);
        assert!(bounds.north_east.lat > center.lat);
    }
}
