use foundation::ids::LocationId;

use crate::symbology::LayerStyle;

/// One currently rendered cluster node, as reported by the mapping library.
///
/// `members` lists the ids of every marker the node recursively contains;
/// hosts flatten nested cluster trees before reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCluster {
    pub members: Vec<LocationId>,
}

/// Read access to the host's rendered cluster tree.
///
/// The snapshot is only meaningful once the cluster layer has stabilized
/// (its animations finished); the controller defers reads accordingly.
/// A host whose cluster layer is not mounted returns an empty Vec.
pub trait ClusterScene {
    fn rendered_clusters(&self) -> Vec<RenderedCluster>;
}

/// Write access to per-entity geometry layer styling on the host.
pub trait GeometryStyleSink {
    /// Applies `style` to the geometry layer registered for `id`.
    ///
    /// Returns `false` when no layer is registered for `id`; callers skip
    /// and continue.
    fn apply_style(&mut self, id: LocationId, style: &LayerStyle) -> bool;
}

/// Everything the controller needs from the mapping host.
pub trait MapHost: ClusterScene + GeometryStyleSink {}

impl<T: ClusterScene + GeometryStyleSink> MapHost for T {}
