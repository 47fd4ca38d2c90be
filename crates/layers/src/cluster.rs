use std::collections::BTreeMap;

use foundation::handles::Handle;
use foundation::ids::LocationId;
use tracing::debug;

use crate::host::ClusterScene;

/// Opaque reference to a rendered cluster node.
///
/// Embeds the rebuild epoch: a handle from an earlier rebuild never compares
/// equal to one from the current tree, so stale handles cannot alias a new
/// cluster that happens to reuse the same slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClusterHandle(Handle);

impl ClusterHandle {
    fn new(index: u32, epoch: u32) -> Self {
        Self(Handle::new(index, epoch))
    }

    pub fn index(&self) -> u32 {
        self.0.index()
    }

    pub fn epoch(&self) -> u32 {
        self.0.generation()
    }
}

/// Whether an entity's marker is independently visible or absorbed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerState {
    Unclustered,
    InCluster(ClusterHandle),
}

/// Live mapping from entity id to the cluster currently containing its
/// marker.
///
/// Rebuilt, never patched: each rebuild reads the host's rendered cluster
/// tree in one pass and replaces the whole membership table. Any id not
/// reported inside a cluster is `Unclustered` — including every id when no
/// clusters are rendered at all (cluster layer not mounted is not an
/// error).
///
/// Rebuilds must only run after the cluster layer has stabilized; a read
/// mid-animation sees a half-merged tree. The controller enforces that
/// through the settle timer and the cluster lifecycle events.
#[derive(Debug, Default)]
pub struct ClusterIndex {
    epoch: u32,
    membership: BTreeMap<LocationId, ClusterHandle>,
}

impl ClusterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Replaces the membership table from the host's rendered cluster tree.
    ///
    /// Idempotent over the induced partition: two rebuilds against the same
    /// tree group the same ids together (handles differ by epoch, by
    /// design).
    pub fn rebuild(&mut self, scene: &impl ClusterScene) {
        self.epoch = self.epoch.wrapping_add(1);
        self.membership.clear();

        let clusters = scene.rendered_clusters();
        for (index, cluster) in clusters.iter().enumerate() {
            let handle = ClusterHandle::new(index as u32, self.epoch);
            for &id in &cluster.members {
                self.membership.insert(id, handle);
            }
        }
        debug!(
            epoch = self.epoch,
            clusters = clusters.len(),
            clustered_markers = self.membership.len(),
            "cluster index rebuilt"
        );
    }

    pub fn state(&self, id: LocationId) -> MarkerState {
        match self.membership.get(&id) {
            Some(&handle) => MarkerState::InCluster(handle),
            None => MarkerState::Unclustered,
        }
    }

    pub fn is_clustered(&self, id: LocationId) -> bool {
        self.membership.contains_key(&id)
    }

    pub fn containing_cluster(&self, id: LocationId) -> Option<ClusterHandle> {
        self.membership.get(&id).copied()
    }

    /// True while `handle` refers to the current rendered tree.
    pub fn is_current(&self, handle: ClusterHandle) -> bool {
        handle.epoch() == self.epoch
    }

    /// Ids grouped by containing cluster slot, for comparing rebuilds.
    pub fn partition(&self) -> BTreeMap<u32, Vec<LocationId>> {
        let mut groups: BTreeMap<u32, Vec<LocationId>> = BTreeMap::new();
        for (&id, handle) in &self.membership {
            groups.entry(handle.index()).or_default().push(id);
        }
        groups
    }
}
