use std::collections::BTreeMap;

use foundation::ids::LocationId;

use crate::cluster::{ClusterHandle, ClusterIndex};

/// Pulse animation timing. One repetition grows the target then shrinks it
/// back; the whole animation is bounded and computed from elapsed time, so
/// cancelling it leaves nothing pending.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PulseConfig {
    pub repeats: u32,
    pub grow_ms: u64,
    pub shrink_ms: u64,
    pub peak_scale: f64,
    /// Stacking offset applied while the pulse runs, so the target renders
    /// above its neighbors.
    pub z_offset: i32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            repeats: 3,
            grow_ms: 300,
            shrink_ms: 300,
            peak_scale: 1.5,
            z_offset: 1000,
        }
    }
}

impl PulseConfig {
    pub fn total_ms(&self) -> u64 {
        self.repeats as u64 * (self.grow_ms + self.shrink_ms)
    }
}

/// What the pulse is visually attached to: the entity's own marker, or the
/// cluster currently absorbing it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PulseTarget {
    Marker(LocationId),
    Cluster(ClusterHandle),
}

/// Transient transform the host applies to the pulse target.
///
/// Absence of an fx (`None` from [`MarkerRegistry::fx_at`]) means the base
/// state: scale 1.0, no stacking offset. Clearing a highlight therefore
/// restores the pre-animation transform and z-order exactly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerFx {
    pub scale: f64,
    pub z_offset: i32,
}

#[derive(Debug, Clone, PartialEq)]
struct ActivePulse {
    id: LocationId,
    target: PulseTarget,
    started_ms: u64,
    config: PulseConfig,
}

impl ActivePulse {
    fn scale_at(&self, now_ms: u64) -> Option<f64> {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        if elapsed >= self.config.total_ms() {
            return None;
        }
        let cycle = self.config.grow_ms + self.config.shrink_ms;
        let in_cycle = elapsed % cycle;
        let span = self.config.peak_scale - 1.0;
        let scale = if in_cycle < self.config.grow_ms {
            1.0 + span * (in_cycle as f64 / self.config.grow_ms as f64)
        } else {
            let t = (in_cycle - self.config.grow_ms) as f64 / self.config.shrink_ms as f64;
            self.config.peak_scale - span * t
        };
        Some(scale)
    }
}

/// Registry of marker handles by entity id, plus the single active pulse.
///
/// `M` is the host's marker object; the registry never looks inside it.
/// Hover is exclusive in the list UI, so at most one pulse runs at a time:
/// a new highlight implicitly clears the previous one (latest request
/// wins), and highlighting an unregistered id is a no-op.
#[derive(Debug, Default)]
pub struct MarkerRegistry<M> {
    markers: BTreeMap<LocationId, M>,
    pulse: Option<ActivePulse>,
}

impl<M> MarkerRegistry<M> {
    pub fn new() -> Self {
        Self {
            markers: BTreeMap::new(),
            pulse: None,
        }
    }

    pub fn register(&mut self, id: LocationId, marker: M) {
        self.markers.insert(id, marker);
    }

    pub fn get(&self, id: LocationId) -> Option<&M> {
        self.markers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Drops all markers and any running pulse (full entity-set
    /// replacement or map teardown).
    pub fn clear(&mut self) {
        self.markers.clear();
        self.pulse = None;
    }

    /// Starts a pulse for `id`, aimed at its own marker or at the cluster
    /// currently containing it.
    pub fn highlight(&mut self, id: LocationId, now_ms: u64, index: &ClusterIndex, config: PulseConfig) {
        if !self.markers.contains_key(&id) {
            return;
        }
        let target = match index.containing_cluster(id) {
            Some(handle) => PulseTarget::Cluster(handle),
            None => PulseTarget::Marker(id),
        };
        // Replacing the option cancels every pending step of the old pulse.
        self.pulse = Some(ActivePulse {
            id,
            target,
            started_ms: now_ms,
            config,
        });
    }

    /// Cancels the pulse for `id`, restoring the base transform (no fx).
    pub fn clear_highlight(&mut self, id: LocationId) {
        if self.pulse.as_ref().is_some_and(|p| p.id == id) {
            self.pulse = None;
        }
    }

    /// Current pulse transform, or `None` when nothing should be overridden.
    ///
    /// A finished pulse reports `None` without needing an explicit clear.
    pub fn fx_at(&self, now_ms: u64) -> Option<(PulseTarget, MarkerFx)> {
        let pulse = self.pulse.as_ref()?;
        let scale = pulse.scale_at(now_ms)?;
        Some((
            pulse.target,
            MarkerFx {
                scale,
                z_offset: pulse.config.z_offset,
            },
        ))
    }
}
