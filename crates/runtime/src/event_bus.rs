use crate::events::MapEvent;

/// Single-consumer event queue between the map host and the core.
///
/// The host pushes events as they happen; the owning loop drains them in
/// arrival order. Everything runs on one thread, so this is a plain Vec.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<MapEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: MapEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[MapEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::events::MapEvent;

    #[test]
    fn records_events_in_arrival_order() {
        let mut bus = EventBus::new();
        bus.emit(MapEvent::ClusterAnimationEnd);
        bus.emit(MapEvent::Spiderfied);
        assert_eq!(
            bus.events(),
            &[MapEvent::ClusterAnimationEnd, MapEvent::Spiderfied]
        );
    }

    #[test]
    fn drain_clears_the_queue() {
        let mut bus = EventBus::new();
        bus.emit(MapEvent::Unspiderfied);
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
