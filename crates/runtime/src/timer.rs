/// One-shot deadline timer driven by an explicit millisecond clock.
///
/// Used to defer work (the cluster-index rebuild) until shortly after the
/// last qualifying event; re-arming pushes the deadline out. Time is always
/// passed in, never read from a wall clock, so callers stay deterministic.
#[derive(Debug, Default)]
pub struct SettleTimer {
    deadline_ms: Option<u64>,
}

impl SettleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline_ms = Some(now_ms + delay_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Returns `true` once per arming, the first time `now_ms` reaches the
    /// deadline, and disarms the timer.
    pub fn take_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
