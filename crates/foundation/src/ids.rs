/// Stable identifier for a point-of-interest location.
///
/// Matches the integer primary key the locations endpoint serves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationId(u64);

impl LocationId {
    pub fn new(n: u64) -> Self {
        LocationId(n)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
