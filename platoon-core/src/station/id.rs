use std::{fmt, num::ParseIntError, str};

/// Position of a truck in the platoon.
///
/// Trucks are numbered from `1` (the head of the platoon, first to
/// receive the packets) to `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(u32);

impl StationId {
    /// the head of the platoon
    pub const FIRST: Self = StationId::new(1);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use = "function does not modify the current value"]
    pub fn next(self) -> Self {
        Self::new(self.0 + 1)
    }

    pub fn into_inner(self) -> u32 {
        self.0
    }

    /// number of trucks in a platoon ending with this truck
    pub fn platoon_len(self) -> usize {
        self.0 as usize
    }
}

impl str::FromStr for StationId {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "truck#{}", self.0)
    }
}
