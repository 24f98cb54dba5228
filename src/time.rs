use std::ops::AddAssign;

/// Logical simulation time, counted in whole ticks since the tower came online.
#[derive(Debug, Clone, Copy, Default, Ord, Eq, PartialEq, PartialOrd)]
pub struct Tick(pub u64);

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T+{:04}", self.0)
    }
}

impl AddAssign<u64> for Tick {
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}
