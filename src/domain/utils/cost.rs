use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Fixed-point units per unit of link cost: costs are resolved to six decimal places.
pub const UNITS_PER_COST: u64 = 1_000_000;

/// Largest accepted link cost, so one arc stays far below `u64::MAX` units.
pub const MAX_LINK_COST: f64 = 1.0e12;

/// Path cost in fixed-point units.
///
/// Integer addition is exact, so appending the same arcs to two partial paths never changes
/// how they compare. Summing `f64` costs can turn two different totals into equal ones, which
/// would let the hop count tie-break pick a path the search already discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(u128);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    /// Converts a validated link cost, rounding to the nearest unit.
    pub fn from_metric(value: f64) -> Self {
        Cost((value * UNITS_PER_COST as f64).round() as u128)
    }

    pub fn units(self) -> u128 {
        self.0
    }

    /// The cost as reported to callers. Equal `Cost`s always give equal values.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / UNITS_PER_COST as f64
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, other: Cost) -> Cost {
        Cost(self.0 + other.0)
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}
