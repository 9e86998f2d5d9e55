use std::fmt;

use serde::Serialize;

use crate::graph::Weight;

/// Path length: finite, or no path at all.
///
/// Orders every finite value before `Unreachable`. Serialises as a number or
/// `null`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Distance {
    Finite(i64),
    #[default]
    Unreachable,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0);

    pub fn finite(self) -> Option<i64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// Extends the path by one edge. Unreachable stays unreachable.
    pub fn add(self, weight: Weight) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d.saturating_add(weight)),
            Distance::Unreachable => Distance::Unreachable,
        }
    }

    /// Concatenates two path lengths.
    pub fn join(self, other: Distance) -> Distance {
        match other {
            Distance::Finite(w) => self.add(w),
            Distance::Unreachable => Distance::Unreachable,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => fmt::Display::fmt(d, f),
            Distance::Unreachable => f.pad("∞"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_orders_before_unreachable() {
        assert!(Distance::Finite(i64::MAX) < Distance::Unreachable);
        assert!(Distance::Finite(-3) < Distance::Finite(2));
    }

    #[test]
    fn arithmetic_keeps_unreachable() {
        assert_eq!(Distance::Finite(2).add(3), Distance::Finite(5));
        assert_eq!(Distance::Unreachable.add(3), Distance::Unreachable);
        assert_eq!(Distance::Finite(2).join(Distance::Unreachable), Distance::Unreachable);
    }

    #[test]
    fn displays_infinity() {
        assert_eq!(format!("{:>3}", Distance::Unreachable), "  ∞");
        assert_eq!(format!("{:>3}", Distance::Finite(7)), "  7");
        assert_eq!(serde_json::to_string(&Distance::Unreachable).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Distance::Finite(4)).unwrap(), "4");
    }
}
