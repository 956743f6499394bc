//! Threshold partitioning of the pooled samples into three groups.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies one of the three value-range groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupId {
    /// Values below border 1.
    One,
    /// Values in `[border1, border2)`.
    Two,
    /// Values at or above border 2.
    Three,
}

impl GroupId {
    /// All groups in display order.
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// Zero-based index.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
            Self::Three => 2,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "Group 1",
            Self::Two => "Group 2",
            Self::Three => "Group 3",
        }
    }

    /// Returns true if `value` falls in this group's interval.
    ///
    /// With `border1 > border2` the intervals of groups 1 and 3 overlap and
    /// group 2 is empty; the predicate is applied as-is.
    #[must_use]
    pub fn contains(self, value: f64, border1: f64, border2: f64) -> bool {
        match self {
            Self::One => value < border1,
            Self::Two => value >= border1 && value < border2,
            Self::Three => value >= border2,
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Ordering state of a border pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BorderOrder {
    /// `border1 < border2`: the partition is exhaustive and disjoint.
    Ordered,
    /// `border1 >= border2`: group 2 is empty, groups 1 and 3 may overlap.
    Inverted,
}

impl BorderOrder {
    /// User-facing message for an inverted pair.
    pub const WARNING: &'static str = "Border 1 must be less than Border 2";

    /// Classifies a border pair.
    #[must_use]
    pub fn of(border1: f64, border2: f64) -> Self {
        if border1 < border2 {
            Self::Ordered
        } else {
            Self::Inverted
        }
    }

    /// Warning text to surface, if any.
    #[must_use]
    pub fn warning(self) -> Option<&'static str> {
        match self {
            Self::Ordered => None,
            Self::Inverted => Some(Self::WARNING),
        }
    }
}

/// The pooled samples split into three groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Groups {
    values: [Vec<f64>; 3],
    borders: (f64, f64),
}

impl Groups {
    /// Partitions `combined` using half-open intervals.
    ///
    /// Group members keep their order from `combined`.
    #[must_use]
    pub fn partition(combined: &[f64], border1: f64, border2: f64) -> Self {
        let values: [Vec<f64>; 3] = GroupId::ALL.map(|id| {
            combined
                .iter()
                .copied()
                .filter(|&v| id.contains(v, border1, border2))
                .collect()
        });
        Self {
            values,
            borders: (border1, border2),
        }
    }

    /// Values of one group.
    pub fn get(&self, id: GroupId) -> &[f64] {
        &self.values[id.index()]
    }

    /// Natural log of one group's values.
    pub fn log_values(&self, id: GroupId) -> Vec<f64> {
        self.get(id).iter().map(|v| v.ln()).collect()
    }

    /// Size of one group.
    pub fn len(&self, id: GroupId) -> usize {
        self.values[id.index()].len()
    }

    /// Sum of the three group sizes.
    pub fn total_len(&self) -> usize {
        self.values.iter().map(Vec::len).sum()
    }

    /// The border pair used for this partition.
    pub fn borders(&self) -> (f64, f64) {
        self.borders
    }

    /// Ordering state of the border pair.
    pub fn border_order(&self) -> BorderOrder {
        BorderOrder::of(self.borders.0, self.borders.1)
    }

    /// Iterates `(id, values)` in group order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &[f64])> {
        GroupId::ALL
            .into_iter()
            .map(move |id| (id, self.values[id.index()].as_slice()))
    }
}
