// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers.
//!
//! Series and analyses are named by the upstream provider, so they carry strings. Charts, plots
//! and filter conditions are numbered locally and are never reused within a session; see
//! [`IdHighWater`].

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a data series, as assigned by the result provider.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(pub String);

impl SeriesId {
    /// Creates a series id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeriesId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SeriesId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an analysis job whose results populate a dashboard.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(pub String);

impl AnalysisId {
    /// Creates an analysis id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnalysisId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AnalysisId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw numeric id.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a chart within a dashboard.
    ChartId
);
numeric_id!(
    /// Identifier of a plot within its chart.
    PlotId
);
numeric_id!(
    /// Identifier of a filter condition within its plot.
    ConditionId
);

/// Allocates numeric ids that are never reused.
///
/// The next id is `max(largest id in use, last issued) + 1`, so deleting the newest entity does
/// not make its id available again. Ids start at 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdHighWater(u64);

impl IdHighWater {
    /// Largest id accepted from outside the allocator.
    ///
    /// Records whose ids exceed this are rejected at the boundary, so `issue` never runs out.
    pub const MAX_ID: u64 = 1 << 53;

    /// Creates an allocator that has issued nothing yet.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns the last id issued (or observed), `0` if none.
    pub const fn last(self) -> u64 {
        self.0
    }

    /// Issues the next id given the ids currently in use.
    pub fn issue(&mut self, in_use: impl IntoIterator<Item = u64>) -> u64 {
        let largest = in_use.into_iter().max().unwrap_or(0);
        let next = largest.max(self.0).saturating_add(1);
        self.0 = next;
        next
    }

    /// Records an id that entered from outside the allocator (e.g. a restored layout).
    pub fn observe(&mut self, id: u64) {
        self.0 = self.0.max(id);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn high_water_never_reuses_deleted_ids() {
        let mut hw = IdHighWater::new();
        let a = hw.issue([]);
        let b = hw.issue([a]);
        let c = hw.issue([a, b]);
        assert_eq!((a, b, c), (1, 2, 3));
        // Deleting 3 must not hand 3 out again.
        assert_eq!(hw.issue([a, b]), 4);
    }

    #[test]
    fn high_water_skips_past_larger_ids_in_use() {
        let mut hw = IdHighWater::new();
        hw.observe(2);
        assert_eq!(hw.issue([7, 3]), 8);
        assert_eq!(hw.last(), 8);
    }

    #[test]
    fn issuing_from_the_largest_accepted_id_still_yields_fresh_ids() {
        let mut hw = IdHighWater::new();
        hw.observe(IdHighWater::MAX_ID);
        let a = hw.issue([IdHighWater::MAX_ID]);
        let b = hw.issue([IdHighWater::MAX_ID, a]);
        assert!(a > IdHighWater::MAX_ID && b > a, "ids must keep increasing");
    }

    #[test]
    fn ids_display_as_raw_values() {
        let id = SeriesId::new("flux");
        assert_eq!(std::format!("{id}"), "flux");
        assert_eq!(std::format!("{}", ChartId(3)), "3");
    }
}
