// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series data.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::ids::SeriesId;

/// One sample of a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Timestamp (or any ordered x quantity, e.g. frequency).
    pub t: f64,
    /// Sample value.
    pub value: f64,
}

impl DataPoint {
    /// Creates a data point.
    pub const fn new(t: f64, value: f64) -> Self {
        Self { t, value }
    }
}

/// A named, timestamped numeric series.
///
/// Points are kept in ascending timestamp order. A series is immutable once fetched; a re-fetch
/// replaces it wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Provider-assigned id.
    pub id: SeriesId,
    /// Human-readable label (legend text).
    pub label: String,
    /// Display color, inherited by plots that do not override it.
    pub color: Rgba,
    /// Samples in ascending timestamp order.
    pub points: Vec<DataPoint>,
    /// Optional per-point uncertainties, same length as `points`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<f64>>,
}

impl Series {
    /// Creates a series without error bars.
    pub fn new(
        id: impl Into<SeriesId>,
        label: impl Into<String>,
        color: Rgba,
        points: Vec<DataPoint>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color,
            points,
            errors: None,
        }
    }

    /// Attaches per-point uncertainties.
    pub fn with_errors(mut self, errors: Vec<f64>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Uncertainty of the point at `index`, if the series carries errors.
    pub fn error_at(&self, index: usize) -> Option<f64> {
        self.errors.as_ref()?.get(index).copied()
    }

    /// Value aligned with a point of another series.
    ///
    /// Uses the same index when its timestamp matches `t`, otherwise searches for a point with
    /// exactly that timestamp. Returns `None` when neither matches.
    pub fn aligned_value(&self, index: usize, t: f64) -> Option<f64> {
        if let Some(p) = self.points.get(index)
            && p.t == t
        {
            return Some(p.value);
        }
        self.points
            .binary_search_by(|p| p.t.total_cmp(&t))
            .ok()
            .map(|i| self.points[i].value)
    }
}

/// Error returned when a plot references a series the registry does not hold.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("series `{0}` is not available")]
pub struct MissingSeries(pub SeriesId);

/// Read access to series by id.
///
/// The filter engine resolves `$ref` conditions and the renderer resolves plot sources through
/// this trait, so neither depends on where the series are stored.
pub trait SeriesLookup {
    /// Returns the series with `id`, if present.
    fn series(&self, id: &SeriesId) -> Option<&Series>;
}

impl SeriesLookup for [Series] {
    fn series(&self, id: &SeriesId) -> Option<&Series> {
        self.iter().find(|s| &s.id == id)
    }
}

impl SeriesLookup for Vec<Series> {
    fn series(&self, id: &SeriesId) -> Option<&Series> {
        self.as_slice().series(id)
    }
}

impl SeriesLookup for BTreeMap<SeriesId, Series> {
    fn series(&self, id: &SeriesId) -> Option<&Series> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn ramp(id: &str, ts: &[f64]) -> Series {
        let points = ts
            .iter()
            .map(|&t| DataPoint::new(t, t * 10.0))
            .collect();
        Series::new(id, id, Rgba::rgb(0, 0, 0), points)
    }

    #[test]
    fn aligned_value_prefers_same_index() {
        let s = ramp("a", &[0.0, 1.0, 2.0]);
        assert_eq!(s.aligned_value(1, 1.0), Some(10.0));
    }

    #[test]
    fn aligned_value_falls_back_to_timestamp_search() {
        let s = ramp("a", &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(s.aligned_value(0, 4.0), Some(40.0));
        assert_eq!(s.aligned_value(9, 6.0), Some(60.0));
        assert_eq!(s.aligned_value(1, 3.0), None);
    }

    #[test]
    fn error_at_reads_optional_uncertainties() {
        let s = ramp("a", &[0.0, 1.0]).with_errors(alloc::vec![0.5, 0.25]);
        assert_eq!(s.error_at(1), Some(0.25));
        assert_eq!(s.error_at(2), None);
        assert_eq!(ramp("b", &[0.0]).error_at(0), None);
    }

    #[test]
    fn slices_and_maps_are_lookups() {
        let all = alloc::vec![ramp("a", &[0.0]), ramp("b", &[1.0])];
        assert!(all.series(&SeriesId::new("b")).is_some());
        assert!(all.series(&SeriesId::new("c")).is_none());

        let map: BTreeMap<_, _> = all.into_iter().map(|s| (s.id.clone(), s)).collect();
        assert_eq!(map.series(&SeriesId::new("a")).map(Series::len), Some(1));
    }
}
