// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Histogram binning and bin marks.

use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use seriesboard_core::{Mark, MarkId};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::rect_mark::RectMarkSpec;
use crate::scale::ScaleContinuous;
use crate::z_order;

/// One value bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge (inclusive for the last bin).
    pub end: f64,
    /// Number of values in the bucket.
    pub count: usize,
}

/// Largest bucket count a histogram draws.
pub const MAX_BINS: u32 = 1000;

/// Buckets finite values into `bins` equal-width bins spanning their range.
///
/// `bins` is clamped to `1..=MAX_BINS`. A constant input yields a single unit-wide bin centred
/// on the value.
pub fn bin_values(values: impl IntoIterator<Item = f64>, bins: u32) -> Vec<Bin> {
    let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if min == max {
        return alloc::vec![Bin {
            start: min - 0.5,
            end: max + 0.5,
            count: values.len(),
        }];
    }

    let n = bins.clamp(1, MAX_BINS) as usize;
    let width = (max - min) / n as f64;
    let mut out: Vec<Bin> = (0..n)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: if i + 1 == n {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();
    for v in values {
        let slot = {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "non-negative and clamped to the bin count below"
            )]
            {
                ((v - min) / width).floor().max(0.0) as usize
            }
        };
        out[slot.min(n - 1)].count += 1;
    }
    out
}

/// Bars over histogram bins.
#[derive(Clone, Debug)]
pub struct HistogramMarkSpec {
    /// Id of the first bin's mark; bin `i` uses `id_base + i`.
    pub id_base: u64,
    /// Scale placing bin edges (plot space).
    pub x_scale: ScaleContinuous,
    /// Scale placing counts (plot space).
    pub y_scale: ScaleContinuous,
    /// Count the bars grow from, usually 0.
    pub baseline: f64,
    /// Bar fill.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl HistogramMarkSpec {
    /// Creates a histogram spec with a zero baseline.
    pub fn new(id_base: u64, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            id_base,
            x_scale,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            z_index: z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline count.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// One rect per non-empty bin, in plot space.
    pub fn marks(&self, bins: &[Bin]) -> Vec<Mark> {
        let y0 = self.y_scale.map(self.baseline);
        bins.iter()
            .enumerate()
            .filter(|(_, b)| b.count > 0)
            .map(|(i, b)| {
                let rect = Rect::new(
                    self.x_scale.map(b.start),
                    y0,
                    self.x_scale.map(b.end),
                    self.y_scale.map(b.count as f64),
                );
                RectMarkSpec::new(MarkId::from_raw(self.id_base + i as u64), rect)
                    .with_fill(self.fill.clone())
                    .with_z_index(self.z_index)
                    .in_plot_space()
                    .mark()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn values_fall_into_equal_width_bins() {
        let bins = bin_values([0.0, 1.0, 2.0, 3.0, 4.0, 10.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!((bins[0].start, bins[0].end), (0.0, 5.0));
        assert_eq!(bins[0].count, 5);
        // The maximum lands in the last bin, not past it.
        assert_eq!(bins[1].count, 1);
    }

    #[test]
    fn constant_and_empty_inputs() {
        let bins = bin_values([2.0, 2.0, f64::NAN], 10);
        assert_eq!(bins, [Bin { start: 1.5, end: 2.5, count: 2 }]);
        assert!(bin_values([], 5).is_empty());
        assert_eq!(bin_values([1.0, 2.0], 0).len(), 1);
    }

    #[test]
    fn bin_count_is_clamped() {
        assert_eq!(bin_values([0.0, 1.0], u32::MAX).len(), MAX_BINS as usize);
    }
}
