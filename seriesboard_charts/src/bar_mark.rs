// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use seriesboard_core::{Mark, MarkId, PLOT_EXTENT};

use crate::rect_mark::RectMarkSpec;
use crate::scale::ScaleContinuous;
use crate::series_data::PlotPoint;
use crate::z_order;

/// Share of the point spacing a bar covers.
pub const DEFAULT_BAR_WIDTH_FRACTION: f64 = 0.8;

/// One bar per point, centred on the point's x and grown from a baseline.
///
/// Bar width is a fraction of the smallest spacing between neighbouring points, so bars never
/// overlap. Mark ids are `id_base + source index`.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Scale mapping data x into plot space.
    pub x_scale: ScaleContinuous,
    /// Scale mapping data y into plot space.
    pub y_scale: ScaleContinuous,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Share of the point spacing each bar covers.
    pub width_fraction: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar spec with `baseline = 0`.
    pub fn new(id_base: u64, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            id_base,
            x_scale,
            y_scale,
            baseline: 0.0,
            width_fraction: DEFAULT_BAR_WIDTH_FRACTION,
            fill: Brush::default(),
            z_index: z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
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

    /// Bar width in plot units for these points.
    pub fn bar_width(&self, points: &[PlotPoint]) -> f64 {
        let spacing = points
            .windows(2)
            .map(|w| (self.x_scale.map(w[1].x) - self.x_scale.map(w[0].x)).abs())
            .filter(|d| *d > 0.0)
            .reduce(f64::min)
            .unwrap_or(PLOT_EXTENT / 10.0);
        spacing * self.width_fraction.clamp(0.0, 1.0)
    }

    /// Generates one rect per point, in plot space.
    pub fn marks(&self, points: &[PlotPoint]) -> Vec<Mark> {
        let half = self.bar_width(points) * 0.5;
        let y0 = self.y_scale.map(self.baseline).clamp(0.0, PLOT_EXTENT);
        points
            .iter()
            .map(|p| {
                let x = self.x_scale.map(p.x);
                let rect = Rect::new(x - half, y0, x + half, self.y_scale.map(p.y));
                RectMarkSpec::new(MarkId::from_raw(self.id_base + p.index as u64), rect)
                    .with_fill(self.fill.clone())
                    .with_z_index(self.z_index)
                    .in_plot_space()
                    .mark()
            })
            .collect()
    }
}
