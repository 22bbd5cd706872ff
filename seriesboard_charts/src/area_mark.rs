// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area mark generation.

use alloc::vec::Vec;

use kurbo::Point;
use peniko::Brush;
use seriesboard_core::{AreaMark, Mark, MarkId, MarkPayload, PLOT_EXTENT};

use crate::scale::ScaleContinuous;
use crate::series_data::PlotPoint;
use crate::z_order;

/// A filled region between a plot's points and a horizontal baseline.
#[derive(Clone, Debug)]
pub struct AreaMarkSpec {
    /// Stable id of the emitted mark.
    pub id: MarkId,
    /// Scale mapping data x into plot space.
    pub x_scale: ScaleContinuous,
    /// Scale mapping data y into plot space.
    pub y_scale: ScaleContinuous,
    /// Baseline in data units (`0.0` for linear axes).
    pub baseline: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl AreaMarkSpec {
    /// Creates an area spec with `baseline = 0`.
    pub fn new(id: MarkId, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            id,
            x_scale,
            y_scale,
            baseline: 0.0,
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

    /// Generates the closed polygon, or nothing for an empty input.
    ///
    /// The baseline is clamped into the plot so an off-domain baseline closes along the edge.
    pub fn mark(&self, points: &[PlotPoint]) -> Option<Mark> {
        let (first, last) = (points.first()?, points.last()?);
        let base_y = self.y_scale.map(self.baseline).clamp(0.0, PLOT_EXTENT);
        let mut polygon: Vec<Point> = points
            .iter()
            .map(|p| Point::new(self.x_scale.map(p.x), self.y_scale.map(p.y)))
            .collect();
        polygon.push(Point::new(self.x_scale.map(last.x), base_y));
        polygon.push(Point::new(self.x_scale.map(first.x), base_y));
        Some(
            Mark::new(
                self.id,
                MarkPayload::Area(AreaMark {
                    points: polygon,
                    fill: self.fill.clone(),
                }),
            )
            .with_z_index(self.z_index)
            .in_plot_space(),
        )
    }
}
