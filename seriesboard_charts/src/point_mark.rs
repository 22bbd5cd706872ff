// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point (scatter) mark generation.

use alloc::vec::Vec;

use kurbo::Point;
use peniko::Brush;
use seriesboard_core::{CircleMark, Mark, MarkId, MarkPayload};

use crate::scale::ScaleContinuous;
use crate::series_data::PlotPoint;
use crate::z_order;

/// One circle per point.
///
/// Mark ids are `id_base + source index`, so a point keeps its id when the filter changes.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Stable-id base.
    pub id_base: u64,
    /// Scale mapping data x into plot space.
    pub x_scale: ScaleContinuous,
    /// Scale mapping data y into plot space.
    pub y_scale: ScaleContinuous,
    /// Radius in view units.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point spec with radius 3.
    pub fn new(id_base: u64, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            id_base,
            x_scale,
            y_scale,
            radius: 3.0,
            fill: Brush::default(),
            z_index: z_order::SERIES_POINTS,
        }
    }

    /// Sets the radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius.max(0.0);
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

    /// Generates one circle per point.
    pub fn marks(&self, points: &[PlotPoint]) -> Vec<Mark> {
        points
            .iter()
            .map(|p| {
                Mark::new(
                    MarkId::from_raw(self.id_base + p.index as u64),
                    MarkPayload::Circle(CircleMark {
                        center: Point::new(self.x_scale.map(p.x), self.y_scale.map(p.y)),
                        radius: self.radius,
                        fill: self.fill.clone(),
                    }),
                )
                .with_z_index(self.z_index)
                .in_plot_space()
            })
            .collect()
    }
}
