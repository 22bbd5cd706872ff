// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line mark generation.

use alloc::vec::Vec;

use kurbo::Point;
use seriesboard_core::{Mark, MarkId, MarkPayload, PolylineMark};

use crate::axis::StrokeStyle;
use crate::scale::ScaleContinuous;
use crate::series_data::PlotPoint;
use crate::z_order;

/// A polyline through a plot's points, in plot space.
#[derive(Clone, Debug)]
pub struct LineMarkSpec {
    /// Stable id of the emitted mark.
    pub id: MarkId,
    /// Scale mapping data x into plot space.
    pub x_scale: ScaleContinuous,
    /// Scale mapping data y into plot space.
    pub y_scale: ScaleContinuous,
    /// Stroke style.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
}

impl LineMarkSpec {
    /// Creates a line spec with the default stroke.
    pub fn new(id: MarkId, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            id,
            x_scale,
            y_scale,
            stroke: StrokeStyle::default(),
            z_index: z_order::SERIES_STROKE,
        }
    }

    /// Sets the stroke style.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Maps points into plot space.
    pub fn vertices(&self, points: &[PlotPoint]) -> Vec<Point> {
        points
            .iter()
            .map(|p| Point::new(self.x_scale.map(p.x), self.y_scale.map(p.y)))
            .collect()
    }

    /// Generates the polyline, or nothing for an empty input.
    pub fn mark(&self, points: &[PlotPoint]) -> Option<Mark> {
        if points.is_empty() {
            return None;
        }
        Some(
            Mark::new(
                self.id,
                MarkPayload::Polyline(PolylineMark {
                    points: self.vertices(points),
                    stroke: self.stroke.brush.clone(),
                    stroke_width: self.stroke.stroke_width,
                }),
            )
            .with_z_index(self.z_index)
            .in_plot_space(),
        )
    }
}
