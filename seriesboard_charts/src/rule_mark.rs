// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule marks: single straight segments (axis lines, ticks, gridlines, error bars).

use kurbo::Point;
use peniko::Brush;
use seriesboard_core::{Mark, MarkId, MarkPayload, PolylineMark};

use crate::axis::StrokeStyle;
use crate::z_order;

/// A stroked line segment.
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Start point.
    pub p0: Point,
    /// End point.
    pub p1: Point,
    /// Stroke paint and width.
    pub stroke: StrokeStyle,
    /// Rendering order hint.
    pub z_index: i32,
    /// Whether the endpoints are in plot space.
    pub plot_space: bool,
}

impl RuleMarkSpec {
    /// Creates a view-space rule between two points.
    pub fn new(id: MarkId, p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self {
            id,
            p0: p0.into(),
            p1: p1.into(),
            stroke: StrokeStyle::default(),
            z_index: z_order::AXIS_RULES,
            plot_space: false,
        }
    }

    /// Creates a vertical rule.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(id, (x, y0), (x, y1))
    }

    /// Creates a horizontal rule.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, (x0, y), (x1, y))
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = StrokeStyle::solid(stroke, stroke_width);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Interprets the endpoints as plot-space coordinates.
    pub fn in_plot_space(mut self) -> Self {
        self.plot_space = true;
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        let mark = Mark::new(
            self.id,
            MarkPayload::Polyline(PolylineMark {
                points: alloc::vec![self.p0, self.p1],
                stroke: self.stroke.brush.clone(),
                stroke_width: self.stroke.stroke_width,
            }),
        )
        .with_z_index(self.z_index);
        if self.plot_space {
            mark.in_plot_space()
        } else {
            mark
        }
    }
}
