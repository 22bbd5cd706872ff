// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rect marks.

use kurbo::Rect;
use peniko::Brush;
use seriesboard_core::{Mark, MarkId, MarkPayload, RectMark};

use crate::z_order;

/// A filled (optionally outlined) rectangle.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Geometry.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Outline paint and width.
    pub stroke: Option<(Brush, f64)>,
    /// Rendering order hint.
    pub z_index: i32,
    /// Whether `rect` is in plot space.
    pub plot_space: bool,
}

impl RectMarkSpec {
    /// Creates a view-space rect with a default fill.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            fill: Brush::default(),
            stroke: None,
            z_index: z_order::SERIES_FILL,
            plot_space: false,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Adds an outline.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, width: f64) -> Self {
        self.stroke = Some((stroke.into(), width));
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Interprets `rect` as plot-space coordinates.
    pub fn in_plot_space(mut self) -> Self {
        self.plot_space = true;
        self
    }

    /// Generates the rect mark; the rect is normalized so `x0 <= x1` and `y0 <= y1`.
    pub fn mark(&self) -> Mark {
        let mark = Mark::new(
            self.id,
            MarkPayload::Rect(RectMark {
                rect: self.rect.abs(),
                fill: self.fill.clone(),
                stroke: self.stroke.clone(),
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
