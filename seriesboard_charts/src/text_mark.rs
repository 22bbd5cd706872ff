// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text marks.

use alloc::string::String;

use kurbo::Point;
use peniko::Brush;
use seriesboard_core::{Mark, MarkId, MarkPayload, TextAnchor, TextBaseline, TextMark};

use crate::z_order;

/// An unshaped text label.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in view units.
    pub font_size: f64,
    /// Rotation in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
    /// Whether `pos` is in plot space.
    pub plot_space: bool,
}

impl TextMarkSpec {
    /// Creates a 10px, start-anchored label.
    pub fn new(id: MarkId, pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            id,
            pos: pos.into(),
            text: text.into(),
            font_size: 10.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            fill: Brush::default(),
            z_index: z_order::AXIS_LABELS,
            plot_space: false,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets anchor and baseline.
    pub fn with_alignment(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        self.anchor = anchor;
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

    /// Interprets `pos` as plot-space coordinates.
    pub fn in_plot_space(mut self) -> Self {
        self.plot_space = true;
        self
    }

    /// Generates the text mark.
    pub fn mark(&self) -> Mark {
        let mark = Mark::new(
            self.id,
            MarkPayload::Text(TextMark {
                pos: self.pos,
                text: self.text.clone(),
                font_size: self.font_size,
                angle: self.angle,
                anchor: self.anchor,
                baseline: self.baseline,
                fill: self.fill.clone(),
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
