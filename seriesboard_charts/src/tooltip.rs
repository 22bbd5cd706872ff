// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tooltip: a marker on the nearest point plus a text box beside it.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use seriesboard_core::{CircleMark, Mark, MarkId, MarkPayload, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

const PADDING: f64 = 4.0;
const OFFSET: f64 = 8.0;

/// A tooltip anchored on a plot-space point.
#[derive(Clone, Debug)]
pub struct TooltipSpec {
    /// Stable-id base: marker `+0`, box `+1`, text `+2 + line`.
    pub id_base: u64,
    /// Hovered point in plot space.
    pub anchor: Point,
    /// Text lines.
    pub lines: Vec<String>,
    /// Marker color.
    pub marker: Brush,
    /// Box fill.
    pub background: Brush,
    /// Text fill.
    pub text_fill: Brush,
    /// Text size.
    pub font_size: f64,
}

impl TooltipSpec {
    /// Creates a tooltip with default paints.
    pub fn new(id_base: u64, anchor: Point, lines: Vec<String>) -> Self {
        Self {
            id_base,
            anchor,
            lines,
            marker: Brush::default(),
            background: Brush::default(),
            text_fill: Brush::default(),
            font_size: 10.0,
        }
    }

    /// Sets marker, box and text paints.
    pub fn with_paints(
        mut self,
        marker: impl Into<Brush>,
        background: impl Into<Brush>,
        text_fill: impl Into<Brush>,
    ) -> Self {
        self.marker = marker.into();
        self.background = background.into();
        self.text_fill = text_fill.into();
        self
    }

    /// Sets the text size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Generates the marker (plot space) and the box with its text (view space).
    ///
    /// `anchor_view` is the anchor already mapped into view space; the box is placed to the
    /// lower right of it and flipped or clamped so it stays inside `view`.
    pub fn marks(&self, anchor_view: Point, view: Rect, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::with_capacity(2 + self.lines.len());
        out.push(
            Mark::new(
                MarkId::from_raw(self.id_base),
                MarkPayload::Circle(CircleMark {
                    center: self.anchor,
                    radius: 4.0,
                    fill: self.marker.clone(),
                }),
            )
            .with_z_index(z_order::TOOLTIP)
            .in_plot_space(),
        );
        if self.lines.is_empty() {
            return out;
        }

        let line_h = self.font_size * 1.3;
        let text_w = self
            .lines
            .iter()
            .map(|l| measurer.measure(l, self.font_size).0)
            .fold(0.0, f64::max);
        let w = text_w + 2.0 * PADDING;
        let h = line_h * self.lines.len() as f64 + 2.0 * PADDING;

        let mut x0 = anchor_view.x + OFFSET;
        if x0 + w > view.x1 {
            x0 = anchor_view.x - OFFSET - w;
        }
        let mut y0 = anchor_view.y + OFFSET;
        if y0 + h > view.y1 {
            y0 = anchor_view.y - OFFSET - h;
        }
        x0 = x0.min(view.x1 - w).max(view.x0);
        y0 = y0.min(view.y1 - h).max(view.y0);

        out.push(
            RectMarkSpec::new(MarkId::from_raw(self.id_base + 1), Rect::new(x0, y0, x0 + w, y0 + h))
                .with_fill(self.background.clone())
                .with_stroke(self.marker.clone(), 1.0)
                .with_z_index(z_order::TOOLTIP)
                .mark(),
        );
        for (i, line) in self.lines.iter().enumerate() {
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 2 + i as u64),
                    (x0 + PADDING, y0 + PADDING + line_h * i as f64),
                    line.clone(),
                )
                .with_font_size(self.font_size)
                .with_alignment(TextAnchor::Start, TextBaseline::Hanging)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::TOOLTIP_TEXT)
                .mark(),
            );
        }
        out
    }
}
