// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use seriesboard_core::{Mark, MarkId, Rgba, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Row label.
    pub label: String,
    /// Swatch color.
    pub color: Rgba,
}

impl LegendItem {
    /// Creates a legend row.
    pub fn new(label: impl Into<String>, color: Rgba) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// A vertical swatch legend.
#[derive(Clone, Debug)]
pub struct LegendSpec {
    /// Stable-id base; row `i` uses `id_base + 2 * i` (swatch) and `+ 1` (label).
    pub id_base: u64,
    /// Rows in plot order.
    pub items: Vec<LegendItem>,
    /// Label font size.
    pub font_size: f64,
    /// Swatch edge length.
    pub swatch_size: f64,
    /// Gap between swatch and label.
    pub gap: f64,
    /// Distance between row tops.
    pub row_height: f64,
    /// Label paint.
    pub text_fill: Brush,
}

impl LegendSpec {
    /// Creates a legend with 10px labels.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            items,
            font_size: 10.0,
            swatch_size: 10.0,
            gap: 6.0,
            row_height: 16.0,
            text_fill: Brush::default(),
        }
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self.row_height = self.row_height.max(font_size * 1.6);
        self
    }

    /// Sets the label paint.
    pub fn with_text_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.text_fill = fill.into();
        self
    }

    /// `(width, height)` the legend occupies; zero for no rows.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> (f64, f64) {
        if self.items.is_empty() {
            return (0.0, 0.0);
        }
        let label_w = self
            .items
            .iter()
            .map(|item| measurer.measure(&item.label, self.font_size).0)
            .fold(0.0, f64::max);
        (
            self.swatch_size + self.gap + label_w,
            self.row_height * self.items.len() as f64,
        )
    }

    /// Generates swatches and labels with the legend's top-left at `origin`.
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2);
        for (i, item) in self.items.iter().enumerate() {
            let top = origin.y + self.row_height * i as f64;
            let mid = top + self.row_height * 0.5;
            let swatch = Rect::new(
                origin.x,
                mid - self.swatch_size * 0.5,
                origin.x + self.swatch_size,
                mid + self.swatch_size * 0.5,
            );
            let base = self.id_base + 2 * i as u64;
            out.push(
                RectMarkSpec::new(MarkId::from_raw(base), swatch)
                    .with_fill(item.color.to_color())
                    .with_z_index(z_order::LEGEND_SWATCHES)
                    .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(base + 1),
                    (origin.x + self.swatch_size + self.gap, mid),
                    item.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_alignment(TextAnchor::Start, TextBaseline::Middle)
                .with_fill(self.text_fill.clone())
                .with_z_index(z_order::LEGEND_LABELS)
                .mark(),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    #[test]
    fn one_swatch_and_label_per_row() {
        let legend = LegendSpec::new(
            0,
            alloc::vec![
                LegendItem::new("flux", Rgba::rgb(255, 0, 0)),
                LegendItem::new("background", Rgba::rgb(0, 0, 255)),
            ],
        );
        let (w, h) = legend.measure(&HeuristicTextMeasurer);
        assert_eq!(h, 32.0);
        assert!(w > 16.0);

        let marks = legend.marks(Point::new(200.0, 10.0));
        assert_eq!(marks.len(), 4);
        assert_eq!(marks[3].payload.text(), Some("background"));
        assert_eq!(marks[3].id, MarkId::from_raw(3));
    }

    #[test]
    fn empty_legend_takes_no_room() {
        let legend = LegendSpec::new(0, Vec::new());
        assert_eq!(legend.measure(&HeuristicTextMeasurer), (0.0, 0.0));
        assert!(legend.marks(Point::ZERO).is_empty());
    }
}
