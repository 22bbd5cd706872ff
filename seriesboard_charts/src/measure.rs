// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement for layout.
//!
//! Shaping happens in the painter, so chart layout only needs rough extents to reserve room
//! for tick labels, the legend and the title.

/// Estimates the extent of a text run.
pub trait TextMeasurer {
    /// Returns `(width, height)` in view units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// Assumes every glyph is 0.6em wide and lines are 1em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        (0.6 * font_size * text.chars().count() as f64, font_size)
    }
}
