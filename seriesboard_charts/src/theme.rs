// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart colors and font sizes.

use peniko::Color;
use peniko::color::palette::css;
use serde::{Deserialize, Serialize};

/// Named theme selection, as stored in settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeKind {
    /// Dark text on a white background.
    #[default]
    Light,
    /// Light text on a near-black background.
    Dark,
}

/// Resolved paints and sizes for chart chrome (everything but the series themselves).
#[derive(Clone, Debug, PartialEq)]
pub struct ChartTheme {
    /// Whole-view background.
    pub background: Color,
    /// Plot rectangle background.
    pub plot_background: Color,
    /// Axis domain lines and ticks.
    pub axis_line: Color,
    /// Tick labels, axis titles and legend labels.
    pub axis_label: Color,
    /// Gridlines.
    pub grid_line: Color,
    /// Chart title.
    pub title: Color,
    /// Tooltip box fill.
    pub tooltip_background: Color,
    /// Tooltip text.
    pub tooltip_text: Color,
    /// Fill behind a plot that has no data.
    pub placeholder_fill: Color,
    /// "no data" text.
    pub placeholder_text: Color,
    /// Tick label and legend font size.
    pub label_font_size: f64,
    /// Axis title font size.
    pub axis_title_font_size: f64,
    /// Chart title font size.
    pub title_font_size: f64,
}

impl ChartTheme {
    /// Light theme.
    pub fn light() -> Self {
        Self {
            background: css::WHITE,
            plot_background: Color::from_rgba8(0xfa, 0xfa, 0xfa, 0xff),
            axis_line: css::BLACK.with_alpha(0.6),
            axis_label: css::BLACK.with_alpha(0.8),
            grid_line: css::BLACK.with_alpha(0.12),
            title: css::BLACK,
            tooltip_background: css::WHITE.with_alpha(0.92),
            tooltip_text: css::BLACK,
            placeholder_fill: css::BLACK.with_alpha(0.04),
            placeholder_text: css::BLACK.with_alpha(0.45),
            label_font_size: 10.0,
            axis_title_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgba8(0x12, 0x12, 0x14, 0xff),
            plot_background: css::BLACK,
            axis_line: css::WHITE.with_alpha(0.3),
            axis_label: css::WHITE.with_alpha(0.8),
            grid_line: css::WHITE.with_alpha(0.1),
            title: css::WHITE,
            tooltip_background: css::BLACK.with_alpha(0.85),
            tooltip_text: css::WHITE,
            placeholder_fill: css::WHITE.with_alpha(0.04),
            placeholder_text: css::WHITE.with_alpha(0.45),
            ..Self::light()
        }
    }

    /// Theme for a named selection.
    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}
