// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order conventions for chart marks.
//!
//! Painters sort by `(z_index, MarkId)`. Plots get a band of z-indexes each, in `Chart::plots`
//! order, so a later plot always paints over an earlier one whatever their kinds; see
//! [`series_layer`]. Everything chart-level sits below or above that band.

/// Plot background fill.
pub const PLOT_BACKGROUND: i32 = -100;
/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Start of the per-plot band.
pub const SERIES: i32 = 0;
/// Number of z-levels reserved per plot.
pub const SERIES_STRIDE: i32 = 4;
/// Filled series marks (areas, bars, histogram bins, placeholders) within a plot's band.
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (lines) within a plot's band.
pub const SERIES_STROKE: i32 = 1;
/// Error bars within a plot's band.
pub const SERIES_ERROR_BARS: i32 = 2;
/// Point marks within a plot's band.
pub const SERIES_POINTS: i32 = 3;

/// Plots past this index share the top band.
pub const MAX_PLOT_BANDS: usize = 10_000;

/// Highlighted x ranges, above every plot.
pub const HIGHLIGHTS: i32 = 50_000;
/// "no data" labels.
pub const PLACEHOLDER_LABELS: i32 = 50_050;
/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 50_100;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 50_200;
/// Axis titles.
pub const AXIS_TITLES: i32 = 50_300;
/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 50_400;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 50_500;
/// Chart title.
pub const TITLES: i32 = 50_600;
/// Tooltip marker and background.
pub const TOOLTIP: i32 = 60_000;
/// Tooltip text.
pub const TOOLTIP_TEXT: i32 = 60_010;

/// z-index of `layer` (one of the `SERIES_*` offsets) for the plot at `plot_index`.
pub fn series_layer(plot_index: usize, layer: i32) -> i32 {
    let band = i32::try_from(plot_index.min(MAX_PLOT_BANDS)).unwrap_or(0);
    SERIES + band * SERIES_STRIDE + layer
}
