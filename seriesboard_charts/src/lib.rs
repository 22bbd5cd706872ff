// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart model and scene renderer for `seriesboard`.
//!
//! This crate sits between the filter engine and a painter:
//! - The **model** ([`Chart`], [`Plot`]) is plain, serializable data with pure edit operations.
//! - **Scales** map data values into plot space or view space.
//! - **Guides** (axes, legend, tooltip) and **plot marks** are generated as
//!   `seriesboard_core::Mark`s.
//! - [`render`] ties it together: one chart plus a [`SeriesLookup`] in, one
//!   [`Scene`](seriesboard_core::Scene) out.
//!
//! Text shaping is out of scope; layout uses a [`TextMeasurer`] estimate.
//!
//! [`SeriesLookup`]: seriesboard_core::SeriesLookup

#![no_std]

extern crate alloc;

mod area_mark;
mod axis;
mod bar_mark;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod histogram;
mod legend;
mod line_mark;
mod measure;
mod model;
mod point_mark;
mod rect_mark;
mod render;
mod rule_mark;
mod scale;
mod series_data;
mod text_mark;
mod theme;
mod time;
mod tooltip;
mod z_order;

pub use area_mark::AreaMarkSpec;
pub use axis::{AxisOrient, AxisSpec, AxisStyle, StrokeStyle};
pub use bar_mark::{BarMarkSpec, DEFAULT_BAR_WIDTH_FRACTION};
pub use format::{format_log_tick, format_tick_with_step, format_value};
pub use histogram::{Bin, HistogramMarkSpec, MAX_BINS, bin_values};
pub use legend::{LegendItem, LegendSpec};
pub use line_mark::LineMarkSpec;
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use model::{
    AxisConfig, AxisType, Chart, FilterPatch, HighlightRegion, ModelError, Plot, PlotKind,
    PlotStyle,
};
pub use point_mark::PointMarkSpec;
pub use rect_mark::RectMarkSpec;
pub use render::{Renderer, Viewport, render};
pub use rule_mark::RuleMarkSpec;
pub use scale::{
    ScaleContinuous, ScaleLinear, ScaleLinearSpec, ScaleLog, ScaleLogSpec, ScaleSpec, ScaleTime,
    ScaleTimeSpec,
};
pub use series_data::PlotPoint;
pub use text_mark::TextMarkSpec;
pub use theme::{ChartTheme, ThemeKind};
pub use time::{format_time_seconds, nice_time_ticks_seconds};
pub use tooltip::TooltipSpec;
pub use z_order::*;
