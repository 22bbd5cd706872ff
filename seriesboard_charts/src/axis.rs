// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] is measured first (how much room it needs beside the plot) and then arranged
//! against the final plot rectangle. Domain line, ticks, labels and title are view-space marks;
//! gridlines are plot-space marks so they follow the plot mapping exactly.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;
use seriesboard_core::{Mark, MarkId, PLOT_EXTENT, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::ScaleSpec;
use crate::text_mark::TextMarkSpec;
use crate::theme::ChartTheme;
use crate::z_order;

const TICK_OFFSET: u64 = 0x1_0000;
const LABEL_OFFSET: u64 = 0x2_0000;
const GRID_OFFSET: u64 = 0x3_0000;
const TITLE_OFFSET: u64 = 0x4_0000;

/// A paint + width pair for stroked paths.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in view units.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis paints and font sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Domain line and ticks.
    pub rule: StrokeStyle,
    /// Tick label fill.
    pub label_fill: Brush,
    /// Tick label font size.
    pub label_font_size: f64,
    /// Title fill.
    pub title_fill: Brush,
    /// Title font size.
    pub title_font_size: f64,
    /// Gridline stroke.
    pub grid: StrokeStyle,
}

impl AxisStyle {
    /// Axis style derived from a chart theme.
    pub fn from_theme(theme: &ChartTheme) -> Self {
        Self {
            rule: StrokeStyle::solid(theme.axis_line, 1.0),
            label_fill: Brush::Solid(theme.axis_label),
            label_font_size: theme.label_font_size,
            title_fill: Brush::Solid(theme.axis_label),
            title_font_size: theme.axis_title_font_size,
            grid: StrokeStyle::solid(theme.grid_line, 1.0),
        }
    }
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self::from_theme(&ChartTheme::light())
    }
}

/// Where the axis sits relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis below the plot (x).
    Bottom,
    /// Vertical axis left of the plot (y).
    Left,
}

/// An axis: scale, placement, ticks and decorations.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    /// Stable-id base; generated marks use fixed offsets from it.
    pub id_base: u64,
    /// Resolved scale spec shared with the plots.
    pub scale: ScaleSpec,
    /// Placement.
    pub orient: AxisOrient,
    /// Approximate tick count.
    pub tick_count: usize,
    /// Tick length.
    pub tick_size: f64,
    /// Gap between tick end and label.
    pub tick_padding: f64,
    /// Optional axis title.
    pub title: Option<String>,
    /// Gap between labels and title.
    pub title_offset: f64,
    /// Draw gridlines across the plot.
    pub grid: bool,
    /// Paints and sizes.
    pub style: AxisStyle,
}

impl AxisSpec {
    /// Creates an axis with 5 ticks and no title or grid.
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 5,
            tick_size: 5.0,
            tick_padding: 3.0,
            title: None,
            title_offset: 6.0,
            grid: false,
            style: AxisStyle::default(),
        }
    }

    /// A bottom (x) axis.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// A left (y) axis.
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets or clears the title.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.is_empty());
        self
    }

    /// Enables or disables gridlines.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Sets paints and sizes.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    fn labels(&self) -> Vec<(f64, String)> {
        let (ticks, step) = self.scale.ticks(self.tick_count);
        ticks
            .into_iter()
            .map(|v| (v, self.scale.format_tick(v, step)))
            .collect()
    }

    /// Thickness the axis needs beside the plot.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let font = self.style.label_font_size;
        let labels = match self.orient {
            AxisOrient::Bottom => font,
            AxisOrient::Left => self
                .labels()
                .iter()
                .map(|(_, l)| measurer.measure(l, font).0)
                .fold(0.0, f64::max),
        };
        let title = match &self.title {
            Some(_) => self.title_offset + self.style.title_font_size,
            None => 0.0,
        };
        self.tick_size + self.tick_padding + labels + title
    }

    /// Domain line, ticks, labels and title, in view space.
    pub fn marks(&self, plot: Rect, measurer: &dyn TextMeasurer) -> Vec<Mark> {
        let view_scale = match self.orient {
            AxisOrient::Bottom => self.scale.instantiate((plot.x0, plot.x1)),
            AxisOrient::Left => self.scale.instantiate((plot.y1, plot.y0)),
        };
        let rule = &self.style.rule;
        let mut out = Vec::new();

        let domain = match self.orient {
            AxisOrient::Bottom => RuleMarkSpec::horizontal(self.id(0), plot.y1, plot.x0, plot.x1),
            AxisOrient::Left => RuleMarkSpec::vertical(self.id(0), plot.x0, plot.y0, plot.y1),
        };
        out.push(
            domain
                .with_stroke(rule.brush.clone(), rule.stroke_width)
                .with_z_index(z_order::AXIS_RULES)
                .mark(),
        );

        let gap = self.tick_size + self.tick_padding;
        for (i, (v, label)) in self.labels().into_iter().enumerate() {
            let pos = view_scale.map(v);
            let (tick, text) = match self.orient {
                AxisOrient::Bottom => (
                    RuleMarkSpec::vertical(
                        self.id(TICK_OFFSET + i as u64),
                        pos,
                        plot.y1,
                        plot.y1 + self.tick_size,
                    ),
                    TextMarkSpec::new(self.id(LABEL_OFFSET + i as u64), (pos, plot.y1 + gap), label)
                        .with_alignment(TextAnchor::Middle, TextBaseline::Hanging),
                ),
                AxisOrient::Left => (
                    RuleMarkSpec::horizontal(
                        self.id(TICK_OFFSET + i as u64),
                        pos,
                        plot.x0 - self.tick_size,
                        plot.x0,
                    ),
                    TextMarkSpec::new(self.id(LABEL_OFFSET + i as u64), (plot.x0 - gap, pos), label)
                        .with_alignment(TextAnchor::End, TextBaseline::Middle),
                ),
            };
            out.push(
                tick.with_stroke(rule.brush.clone(), rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES)
                    .mark(),
            );
            out.push(
                text.with_font_size(self.style.label_font_size)
                    .with_fill(self.style.label_fill.clone())
                    .with_z_index(z_order::AXIS_LABELS)
                    .mark(),
            );
        }

        if let Some(title) = &self.title {
            let thickness = self.measure(measurer);
            let spec = match self.orient {
                AxisOrient::Bottom => TextMarkSpec::new(
                    self.id(TITLE_OFFSET),
                    ((plot.x0 + plot.x1) * 0.5, plot.y1 + thickness),
                    title.clone(),
                )
                .with_alignment(TextAnchor::Middle, TextBaseline::Alphabetic),
                AxisOrient::Left => TextMarkSpec::new(
                    self.id(TITLE_OFFSET),
                    (plot.x0 - thickness, (plot.y0 + plot.y1) * 0.5),
                    title.clone(),
                )
                .with_angle(-90.0)
                .with_alignment(TextAnchor::Middle, TextBaseline::Hanging),
            };
            out.push(
                spec.with_font_size(self.style.title_font_size)
                    .with_fill(self.style.title_fill.clone())
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            );
        }

        out
    }

    /// Gridlines at each tick, in plot space; empty unless enabled.
    pub fn grid_marks(&self) -> Vec<Mark> {
        if !self.grid {
            return Vec::new();
        }
        let (ticks, _) = self.scale.ticks(self.tick_count);
        let grid = &self.style.grid;
        ticks
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                let id = self.id(GRID_OFFSET + i as u64);
                let spec = match self.orient {
                    AxisOrient::Bottom => {
                        let x = self.scale.instantiate((0.0, PLOT_EXTENT)).map(v);
                        RuleMarkSpec::vertical(id, x, 0.0, PLOT_EXTENT)
                    }
                    AxisOrient::Left => {
                        let y = self.scale.instantiate((PLOT_EXTENT, 0.0)).map(v);
                        RuleMarkSpec::horizontal(id, y, 0.0, PLOT_EXTENT)
                    }
                };
                spec.with_stroke(grid.brush.clone(), grid.stroke_width)
                    .with_z_index(z_order::GRID_LINES)
                    .in_plot_space()
                    .mark()
            })
            .collect()
    }

    fn id(&self, offset: u64) -> MarkId {
        MarkId::from_raw(self.id_base + offset)
    }
}
