// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart rendering: one [`Chart`] plus its series in, one [`Scene`] out.
//!
//! The pipeline is measure-then-arrange:
//! 1. Resolve and filter every plot.
//! 2. Derive one shared x domain and one shared y domain from what survived.
//! 3. Measure axes, title and legend, and carve the plot rectangle out of the viewport.
//! 4. Emit marks. Series geometry is in plot space (`0..=100` on both axes), chrome in view
//!    space; [`Scene::plot_to_view`] relates the two.
//!
//! Rendering never fails. Missing or empty series become placeholders and are counted in
//! [`RenderDiagnostics`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use seriesboard_core::{
    Mark, MarkId, PLOT_EXTENT, RenderDiagnostics, Scene, SeriesLookup, TextAnchor, TextBaseline,
};
use seriesboard_transforms::FilterConfig;

use crate::area_mark::AreaMarkSpec;
use crate::axis::{AxisSpec, AxisStyle, StrokeStyle};
use crate::bar_mark::BarMarkSpec;
use crate::format::format_value;
use crate::histogram::HistogramMarkSpec;
use crate::legend::{LegendItem, LegendSpec};
use crate::line_mark::LineMarkSpec;
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::model::{AxisType, Chart, PlotKind};
use crate::point_mark::PointMarkSpec;
use crate::rect_mark::RectMarkSpec;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleContinuous, ScaleSpec};
use crate::series_data::{PlotData, PlotPoint, PreparedPlot, prepare_plots};
use crate::text_mark::TextMarkSpec;
use crate::theme::ChartTheme;
use crate::time::format_time_seconds;
use crate::z_order;

// Chart-level mark ids live below 1 << 32; plot `i` owns `(i + 1) << 32 ..`.
const BACKGROUND_ID: u64 = 1 << 24;
const X_AXIS_ID: u64 = 3 << 24;
const Y_AXIS_ID: u64 = 4 << 24;
const TITLE_ID: u64 = 5 << 24;
const LEGEND_ID: u64 = 6 << 24;
const HIGHLIGHT_ID: u64 = 7 << 24;
const TOOLTIP_ID: u64 = 8 << 24;
const PLACEHOLDER_ID: u64 = 9 << 24;

const PLOT_PRIMARY: u64 = 0;
const PLOT_OUTLINE: u64 = 1;
const PLOT_PLACEHOLDER: u64 = 2;
const PLOT_PLACEHOLDER_LABEL: u64 = 3;
const PLOT_POINTS: u64 = 1 << 28;
const PLOT_ERROR_BARS: u64 = 1 << 31;

const MARGIN: f64 = 8.0;
const TITLE_GAP: f64 = 8.0;
const LEGEND_GAP: f64 = 12.0;
const AREA_FILL_ALPHA: u8 = 0x59;

/// Output size and pointer state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Width in view units.
    pub width: f64,
    /// Height in view units.
    pub height: f64,
    /// Pointer position in view space, if hovering.
    pub hover: Option<Point>,
}

impl Viewport {
    /// A viewport without hover.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            hover: None,
        }
    }

    /// Sets the hover position.
    pub fn with_hover(mut self, hover: impl Into<Point>) -> Self {
        self.hover = Some(hover.into());
        self
    }

    fn rect(&self) -> Rect {
        let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Rect::new(0.0, 0.0, clean(self.width), clean(self.height))
    }
}

/// Rendering settings shared by every chart of a dashboard.
#[derive(Clone, Debug)]
pub struct Renderer {
    /// Chrome colors and font sizes.
    pub theme: ChartTheme,
    /// Filter conventions.
    pub filter: FilterConfig,
    /// Approximate tick count per axis.
    pub tick_count: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            theme: ChartTheme::default(),
            filter: FilterConfig::default(),
            tick_count: 5,
        }
    }
}

/// Renders `chart` with the default [`Renderer`].
pub fn render<L: SeriesLookup + ?Sized>(chart: &Chart, lookup: &L, viewport: Viewport) -> Scene {
    Renderer::default().render(chart, lookup, viewport)
}

impl Renderer {
    /// Sets the theme.
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the filter conventions.
    pub fn with_filter_config(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count.max(2);
        self
    }

    /// Renders `chart` against `lookup`, measuring text heuristically.
    pub fn render<L: SeriesLookup + ?Sized>(
        &self,
        chart: &Chart,
        lookup: &L,
        viewport: Viewport,
    ) -> Scene {
        self.render_with_measurer(chart, lookup, viewport, &HeuristicTextMeasurer)
    }

    /// Renders `chart` against `lookup` with a caller-supplied text measurer.
    pub fn render_with_measurer<L: SeriesLookup + ?Sized>(
        &self,
        chart: &Chart,
        lookup: &L,
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
    ) -> Scene {
        let view = viewport.rect();
        let theme = &self.theme;
        let mut diagnostics = RenderDiagnostics::default();
        let prepared = prepare_plots(chart, lookup, &self.filter, &mut diagnostics);

        let title_h = if chart.title.is_empty() {
            0.0
        } else {
            theme.title_font_size + TITLE_GAP
        };

        if prepared.is_empty() {
            let plot = fit_plot(view, MARGIN, MARGIN + title_h, MARGIN, MARGIN);
            let mut scene = Scene::new(view, plot);
            self.push_background(&mut scene);
            self.push_title(&mut scene, chart);
            scene.push(
                TextMarkSpec::new(
                    MarkId::from_raw(PLACEHOLDER_ID),
                    plot.center(),
                    "no data",
                )
                .with_font_size(theme.label_font_size)
                .with_alignment(TextAnchor::Middle, TextBaseline::Middle)
                .with_fill(theme.placeholder_text)
                .with_z_index(z_order::PLACEHOLDER_LABELS)
                .mark(),
            );
            return scene;
        }

        let (x_domain, y_domain) = shared_domains(chart, &prepared);
        let x_spec = ScaleSpec::for_axis(chart.axis.x_type, x_domain).resolved(self.tick_count);
        let y_spec = ScaleSpec::for_axis(chart.axis.y_type, y_domain).resolved(self.tick_count);
        let style = AxisStyle::from_theme(theme);
        let x_axis = AxisSpec::bottom(X_AXIS_ID, x_spec)
            .with_tick_count(self.tick_count)
            .with_title(chart.axis.x_title.clone())
            .with_grid(chart.axis.show_grid_x)
            .with_style(style.clone());
        let y_axis = AxisSpec::left(Y_AXIS_ID, y_spec)
            .with_tick_count(self.tick_count)
            .with_title(chart.axis.y_title.clone())
            .with_grid(chart.axis.show_grid_y)
            .with_style(style);

        let legend = chart.legend_visible.then(|| {
            let items = prepared
                .iter()
                .map(|p| LegendItem::new(p.label.clone(), p.color))
                .collect();
            LegendSpec::new(LEGEND_ID, items)
                .with_font_size(theme.label_font_size)
                .with_text_fill(theme.axis_label)
        });
        let legend_w = legend
            .as_ref()
            .map(|l| l.measure(measurer).0)
            .filter(|w| *w > 0.0)
            .map_or(0.0, |w| w + LEGEND_GAP);

        let plot = fit_plot(
            view,
            MARGIN + y_axis.measure(measurer),
            MARGIN + title_h,
            MARGIN + legend_w,
            MARGIN + x_axis.measure(measurer),
        );
        let mut scene = Scene::new(view, plot);
        self.push_background(&mut scene);
        self.push_title(&mut scene, chart);
        scene.extend(x_axis.grid_marks());
        scene.extend(y_axis.grid_marks());

        let x_scale = x_spec.instantiate((0.0, PLOT_EXTENT));
        let y_scale = y_spec.instantiate((PLOT_EXTENT, 0.0));
        let baseline = match chart.axis.y_type {
            AxisType::Log => y_spec.domain().0,
            AxisType::Linear | AxisType::Time => 0.0,
        };
        let plot_count = prepared.len();
        for p in &prepared {
            self.push_plot(&mut scene, p, plot_count, x_scale, y_scale, baseline);
        }

        self.push_highlights(&mut scene, chart, x_scale);
        scene.extend(x_axis.marks(plot, measurer));
        scene.extend(y_axis.marks(plot, measurer));
        if let Some(legend) = &legend {
            scene.extend(legend.marks(Point::new(plot.x1 + LEGEND_GAP, plot.y0)));
        }

        let hover = viewport
            .hover
            .filter(|h| chart.tooltips_visible && plot.contains(*h));
        if let Some(hover) = hover {
            self.push_tooltip(&mut scene, chart, &prepared, hover, x_scale, y_scale, measurer);
        }

        scene.diagnostics = diagnostics;
        scene
    }

    fn push_background(&self, scene: &mut Scene) {
        let view = scene.view;
        let plot = scene.plot;
        scene.push(
            RectMarkSpec::new(MarkId::from_raw(BACKGROUND_ID), view)
                .with_fill(self.theme.background)
                .with_z_index(z_order::PLOT_BACKGROUND)
                .mark(),
        );
        scene.push(
            RectMarkSpec::new(MarkId::from_raw(BACKGROUND_ID + 1), plot)
                .with_fill(self.theme.plot_background)
                .with_z_index(z_order::PLOT_BACKGROUND)
                .mark(),
        );
    }

    fn push_title(&self, scene: &mut Scene, chart: &Chart) {
        if chart.title.is_empty() {
            return;
        }
        scene.push(
            TextMarkSpec::new(
                MarkId::from_raw(TITLE_ID),
                (scene.view.center().x, MARGIN),
                chart.title.clone(),
            )
            .with_font_size(self.theme.title_font_size)
            .with_alignment(TextAnchor::Middle, TextBaseline::Hanging)
            .with_fill(self.theme.title)
            .with_z_index(z_order::TITLES)
            .mark(),
        );
    }

    fn push_plot(
        &self,
        scene: &mut Scene,
        prepared: &PreparedPlot<'_>,
        plot_count: usize,
        x_scale: ScaleContinuous,
        y_scale: ScaleContinuous,
        baseline: f64,
    ) {
        let base = plot_id_base(prepared.index);
        let style = &prepared.plot.style;
        let color = prepared.color.to_color();
        let layer = |l| z_order::series_layer(prepared.index, l);

        let points = match &prepared.data {
            PlotData::Missing | PlotData::Empty => {
                self.push_placeholder(scene, prepared, plot_count);
                return;
            }
            PlotData::Bins(bins) => {
                scene.extend(
                    HistogramMarkSpec::new(base + PLOT_POINTS, x_scale, y_scale)
                        .with_baseline(baseline)
                        .with_fill(color)
                        .with_z_index(layer(z_order::SERIES_FILL))
                        .marks(bins),
                );
                return;
            }
            PlotData::Points(points) => points,
        };

        let stroke = StrokeStyle::solid(color, style.line_width);
        match style.kind {
            PlotKind::Line => {
                scene.extend(
                    LineMarkSpec::new(MarkId::from_raw(base + PLOT_PRIMARY), x_scale, y_scale)
                        .with_stroke(stroke)
                        .with_z_index(layer(z_order::SERIES_STROKE))
                        .mark(points),
                );
            }
            PlotKind::Area => {
                let fill = prepared.color.with_alpha(AREA_FILL_ALPHA).to_color();
                scene.extend(
                    AreaMarkSpec::new(MarkId::from_raw(base + PLOT_PRIMARY), x_scale, y_scale)
                        .with_baseline(baseline)
                        .with_fill(fill)
                        .with_z_index(layer(z_order::SERIES_FILL))
                        .mark(points),
                );
                scene.extend(
                    LineMarkSpec::new(MarkId::from_raw(base + PLOT_OUTLINE), x_scale, y_scale)
                        .with_stroke(stroke)
                        .with_z_index(layer(z_order::SERIES_STROKE))
                        .mark(points),
                );
            }
            PlotKind::Scatter => {
                scene.extend(
                    PointMarkSpec::new(base + PLOT_POINTS, x_scale, y_scale)
                        .with_radius(style.marker_size * 0.5)
                        .with_fill(color)
                        .with_z_index(layer(z_order::SERIES_POINTS))
                        .marks(points),
                );
            }
            PlotKind::Bar | PlotKind::Histogram => {
                scene.extend(
                    BarMarkSpec::new(base + PLOT_POINTS, x_scale, y_scale)
                        .with_baseline(baseline)
                        .with_fill(color)
                        .with_z_index(layer(z_order::SERIES_FILL))
                        .marks(points),
                );
            }
        }

        if style.error_bars {
            let z_index = layer(z_order::SERIES_ERROR_BARS);
            scene.extend(error_bars(base, points, x_scale, y_scale, color, z_index));
        }
    }

    fn push_placeholder(&self, scene: &mut Scene, prepared: &PreparedPlot<'_>, plot_count: usize) {
        let base = plot_id_base(prepared.index);
        scene.push(
            RectMarkSpec::new(
                MarkId::from_raw(base + PLOT_PLACEHOLDER),
                Rect::new(0.0, 0.0, PLOT_EXTENT, PLOT_EXTENT),
            )
            .with_fill(self.theme.placeholder_fill)
            .with_z_index(z_order::series_layer(prepared.index, z_order::SERIES_FILL))
            .in_plot_space()
            .mark(),
        );
        let y = PLOT_EXTENT * (prepared.index + 1) as f64 / (plot_count + 1) as f64;
        scene.push(
            TextMarkSpec::new(
                MarkId::from_raw(base + PLOT_PLACEHOLDER_LABEL),
                (PLOT_EXTENT * 0.5, y),
                format!("no data ({})", prepared.label),
            )
            .with_font_size(self.theme.label_font_size)
            .with_alignment(TextAnchor::Middle, TextBaseline::Middle)
            .with_fill(self.theme.placeholder_text)
            .with_z_index(z_order::PLACEHOLDER_LABELS)
            .in_plot_space()
            .mark(),
        );
    }

    fn push_highlights(&self, scene: &mut Scene, chart: &Chart, x_scale: ScaleContinuous) {
        for (i, region) in chart.highlights.iter().enumerate() {
            if !(x_scale.accepts(region.x_start) && x_scale.accepts(region.x_end)) {
                continue;
            }
            let a = x_scale.map(region.x_start).clamp(0.0, PLOT_EXTENT);
            let b = x_scale.map(region.x_end).clamp(0.0, PLOT_EXTENT);
            let id = HIGHLIGHT_ID + 2 * i as u64;
            scene.push(
                RectMarkSpec::new(MarkId::from_raw(id), Rect::new(a, 0.0, b, PLOT_EXTENT))
                    .with_fill(region.color.to_color())
                    .with_z_index(z_order::HIGHLIGHTS)
                    .in_plot_space()
                    .mark(),
            );
            if let Some(label) = &region.label {
                scene.push(
                    TextMarkSpec::new(MarkId::from_raw(id + 1), (a.min(b), 0.0), label.clone())
                        .with_font_size(self.theme.label_font_size)
                        .with_alignment(TextAnchor::Start, TextBaseline::Hanging)
                        .with_fill(self.theme.axis_label)
                        .with_z_index(z_order::HIGHLIGHTS)
                        .in_plot_space()
                        .mark(),
                );
            }
        }
    }

    fn push_tooltip(
        &self,
        scene: &mut Scene,
        chart: &Chart,
        prepared: &[PreparedPlot<'_>],
        hover: Point,
        x_scale: ScaleContinuous,
        y_scale: ScaleContinuous,
        measurer: &dyn TextMeasurer,
    ) {
        let plot = scene.plot;
        let target = Point::new(
            (hover.x - plot.x0) / plot.width() * PLOT_EXTENT,
            (hover.y - plot.y0) / plot.height() * PLOT_EXTENT,
        );
        let Some((owner, point, anchor)) = nearest_point(prepared, target, x_scale, y_scale) else {
            return;
        };

        let x_text = match chart.axis.x_type {
            AxisType::Time => format_time_seconds(point.x, 1.0),
            AxisType::Linear | AxisType::Log => format_value(point.x),
        };
        let y_text = match point.error {
            Some(e) => format!("y: {} ± {}", format_value(point.y), format_value(e)),
            None => format!("y: {}", format_value(point.y)),
        };
        let lines: Vec<String> = alloc::vec![owner.label.clone(), format!("x: {x_text}"), y_text];
        let anchor_view = scene.plot_to_view() * anchor;
        scene.extend(
            crate::tooltip::TooltipSpec::new(TOOLTIP_ID, anchor, lines)
                .with_paints(
                    owner.color.to_color(),
                    self.theme.tooltip_background,
                    self.theme.tooltip_text,
                )
                .with_font_size(self.theme.label_font_size)
                .marks(anchor_view, scene.view, measurer),
        );
    }
}

fn plot_id_base(index: usize) -> u64 {
    (index as u64 + 1) << 32
}

/// Shrinks `view` by the given insets, keeping at least a 1x1 plot.
fn fit_plot(view: Rect, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    let x0 = (view.x0 + left).min(view.x1);
    let y0 = (view.y0 + top).min(view.y1);
    let x1 = (view.x1 - right).max(x0 + 1.0);
    let y1 = (view.y1 - bottom).max(y0 + 1.0);
    Rect::new(x0, y0, x1, y1)
}

fn error_bars(
    base: u64,
    points: &[PlotPoint],
    x_scale: ScaleContinuous,
    y_scale: ScaleContinuous,
    color: peniko::Color,
    z_index: i32,
) -> Vec<Mark> {
    points
        .iter()
        .filter_map(|p| {
            let e = p.error?;
            let x = x_scale.map(p.x);
            let lo = if y_scale.accepts(p.y - e) {
                y_scale.map(p.y - e)
            } else {
                PLOT_EXTENT
            };
            let hi = y_scale.map(p.y + e);
            let (lo, hi) = (lo.clamp(0.0, PLOT_EXTENT), hi.clamp(0.0, PLOT_EXTENT));
            Some(
                RuleMarkSpec::vertical(
                    MarkId::from_raw(base + PLOT_ERROR_BARS + p.index as u64),
                    x,
                    lo,
                    hi,
                )
                .with_stroke(Brush::Solid(color), 1.0)
                .with_z_index(z_index)
                .in_plot_space()
                .mark(),
            )
        })
        .collect()
}

/// The included point closest to `target` (plot space), preferring x distance.
fn nearest_point<'p>(
    prepared: &'p [PreparedPlot<'_>],
    target: Point,
    x_scale: ScaleContinuous,
    y_scale: ScaleContinuous,
) -> Option<(&'p PreparedPlot<'p>, PlotPoint, Point)> {
    let mut best: Option<(&PreparedPlot<'_>, PlotPoint, Point, (f64, f64))> = None;
    for p in prepared {
        let PlotData::Points(points) = &p.data else {
            continue;
        };
        for pt in points {
            let at = Point::new(x_scale.map(pt.x), y_scale.map(pt.y));
            let key = ((at.x - target.x).abs(), (at.y - target.y).abs());
            if !(key.0.is_finite() && key.1.is_finite()) {
                continue;
            }
            if best.as_ref().is_none_or(|b| key < b.3) {
                best = Some((p, *pt, at, key));
            }
        }
    }
    best.map(|(p, pt, at, _)| (p, pt, at))
}

/// Running min/max of finite values.
#[derive(Clone, Copy, Debug)]
struct Extent {
    lo: f64,
    hi: f64,
    log: bool,
}

impl Extent {
    fn new(axis: AxisType) -> Self {
        Self {
            lo: f64::INFINITY,
            hi: f64::NEG_INFINITY,
            log: axis == AxisType::Log,
        }
    }

    fn include(&mut self, v: f64) {
        if v.is_finite() && (!self.log || v > 0.0) {
            self.lo = self.lo.min(v);
            self.hi = self.hi.max(v);
        }
    }

    /// Domain with defaults for empty input and padding for a single value.
    fn resolve(self) -> (f64, f64) {
        if self.lo > self.hi {
            return if self.log { (1.0, 10.0) } else { (0.0, 1.0) };
        }
        if self.lo == self.hi {
            return if self.log {
                (self.lo / 10.0, self.hi * 10.0)
            } else {
                (self.lo - 0.5, self.hi + 0.5)
            };
        }
        (self.lo, self.hi)
    }
}

fn shared_domains(chart: &Chart, prepared: &[PreparedPlot<'_>]) -> ((f64, f64), (f64, f64)) {
    let mut x = Extent::new(chart.axis.x_type);
    let mut y = Extent::new(chart.axis.y_type);
    let linear_y = chart.axis.y_type != AxisType::Log;

    for p in prepared {
        let style = &p.plot.style;
        match &p.data {
            PlotData::Missing | PlotData::Empty => {}
            PlotData::Bins(bins) => {
                for bin in bins {
                    x.include(bin.start);
                    x.include(bin.end);
                    y.include(bin.count as f64);
                }
                if linear_y && !bins.is_empty() {
                    y.include(0.0);
                }
            }
            PlotData::Points(points) => {
                for pt in points {
                    x.include(pt.x);
                    y.include(pt.y);
                    if let (true, Some(e)) = (style.error_bars, pt.error) {
                        y.include(pt.y - e);
                        y.include(pt.y + e);
                    }
                }
                let fills_to_baseline = matches!(
                    style.kind,
                    PlotKind::Area | PlotKind::Bar | PlotKind::Histogram
                );
                if linear_y && fills_to_baseline && !points.is_empty() {
                    y.include(0.0);
                }
                if style.kind == PlotKind::Bar && chart.axis.x_type != AxisType::Log {
                    let half = min_spacing(points).unwrap_or(1.0) * 0.5;
                    if let (Some(first), Some(last)) = (points.first(), points.last()) {
                        x.include(first.x - half);
                        x.include(last.x + half);
                    }
                }
            }
        }
    }
    (x.resolve(), y.resolve())
}

fn min_spacing(points: &[PlotPoint]) -> Option<f64> {
    points
        .windows(2)
        .map(|w| (w[1].x - w[0].x).abs())
        .filter(|d| *d > 0.0)
        .reduce(f64::min)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use seriesboard_core::{
        ChartId, CoordinateSpace, DataPoint, MarkKind, MarkPayload, Rgba, Series, SeriesId,
    };

    use super::*;
    use crate::model::{HighlightRegion, PlotStyle};

    fn series(id: &str, values: &[f64]) -> Series {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(i as f64, *v))
            .collect();
        Series::new(id, id, Rgba::rgb(0x1f, 0x77, 0xb4), points)
    }

    fn chart_of(sources: &[&str]) -> Chart {
        sources
            .iter()
            .fold(Chart::new(ChartId(1)), |c, s| c.add_plot(SeriesId::from(*s)))
    }

    fn view() -> Viewport {
        Viewport::new(400.0, 300.0)
    }

    fn z_of(scene: &Scene, id: u64) -> i32 {
        scene.mark(MarkId::from_raw(id)).map(|m| m.z_index).unwrap_or(i32::MIN)
    }

    #[test]
    fn chart_without_plots_shows_a_single_no_data_label() {
        let scene = render(&Chart::new(ChartId(1)), &[] as &[Series], view());
        let texts: Vec<&str> = scene.texts().collect();
        assert_eq!(texts.iter().filter(|t| **t == "no data").count(), 1);
        assert!(texts.contains(&"Chart 1"));
        assert!(scene.diagnostics.is_clean());
    }

    #[test]
    fn missing_and_empty_series_become_placeholders() {
        let data = [series("empty", &[])];
        let chart = chart_of(&["ghost", "empty"]);
        let scene = render(&chart, &data[..], view());
        assert_eq!(scene.diagnostics.missing_series, 1);
        assert_eq!(scene.diagnostics.empty_plots, 1);
        let texts: Vec<&str> = scene.texts().collect();
        assert!(texts.contains(&"no data (ghost)"));
        assert!(texts.contains(&"no data (empty)"));
        let series_lines = scene
            .marks_of_kind(MarkKind::Polyline)
            .filter(|m| m.id.raw() >= 1 << 32)
            .count();
        assert_eq!(series_lines, 0);
    }

    #[test]
    fn degenerate_viewports_do_not_panic() {
        let data = [series("flux", &[1.0, 2.0, 3.0])];
        let chart = chart_of(&["flux"]);
        for vp in [
            Viewport::new(0.0, 0.0),
            Viewport::new(f64::NAN, f64::INFINITY),
            Viewport::new(-10.0, 5.0).with_hover((1.0, 1.0)),
        ] {
            let scene = render(&chart, &data[..], vp);
            assert!(scene.plot.width() >= 1.0 && scene.plot.height() >= 1.0);
        }
    }

    #[test]
    fn line_points_land_in_plot_space() {
        let data = [series("flux", &[1.0, 5.0, 2.0, 4.0, 3.0])];
        let scene = render(&chart_of(&["flux"]), &data[..], view());
        let line = scene.mark(MarkId::from_raw(1 << 32)).expect("line mark");
        assert_eq!(line.space, CoordinateSpace::Plot);
        let MarkPayload::Polyline(poly) = &line.payload else {
            panic!("expected a polyline");
        };
        assert_eq!(poly.points.len(), 5);
        let inside = |v: f64| (0.0..=100.0).contains(&v);
        assert!(poly.points.iter().all(|p| inside(p.x) && inside(p.y)));
        // Higher values sit higher on screen.
        assert!(poly.points[1].y < poly.points[0].y);
    }

    #[test]
    fn log_axes_skip_and_count_non_positive_values() {
        let data = [series("power", &[0.0, -1.0, 10.0, 100.0])];
        let mut chart = chart_of(&["power"]);
        chart.axis.y_type = AxisType::Log;
        let scene = render(&chart, &data[..], view());
        assert_eq!(scene.diagnostics.non_positive_log_values, 2);
        let line = scene.mark(MarkId::from_raw(1 << 32)).expect("line mark");
        let MarkPayload::Polyline(poly) = &line.payload else {
            panic!("expected a polyline");
        };
        assert_eq!(poly.points.len(), 2);
    }

    #[test]
    fn later_plots_draw_above_earlier_ones_and_highlights_above_both() {
        let data = [series("a", &[1.0, 2.0]), series("b", &[2.0, 1.0])];
        let mut chart = chart_of(&["a", "b"]);
        chart.highlights.push(HighlightRegion::new(0.2, 0.8).with_label("flare"));
        let scene = render(&chart, &data[..], view().with_hover((200.0, 150.0)));
        let first = z_of(&scene, 1 << 32);
        let second = z_of(&scene, 2 << 32);
        let highlight = z_of(&scene, HIGHLIGHT_ID);
        let tooltip = z_of(&scene, TOOLTIP_ID);
        assert!(first < second);
        assert!(second < highlight);
        assert!(highlight < tooltip);
    }

    #[test]
    fn tooltip_names_the_nearest_point() {
        let data = [series("flux", &[1.0, 2.0, 3.0])];
        let chart = chart_of(&["flux"]);
        let plain = render(&chart, &data[..], view());
        // Hover over the right edge of the plot: the last point is nearest.
        let hover = Point::new(plain.plot.x1 - 1.0, plain.plot.center().y);
        let scene = render(&chart, &data[..], view().with_hover(hover));
        let texts: Vec<&str> = scene.texts().collect();
        assert!(texts.contains(&"flux"));
        assert!(texts.contains(&"x: 2"));
        assert!(texts.contains(&"y: 3"));

        let mut hidden = chart.clone();
        hidden.tooltips_visible = false;
        let scene = render(&hidden, &data[..], view().with_hover(hover));
        assert!(scene.mark(MarkId::from_raw(TOOLTIP_ID)).is_none());
    }

    #[test]
    fn legend_lists_each_plot_unless_hidden() {
        let data = [series("a", &[1.0]), series("b", &[2.0])];
        let chart = chart_of(&["a", "b"]);
        let scene = render(&chart, &data[..], view());
        let label = scene.mark(MarkId::from_raw(LEGEND_ID + 3));
        assert_eq!(label.and_then(|m| m.payload.text()), Some("b"));

        let mut hidden = chart;
        hidden.legend_visible = false;
        let scene = render(&hidden, &data[..], view());
        assert!(scene.mark(MarkId::from_raw(LEGEND_ID)).is_none());
    }

    #[test]
    fn bars_start_from_zero_and_histograms_bucket_values() {
        let data = [series("counts", &[4.0, 5.0, 6.0, 6.0])];
        let (chart, plot) = Chart::new(ChartId(1)).add_plot_with_id(SeriesId::from("counts"));
        let bars = chart.update_plot_style(plot, PlotStyle::of_kind(PlotKind::Bar));
        let scene = render(&bars, &data[..], view());
        let rects: Vec<&Mark> = scene
            .marks_of_kind(MarkKind::Rect)
            .filter(|m| m.space == CoordinateSpace::Plot)
            .collect();
        assert_eq!(rects.len(), 4);
        for m in rects {
            let MarkPayload::Rect(r) = &m.payload else { unreachable!() };
            assert!((r.rect.y1 - 100.0).abs() < 1e-9);
        }

        let mut style = PlotStyle::of_kind(PlotKind::Histogram);
        style.bins = 2;
        let hist = chart.update_plot_style(plot, style);
        let scene = render(&hist, &data[..], view());
        let bins = scene
            .marks_of_kind(MarkKind::Rect)
            .filter(|m| m.space == CoordinateSpace::Plot)
            .count();
        assert_eq!(bins, 2);
    }

    #[test]
    fn error_bars_follow_style() {
        let data = [series("flux", &[1.0, 2.0]).with_errors(alloc::vec![0.5, 0.25])];
        let (chart, plot) = Chart::new(ChartId(1)).add_plot_with_id(SeriesId::from("flux"));
        let scene = render(&chart, &data[..], view());
        assert!(scene.mark(MarkId::from_raw((1 << 32) + PLOT_ERROR_BARS)).is_none());

        let mut style = PlotStyle::of_kind(PlotKind::Scatter);
        style.error_bars = true;
        let scene = render(&chart.update_plot_style(plot, style), &data[..], view());
        assert!(scene.mark(MarkId::from_raw((1 << 32) + PLOT_ERROR_BARS + 1)).is_some());
        assert_eq!(scene.marks_of_kind(MarkKind::Circle).count(), 2);
    }

    #[test]
    fn dropped_conditions_are_reported() {
        let data = [series("flux", &[1.0, 2.0, 3.0])];
        let (chart, plot) = Chart::new(ChartId(1)).add_plot_with_id(SeriesId::from("flux"));
        let (chart, _) = chart.add_condition(plot, "$nowhere > 1");
        let (chart, _) = chart.add_condition(plot, "bogus");
        let scene = render(&chart, &data[..], view());
        assert_eq!(scene.diagnostics.dropped_conditions, 2);
    }
}
