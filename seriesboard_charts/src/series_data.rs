// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-plot data preparation: filtering, log-axis exclusion and histogram binning.

use alloc::string::String;
use alloc::vec::Vec;

use seriesboard_core::{RenderDiagnostics, Rgba, Series, SeriesLookup, palette_color};
use seriesboard_transforms::{FilterConfig, evaluate};

use crate::histogram::{Bin, bin_values};
use crate::model::{AxisConfig, AxisType, Chart, Plot, PlotKind};

/// A filtered point that can be placed on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPoint {
    /// Index into the source series.
    pub index: usize,
    /// x in data units.
    pub x: f64,
    /// y in data units.
    pub y: f64,
    /// Uncertainty of `y`, if the series carries one.
    pub error: Option<f64>,
}

/// What a plot has to draw.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PlotData {
    /// The source series is not available.
    Missing,
    /// The source series has no points.
    Empty,
    /// Included points, for every kind but `Histogram`.
    Points(Vec<PlotPoint>),
    /// Value buckets of the included points.
    Bins(Vec<Bin>),
}

#[derive(Clone, Debug)]
pub(crate) struct PreparedPlot<'a> {
    pub(crate) plot: &'a Plot,
    pub(crate) index: usize,
    pub(crate) label: String,
    pub(crate) color: Rgba,
    pub(crate) data: PlotData,
}

/// Resolves every plot of `chart` against `lookup`, recording what was worked around.
pub(crate) fn prepare_plots<'a, L: SeriesLookup + ?Sized>(
    chart: &'a Chart,
    lookup: &L,
    config: &FilterConfig,
    diagnostics: &mut RenderDiagnostics,
) -> Vec<PreparedPlot<'a>> {
    chart
        .plots
        .iter()
        .enumerate()
        .map(|(index, plot)| {
            let Some(series) = lookup.series(&plot.source) else {
                diagnostics.missing_series += 1;
                return PreparedPlot {
                    plot,
                    index,
                    label: String::from(plot.source.as_str()),
                    color: plot.style.color.unwrap_or_else(|| palette_color(index)),
                    data: PlotData::Missing,
                };
            };
            let color = plot.style.color.unwrap_or(series.color);
            let label = series.label.clone();
            if series.is_empty() {
                diagnostics.empty_plots += 1;
                return PreparedPlot {
                    plot,
                    index,
                    label,
                    color,
                    data: PlotData::Empty,
                };
            }
            let data = filtered_data(plot, series, lookup, config, &chart.axis, diagnostics);
            PreparedPlot {
                plot,
                index,
                label,
                color,
                data,
            }
        })
        .collect()
}

fn filtered_data<L: SeriesLookup + ?Sized>(
    plot: &Plot,
    series: &Series,
    lookup: &L,
    config: &FilterConfig,
    axis: &AxisConfig,
    diagnostics: &mut RenderDiagnostics,
) -> PlotData {
    let outcome = evaluate(series, &plot.filter, lookup, config);
    diagnostics.dropped_conditions += outcome.diagnostics.dropped_conditions;
    diagnostics.unaligned_references += outcome.diagnostics.unaligned_references;

    if plot.style.kind == PlotKind::Histogram {
        // Bucketed values run along x; counts run along y and are never negative.
        let values = outcome
            .included_points(series)
            .map(|(_, p)| p.value)
            .filter(|v| v.is_finite())
            .filter(|v| {
                let ok = axis.x_type != AxisType::Log || *v > 0.0;
                if !ok {
                    diagnostics.non_positive_log_values += 1;
                }
                ok
            });
        return PlotData::Bins(bin_values(values, plot.style.bins));
    }

    let mut points = Vec::with_capacity(outcome.included.len());
    for (index, p) in outcome.included_points(series) {
        if !(p.t.is_finite() && p.value.is_finite()) {
            continue;
        }
        let x_bad = axis.x_type == AxisType::Log && p.t <= 0.0;
        let y_bad = axis.y_type == AxisType::Log && p.value <= 0.0;
        diagnostics.non_positive_log_values += usize::from(x_bad) + usize::from(y_bad);
        if x_bad || y_bad {
            continue;
        }
        points.push(PlotPoint {
            index,
            x: p.t,
            y: p.value,
            error: series.error_at(index).filter(|e| e.is_finite() && *e > 0.0),
        });
    }
    PlotData::Points(points)
}
