// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart and plot records.
//!
//! A [`Chart`] owns an ordered list of [`Plot`]s; each plot draws one source series through its
//! own filter. Edits are pure: every operation returns a new chart and leaves `self` untouched,
//! which is what lets the editor hold a draft next to the committed chart.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use seriesboard_core::{
    ChartId, ConditionId, IdHighWater, MissingSeries, PlotId, Rgba, SeriesId, SeriesLookup,
};
use seriesboard_transforms::{
    FilterCondition, FilterConfig, FilterMethod, FilterOutcome, FilterSpec, MatchType, evaluate,
};

use crate::histogram::MAX_BINS;

/// Axis scale type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisType {
    /// Linear.
    #[default]
    Linear,
    /// Base-10 logarithmic; non-positive values are left out.
    Log,
    /// Linear over timestamps in seconds, with time-formatted ticks.
    Time,
}

/// Axis configuration of a chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Scale type of the x axis.
    pub x_type: AxisType,
    /// Scale type of the y axis.
    pub y_type: AxisType,
    /// Vertical gridlines at x ticks.
    pub show_grid_x: bool,
    /// Horizontal gridlines at y ticks.
    pub show_grid_y: bool,
    /// Title under the x axis.
    pub x_title: Option<String>,
    /// Title left of the y axis.
    pub y_title: Option<String>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            x_type: AxisType::Linear,
            y_type: AxisType::Linear,
            show_grid_x: false,
            show_grid_y: true,
            x_title: None,
            y_title: None,
        }
    }
}

/// How a plot draws its points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    /// Polyline through the points.
    #[default]
    Line,
    /// Polyline closed down to the baseline and filled.
    Area,
    /// One circle per point.
    Scatter,
    /// One bar per point.
    Bar,
    /// Bars over value buckets, height proportional to the bucket count.
    Histogram,
}

/// Visual style of a plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Plot kind.
    pub kind: PlotKind,
    /// Color override; `None` inherits the series color.
    pub color: Option<Rgba>,
    /// Line width for `Line`/`Area` outlines.
    pub line_width: f64,
    /// Circle diameter for `Scatter`.
    pub marker_size: f64,
    /// Bucket count for `Histogram`.
    pub bins: u32,
    /// Draw error bars when the series carries uncertainties.
    pub error_bars: bool,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            kind: PlotKind::Line,
            color: None,
            line_width: 2.0,
            marker_size: 6.0,
            bins: 10,
            error_bars: false,
        }
    }
}

impl PlotStyle {
    /// Default style of the given kind.
    pub fn of_kind(kind: PlotKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

/// One series drawn on a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    /// Id, unique within the chart.
    pub id: PlotId,
    /// Series drawn by this plot.
    pub source: SeriesId,
    /// Point filter.
    #[serde(default)]
    pub filter: FilterSpec,
    /// Visual style.
    #[serde(default)]
    pub style: PlotStyle,
}

impl Plot {
    /// Creates a plot with default style and no conditions.
    pub fn new(id: PlotId, source: SeriesId) -> Self {
        Self {
            id,
            source,
            filter: FilterSpec::default(),
            style: PlotStyle::default(),
        }
    }

    /// Evaluates this plot's filter over its source series.
    pub fn evaluate<L: SeriesLookup + ?Sized>(
        &self,
        lookup: &L,
        config: &FilterConfig,
    ) -> Result<FilterOutcome, MissingSeries> {
        let source = lookup
            .series(&self.source)
            .ok_or_else(|| MissingSeries(self.source.clone()))?;
        Ok(evaluate(source, &self.filter, lookup, config))
    }
}

/// An x range called out on a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighlightRegion {
    /// Start of the range, in x data units.
    pub x_start: f64,
    /// End of the range, in x data units.
    pub x_end: f64,
    /// Optional caption drawn at the top of the region.
    #[serde(default)]
    pub label: Option<String>,
    /// Fill color (usually translucent).
    pub color: Rgba,
}

impl HighlightRegion {
    /// Creates a region with the default translucent amber fill.
    pub fn new(x_start: f64, x_end: f64) -> Self {
        Self {
            x_start,
            x_end,
            label: None,
            color: Rgba::rgb(0xff, 0xc1, 0x07).with_alpha(0x40),
        }
    }

    /// Sets the caption.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Partial update of a plot's source and filter; `None` fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterPatch {
    /// New source series.
    pub source: Option<SeriesId>,
    /// New method.
    pub method: Option<FilterMethod>,
    /// New match type.
    pub match_type: Option<MatchType>,
    /// Replacement condition list.
    pub conditions: Option<Vec<FilterCondition>>,
}

/// Invariant violations of a chart record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Ids start at 1.
    #[error("chart id 0 is reserved")]
    ZeroChartId,
    /// A chart, plot or condition id (or id counter) exceeds [`IdHighWater::MAX_ID`].
    #[error("chart {chart}: id out of range")]
    IdOutOfRange {
        /// Offending chart.
        chart: ChartId,
    },
    /// Ids start at 1.
    #[error("chart {chart}: plot id 0 is reserved")]
    ZeroPlotId {
        /// Offending chart.
        chart: ChartId,
    },
    /// Two plots share an id.
    #[error("chart {chart}: duplicate plot id {plot}")]
    DuplicatePlotId {
        /// Offending chart.
        chart: ChartId,
        /// Duplicated id.
        plot: PlotId,
    },
    /// Two conditions of one plot share an id.
    #[error("chart {chart}, plot {plot}: duplicate condition id {condition}")]
    DuplicateConditionId {
        /// Offending chart.
        chart: ChartId,
        /// Offending plot.
        plot: PlotId,
        /// Duplicated id.
        condition: ConditionId,
    },
    /// A highlight bound is NaN or infinite.
    #[error("chart {chart}: highlight {index} has a non-finite bound")]
    InvalidHighlight {
        /// Offending chart.
        chart: ChartId,
        /// Index into `highlights`.
        index: usize,
    },
    /// A style dimension is negative or not finite, or the bin count exceeds [`MAX_BINS`].
    #[error("chart {chart}, plot {plot}: invalid style value")]
    InvalidStyle {
        /// Offending chart.
        chart: ChartId,
        /// Offending plot.
        plot: PlotId,
    },
}

/// A chart: axes, decorations and an ordered stack of plots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Id, unique within the dashboard.
    pub id: ChartId,
    /// Title drawn above the plot.
    #[serde(default)]
    pub title: String,
    /// Axis configuration.
    #[serde(default)]
    pub axis: AxisConfig,
    /// Plots; later plots draw on top.
    #[serde(default)]
    pub plots: Vec<Plot>,
    /// Draw the legend.
    #[serde(default = "default_true")]
    pub legend_visible: bool,
    /// Show a tooltip for the hovered point.
    #[serde(default = "default_true")]
    pub tooltips_visible: bool,
    /// Highlighted x ranges.
    #[serde(default)]
    pub highlights: Vec<HighlightRegion>,
    /// Free-form key/value settings.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Last plot id issued, so ids are never reused.
    #[serde(default)]
    pub plot_id_high_water: IdHighWater,
}

fn default_true() -> bool {
    true
}

impl Chart {
    /// Creates an empty chart titled `Chart {id}`.
    pub fn new(id: ChartId) -> Self {
        Self {
            id,
            title: alloc::format!("Chart {id}"),
            axis: AxisConfig::default(),
            plots: Vec::new(),
            legend_visible: true,
            tooltips_visible: true,
            highlights: Vec::new(),
            properties: BTreeMap::new(),
            plot_id_high_water: IdHighWater::new(),
        }
    }

    /// Returns the plot with `id`.
    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.plots.iter().find(|p| p.id == id)
    }

    /// Id the next added plot will get.
    pub fn next_plot_id(&self) -> PlotId {
        let mut hw = self.plot_id_high_water;
        PlotId(hw.issue(self.plots.iter().map(|p| p.id.get())))
    }

    /// Returns a chart with a new default plot of `source` appended.
    #[must_use]
    pub fn add_plot(&self, source: SeriesId) -> Self {
        self.add_plot_with_id(source).0
    }

    /// Like [`Chart::add_plot`], also returning the new plot's id.
    #[must_use]
    pub fn add_plot_with_id(&self, source: SeriesId) -> (Self, PlotId) {
        let mut next = self.clone();
        let id = PlotId(
            next.plot_id_high_water
                .issue(next.plots.iter().map(|p| p.id.get())),
        );
        next.plots.push(Plot::new(id, source));
        (next, id)
    }

    /// Returns a chart without plot `plot_id` (unchanged if absent).
    #[must_use]
    pub fn remove_plot(&self, plot_id: PlotId) -> Self {
        let mut next = self.clone();
        next.plots.retain(|p| p.id != plot_id);
        next
    }

    /// Returns a chart with `patch` applied to plot `plot_id` (unchanged if absent).
    #[must_use]
    pub fn update_plot_filter(&self, plot_id: PlotId, patch: &FilterPatch) -> Self {
        self.with_plot(plot_id, |plot| {
            if let Some(source) = &patch.source {
                plot.source = source.clone();
            }
            if let Some(method) = patch.method {
                plot.filter.method = method;
            }
            if let Some(match_type) = patch.match_type {
                plot.filter.match_type = match_type;
            }
            if let Some(conditions) = &patch.conditions {
                plot.filter.set_conditions(conditions.clone());
            }
        })
    }

    /// Returns a chart with plot `plot_id` restyled (unchanged if absent).
    #[must_use]
    pub fn update_plot_style(&self, plot_id: PlotId, style: PlotStyle) -> Self {
        self.with_plot(plot_id, |plot| plot.style = style)
    }

    /// Returns a chart with a condition appended to plot `plot_id`, and the new condition's id.
    ///
    /// The id is `None` (and the chart unchanged) if the plot is absent.
    #[must_use]
    pub fn add_condition(&self, plot_id: PlotId, expression: &str) -> (Self, Option<ConditionId>) {
        let mut id = None;
        let next = self.with_plot(plot_id, |plot| {
            id = Some(plot.filter.add_condition(expression));
        });
        (next, id)
    }

    /// Returns a chart with one condition's expression replaced.
    #[must_use]
    pub fn edit_condition(&self, plot_id: PlotId, condition: ConditionId, expression: &str) -> Self {
        self.with_plot(plot_id, |plot| {
            plot.filter.edit_condition(condition, expression);
        })
    }

    /// Returns a chart with one condition removed.
    #[must_use]
    pub fn remove_condition(&self, plot_id: PlotId, condition: ConditionId) -> Self {
        self.with_plot(plot_id, |plot| {
            plot.filter.remove_condition(condition);
        })
    }

    fn with_plot(&self, plot_id: PlotId, edit: impl FnOnce(&mut Plot)) -> Self {
        let mut next = self.clone();
        if let Some(plot) = next.plots.iter_mut().find(|p| p.id == plot_id) {
            edit(plot);
        }
        next
    }

    /// Checks the record's invariants.
    pub fn validate(&self) -> Result<(), ModelError> {
        let chart = self.id;
        if chart.get() == 0 {
            return Err(ModelError::ZeroChartId);
        }
        let in_range = |id: u64| id <= IdHighWater::MAX_ID;
        let ids_ok = in_range(chart.get())
            && in_range(self.plot_id_high_water.last())
            && self.plots.iter().all(|p| {
                in_range(p.id.get())
                    && in_range(p.filter.condition_id_high_water.last())
                    && p.filter.conditions.iter().all(|c| in_range(c.id.get()))
            });
        if !ids_ok {
            return Err(ModelError::IdOutOfRange { chart });
        }
        let mut seen_plots = BTreeMap::new();
        for plot in &self.plots {
            if plot.id.get() == 0 {
                return Err(ModelError::ZeroPlotId { chart });
            }
            if seen_plots.insert(plot.id, ()).is_some() {
                return Err(ModelError::DuplicatePlotId {
                    chart,
                    plot: plot.id,
                });
            }
            let mut seen_conditions = BTreeMap::new();
            for c in &plot.filter.conditions {
                if seen_conditions.insert(c.id, ()).is_some() {
                    return Err(ModelError::DuplicateConditionId {
                        chart,
                        plot: plot.id,
                        condition: c.id,
                    });
                }
            }
            let style = &plot.style;
            let dims_ok = [style.line_width, style.marker_size]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0);
            if !dims_ok || style.bins > MAX_BINS {
                return Err(ModelError::InvalidStyle {
                    chart,
                    plot: plot.id,
                });
            }
        }
        for (index, h) in self.highlights.iter().enumerate() {
            if !(h.x_start.is_finite() && h.x_end.is_finite()) {
                return Err(ModelError::InvalidHighlight { chart, index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use seriesboard_core::{DataPoint, Series};

    use super::*;

    fn chart() -> Chart {
        Chart::new(ChartId(1))
    }

    #[test]
    fn add_then_remove_is_equivalent_except_id_counter() {
        let before = chart().add_plot(SeriesId::new("a"));
        let (added, id) = before.add_plot_with_id(SeriesId::new("b"));
        let after = added.remove_plot(id);
        assert_ne!(after.plot_id_high_water, before.plot_id_high_water);
        let mut normalized = after.clone();
        normalized.plot_id_high_water = before.plot_id_high_water;
        assert_eq!(normalized, before);
    }

    #[test]
    fn operations_are_pure() {
        let c = chart();
        let next = c.add_plot(SeriesId::new("a"));
        assert!(c.plots.is_empty());
        assert_eq!(next.plots.len(), 1);
        assert_eq!(next.plots[0].style, PlotStyle::default());
        assert!(next.plots[0].filter.conditions.is_empty());
    }

    #[test]
    fn plot_ids_are_not_reused() {
        let (c, a) = chart().add_plot_with_id(SeriesId::new("a"));
        let (c, b) = c.add_plot_with_id(SeriesId::new("b"));
        let c = c.remove_plot(b);
        let (_, next) = c.add_plot_with_id(SeriesId::new("c"));
        assert_eq!((a, b, next), (PlotId(1), PlotId(2), PlotId(3)));
    }

    #[test]
    fn filter_patch_touches_only_given_fields() {
        let (c, id) = chart().add_plot_with_id(SeriesId::new("a"));
        let c = c.update_plot_filter(
            id,
            &FilterPatch {
                match_type: Some(MatchType::Any),
                conditions: Some(alloc::vec![FilterCondition::new(ConditionId(7), "> 1")]),
                ..FilterPatch::default()
            },
        );
        let plot = c.plot(id).unwrap();
        assert_eq!(plot.source, SeriesId::new("a"));
        assert_eq!(plot.filter.method, FilterMethod::Keep);
        assert_eq!(plot.filter.match_type, MatchType::Any);
        // The allocator moves past patched-in ids.
        let (c, new_id) = c.add_condition(id, "< 5");
        assert_eq!(new_id, Some(ConditionId(8)));
        assert_eq!(c.plot(id).unwrap().filter.conditions.len(), 2);
    }

    #[test]
    fn edits_on_unknown_plots_are_no_ops() {
        let c = chart().add_plot(SeriesId::new("a"));
        assert_eq!(c.remove_plot(PlotId(42)), c);
        assert_eq!(c.update_plot_style(PlotId(42), PlotStyle::of_kind(PlotKind::Bar)), c);
        assert_eq!(c.add_condition(PlotId(42), "> 1").1, None);
    }

    #[test]
    fn validate_catches_duplicates_and_bad_values() {
        let mut c = chart().add_plot(SeriesId::new("a")).add_plot(SeriesId::new("b"));
        assert_eq!(c.validate(), Ok(()));
        c.plots[1].id = c.plots[0].id;
        assert!(matches!(c.validate(), Err(ModelError::DuplicatePlotId { .. })));

        let mut c = chart();
        c.highlights.push(HighlightRegion::new(f64::NAN, 1.0));
        assert_eq!(
            c.validate(),
            Err(ModelError::InvalidHighlight {
                chart: ChartId(1),
                index: 0
            })
        );
    }

    #[test]
    fn validate_rejects_oversized_bins_and_ids() {
        let mut c = chart().add_plot(SeriesId::new("a"));
        c.plots[0].style.bins = u32::MAX;
        assert!(matches!(c.validate(), Err(ModelError::InvalidStyle { .. })));
        c.plots[0].style.bins = MAX_BINS;
        assert_eq!(c.validate(), Ok(()));

        let mut c = Chart::new(ChartId(u64::MAX));
        assert_eq!(
            c.validate(),
            Err(ModelError::IdOutOfRange {
                chart: ChartId(u64::MAX)
            })
        );
        c.id = ChartId(1);
        let (mut c, plot) = c.add_plot_with_id(SeriesId::new("a"));
        assert_eq!(c.validate(), Ok(()));
        c = c.add_condition(plot, "> 1").0;
        c.plots[0].filter.conditions[0].id = ConditionId(u64::MAX);
        assert!(matches!(c.validate(), Err(ModelError::IdOutOfRange { .. })));
    }

    #[test]
    fn plot_evaluate_reports_missing_source() {
        let (c, id) = chart().add_plot_with_id(SeriesId::new("flux"));
        let plot = c.plot(id).unwrap();
        let none: &[Series] = &[];
        assert_eq!(
            plot.evaluate(none, &FilterConfig::default()),
            Err(MissingSeries(SeriesId::new("flux")))
        );
        let data = alloc::vec![Series::new(
            "flux",
            "Flux",
            Rgba::rgb(0, 0, 0),
            alloc::vec![DataPoint::new(0.0, 1.0)],
        )];
        assert_eq!(
            plot.evaluate(&data, &FilterConfig::default()).map(|o| o.included),
            Ok(alloc::vec![0])
        );
    }

    #[test]
    fn charts_deserialize_with_defaults() {
        let c: Chart = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert!(c.legend_visible && c.tooltips_visible);
        assert!(c.axis.show_grid_y);
        assert_eq!(c.next_plot_id(), PlotId(1));
    }
}
