// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart editor: a draft copy of one chart, edited across three tabs.
//!
//! Every edit goes to the draft. The committed chart is only replaced when the dashboard
//! saves the editor, so cancelling is simply dropping it.

use seriesboard_charts::{
    AxisType, Chart, FilterPatch, HighlightRegion, PlotStyle, Renderer, Viewport,
};
use seriesboard_core::{ChartId, ConditionId, PlotId, Scene, SeriesId, SeriesLookup};
use seriesboard_transforms::{FilterExpressionError, FilterMethod, FilterPreset, MatchType};
use tracing::debug;

/// Editor tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditorTab {
    /// Title, axes, decorations and plot styles.
    #[default]
    Display,
    /// Plot sources and filters.
    Data,
    /// Free-form key/value pairs.
    Properties,
}

/// Draft state for one chart.
#[derive(Clone, Debug)]
pub struct ChartEditor {
    original: Chart,
    draft: Chart,
    tab: EditorTab,
    selected_plot: Option<PlotId>,
}

impl ChartEditor {
    /// Starts editing a copy of `chart`, with its first plot selected.
    pub fn new(chart: Chart) -> Self {
        let selected_plot = chart.plots.first().map(|p| p.id);
        Self {
            draft: chart.clone(),
            original: chart,
            tab: EditorTab::Display,
            selected_plot,
        }
    }

    /// Id of the chart being edited.
    pub fn chart_id(&self) -> ChartId {
        self.original.id
    }

    /// The chart as it was when editing started.
    pub fn original(&self) -> &Chart {
        &self.original
    }

    /// The draft.
    pub fn draft(&self) -> &Chart {
        &self.draft
    }

    /// Consumes the editor, returning the draft.
    pub fn into_draft(self) -> Chart {
        self.draft
    }

    /// Returns `true` if the draft differs from the original.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Active tab.
    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    /// Switches tab.
    pub fn set_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    /// Plot the Data tab and style edits act on.
    pub fn selected_plot(&self) -> Option<PlotId> {
        self.selected_plot
    }

    /// Selects a plot. Returns `false` (selection unchanged) if the draft has no such plot.
    pub fn select_plot(&mut self, plot: PlotId) -> bool {
        if self.draft.plot(plot).is_none() {
            return false;
        }
        self.selected_plot = Some(plot);
        true
    }

    // Display tab.

    /// Sets the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    /// Sets both axis scale types.
    pub fn set_axis_types(&mut self, x: AxisType, y: AxisType) {
        self.draft.axis.x_type = x;
        self.draft.axis.y_type = y;
    }

    /// Sets axis titles; empty strings clear them.
    pub fn set_axis_titles(&mut self, x: impl Into<String>, y: impl Into<String>) {
        let non_empty = |s: String| (!s.is_empty()).then_some(s);
        self.draft.axis.x_title = non_empty(x.into());
        self.draft.axis.y_title = non_empty(y.into());
    }

    /// Toggles gridlines.
    pub fn set_grid(&mut self, x: bool, y: bool) {
        self.draft.axis.show_grid_x = x;
        self.draft.axis.show_grid_y = y;
    }

    /// Shows or hides the legend.
    pub fn set_legend_visible(&mut self, visible: bool) {
        self.draft.legend_visible = visible;
    }

    /// Enables or disables tooltips.
    pub fn set_tooltips_visible(&mut self, visible: bool) {
        self.draft.tooltips_visible = visible;
    }

    /// Restyles the selected plot. Returns `false` if nothing is selected.
    pub fn set_plot_style(&mut self, style: PlotStyle) -> bool {
        let Some(plot) = self.selected_plot else {
            return false;
        };
        self.draft = self.draft.update_plot_style(plot, style);
        true
    }

    /// Adds a highlighted x range.
    pub fn add_highlight(&mut self, region: HighlightRegion) {
        self.draft.highlights.push(region);
    }

    /// Removes the highlight at `index`.
    pub fn remove_highlight(&mut self, index: usize) -> Option<HighlightRegion> {
        (index < self.draft.highlights.len()).then(|| self.draft.highlights.remove(index))
    }

    // Data tab.

    /// Adds a plot of `source`, selects it and returns its id.
    pub fn add_plot(&mut self, source: SeriesId) -> PlotId {
        let (draft, id) = self.draft.add_plot_with_id(source);
        self.draft = draft;
        self.selected_plot = Some(id);
        debug!(chart = %self.chart_id(), plot = %id, "draft plot added");
        id
    }

    /// Removes a plot. The selection moves to the first remaining plot if it was removed.
    pub fn remove_plot(&mut self, plot: PlotId) -> bool {
        if self.draft.plot(plot).is_none() {
            return false;
        }
        self.draft = self.draft.remove_plot(plot);
        if self.selected_plot == Some(plot) {
            self.selected_plot = self.draft.plots.first().map(|p| p.id);
        }
        true
    }

    fn patch_selected(&mut self, patch: FilterPatch) -> bool {
        let Some(plot) = self.selected_plot else {
            return false;
        };
        self.draft = self.draft.update_plot_filter(plot, &patch);
        true
    }

    /// Points the selected plot at another series.
    pub fn set_source(&mut self, source: SeriesId) -> bool {
        self.patch_selected(FilterPatch {
            source: Some(source),
            ..FilterPatch::default()
        })
    }

    /// Sets the selected plot's filter method.
    pub fn set_method(&mut self, method: FilterMethod) -> bool {
        self.patch_selected(FilterPatch {
            method: Some(method),
            ..FilterPatch::default()
        })
    }

    /// Sets the selected plot's match type.
    pub fn set_match_type(&mut self, match_type: MatchType) -> bool {
        self.patch_selected(FilterPatch {
            match_type: Some(match_type),
            ..FilterPatch::default()
        })
    }

    /// Appends a condition to the selected plot.
    pub fn add_condition(&mut self, expression: &str) -> Option<ConditionId> {
        let plot = self.selected_plot?;
        let (draft, id) = self.draft.add_condition(plot, expression);
        self.draft = draft;
        id
    }

    /// Replaces a condition of the selected plot.
    pub fn edit_condition(&mut self, condition: ConditionId, expression: &str) -> bool {
        let Some(plot) = self.selected_plot else {
            return false;
        };
        self.draft = self.draft.edit_condition(plot, condition, expression);
        true
    }

    /// Removes a condition from the selected plot.
    pub fn remove_condition(&mut self, condition: ConditionId) -> bool {
        let Some(plot) = self.selected_plot else {
            return false;
        };
        self.draft = self.draft.remove_condition(plot, condition);
        true
    }

    /// Replaces the selected plot's filter with `preset`.
    pub fn apply_preset(&mut self, preset: &FilterPreset) -> bool {
        let Some(plot) = self.selected_plot else {
            return false;
        };
        self.draft = apply_preset_to(&self.draft, plot, preset);
        true
    }

    /// Parse errors of the selected plot's conditions, for inline display.
    pub fn condition_errors<L: SeriesLookup + ?Sized>(
        &self,
        lookup: &L,
    ) -> Vec<(ConditionId, FilterExpressionError)> {
        self.selected_plot
            .and_then(|id| self.draft.plot(id))
            .map(|plot| plot.filter.condition_errors(lookup))
            .unwrap_or_default()
    }

    // Properties tab.

    /// Sets a property, returning the previous value.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.draft.properties.insert(key.into(), value.into())
    }

    /// Removes a property, returning its value.
    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.draft.properties.remove(key)
    }

    /// Renders the draft.
    pub fn preview<L: SeriesLookup + ?Sized>(
        &self,
        renderer: &Renderer,
        lookup: &L,
        viewport: Viewport,
    ) -> Scene {
        renderer.render(&self.draft, lookup, viewport)
    }
}

/// `chart` with plot `plot`'s filter replaced by `preset`.
pub(crate) fn apply_preset_to(chart: &Chart, plot: PlotId, preset: &FilterPreset) -> Chart {
    let Some(current) = chart.plot(plot) else {
        return chart.clone();
    };
    let mut filter = current.filter.clone();
    preset.apply_to(&mut filter);
    chart.update_plot_filter(
        plot,
        &FilterPatch {
            source: None,
            method: Some(filter.method),
            match_type: Some(filter.match_type),
            conditions: Some(filter.conditions),
        },
    )
}
