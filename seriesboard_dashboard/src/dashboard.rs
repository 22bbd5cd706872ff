// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dashboard session: charts, fetch lifecycle and the single open editor.
//!
//! Fetching is split in three so the dashboard is never borrowed across an `await`:
//! [`Dashboard::open_dashboard`] hands out a [`FetchTicket`], [`fetch`] runs the provider
//! future while borrowing nothing of the dashboard, and [`Dashboard::complete_fetch`] applies
//! the result. Each new session (or navigating away) bumps a generation counter, so a slow
//! fetch for an abandoned session is discarded instead of overwriting newer state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use seriesboard_charts::{Chart, ModelError, Renderer, Viewport};
use seriesboard_core::{AnalysisId, ChartId, IdHighWater, PlotId, Scene, Series, SeriesId};
use seriesboard_transforms::FilterPreset;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::editor::{ChartEditor, apply_preset_to};
use crate::provider::{FetchError, JobStatus, SeriesProvider};
use crate::registry::{SeriesRegistry, fetch_series};
use crate::ui::UiContext;

/// Where the session's data stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No analysis open.
    #[default]
    Idle,
    /// A fetch is outstanding; charts do not render.
    Loading,
    /// Series are loaded.
    Ready,
    /// The analysis job has not finished.
    JobPending(JobStatus),
    /// The analysis does not exist.
    NotFound,
    /// Any other fetch failure.
    Failed(FetchError),
}

/// Whether a chart is being edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditorState {
    /// No editor open.
    #[default]
    Closed,
    /// The editor is open on this chart.
    Editing(ChartId),
}

/// A dismissable, user-visible error message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    /// Text to show.
    pub message: String,
    /// The error behind it.
    pub error: FetchError,
}

impl From<FetchError> for Banner {
    fn from(error: FetchError) -> Self {
        let message = match &error {
            FetchError::NotReady(status) => {
                format!("The analysis is still {status}. Try again once it has finished.")
            }
            FetchError::Unauthorized => String::from("You are not allowed to view this analysis."),
            other => format!("Could not load results: {other}."),
        };
        Self { message, error }
    }
}

/// Proof that a fetch was requested, tied to the session generation that requested it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    analysis_id: AnalysisId,
}

impl FetchTicket {
    /// Analysis to fetch.
    pub fn analysis_id(&self) -> &AnalysisId {
        &self.analysis_id
    }
}

/// A finished fetch, ready for [`Dashboard::complete_fetch`].
#[derive(Clone, Debug, PartialEq)]
pub struct FetchCompletion {
    ticket: FetchTicket,
    result: Result<Vec<Series>, FetchError>,
}

impl FetchCompletion {
    /// Pairs a ticket with a result obtained some other way.
    pub fn new(ticket: FetchTicket, result: Result<Vec<Series>, FetchError>) -> Self {
        Self { ticket, result }
    }
}

/// Runs the fetch for `ticket`.
pub async fn fetch<P: SeriesProvider + ?Sized>(provider: &P, ticket: FetchTicket) -> FetchCompletion {
    let result = fetch_series(provider, &ticket.analysis_id).await;
    FetchCompletion { ticket, result }
}

/// Serializable dashboard state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardLayout {
    /// Analysis the charts were built for.
    #[serde(default)]
    pub analysis_id: Option<AnalysisId>,
    /// Charts in display order.
    #[serde(default)]
    pub charts: Vec<Chart>,
    /// Id the next chart would get.
    pub next_chart_id: ChartId,
}

/// Why a layout was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A chart record is invalid.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Two charts share an id.
    #[error("duplicate chart id {0}")]
    DuplicateChartId(ChartId),
    /// `next_chart_id` is past [`IdHighWater::MAX_ID`].
    #[error("next chart id {0} is out of range")]
    ChartIdOutOfRange(ChartId),
    /// The layout was saved for another analysis.
    #[error("layout belongs to analysis {found}, not {expected}")]
    AnalysisMismatch {
        /// Analysis open in the dashboard.
        expected: AnalysisId,
        /// Analysis named by the layout.
        found: AnalysisId,
    },
}

/// A dashboard session.
#[derive(Debug, Default)]
pub struct Dashboard {
    analysis_id: Option<AnalysisId>,
    charts: Vec<Chart>,
    chart_ids: IdHighWater,
    registry: SeriesRegistry,
    load_state: LoadState,
    banner: Option<Banner>,
    editor: Option<ChartEditor>,
    generation: u64,
    ui: UiContext,
    config: DashboardConfig,
}

impl Dashboard {
    /// Creates an idle dashboard. The UI starts in `config.theme`.
    pub fn new(config: DashboardConfig, mut ui: UiContext) -> Self {
        ui.set_theme(config.theme);
        Self {
            config,
            ui,
            ..Self::default()
        }
    }

    // Session.

    /// Starts (or refreshes) a session for `analysis_id`.
    ///
    /// Opening a different analysis clears charts, series and the editor. Charts do not
    /// render until the returned ticket's fetch completes.
    pub fn open_dashboard(&mut self, analysis_id: AnalysisId) -> FetchTicket {
        if self.analysis_id.as_ref() != Some(&analysis_id) {
            info!(analysis = %analysis_id, "opening dashboard");
            self.reset_session();
            self.analysis_id = Some(analysis_id.clone());
        } else {
            info!(analysis = %analysis_id, "refreshing dashboard");
        }
        self.generation += 1;
        self.load_state = LoadState::Loading;
        FetchTicket {
            generation: self.generation,
            analysis_id,
        }
    }

    /// Applies a finished fetch. Returns `false` if it belonged to an older session.
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> bool {
        let FetchCompletion { ticket, result } = completion;
        if ticket.generation != self.generation {
            warn!(
                analysis = %ticket.analysis_id,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale fetch"
            );
            return false;
        }
        match self.registry.apply(result) {
            Ok(count) => {
                info!(analysis = %ticket.analysis_id, series = count, "dashboard ready");
                self.load_state = LoadState::Ready;
                self.banner = None;
            }
            Err(err) => {
                self.load_state = match &err {
                    FetchError::NotReady(status) => LoadState::JobPending(*status),
                    FetchError::NotFound(_) => LoadState::NotFound,
                    other => LoadState::Failed(other.clone()),
                };
                self.banner = Some(Banner::from(err));
            }
        }
        true
    }

    /// Leaves the dashboard: outstanding fetches become stale and all state is dropped.
    pub fn navigate_away(&mut self) {
        info!("leaving dashboard");
        self.generation += 1;
        self.reset_session();
        self.analysis_id = None;
        self.load_state = LoadState::Idle;
    }

    fn reset_session(&mut self) {
        self.charts.clear();
        self.chart_ids = IdHighWater::new();
        self.registry.clear();
        self.editor = None;
        self.banner = None;
    }

    /// Analysis of the current session.
    pub fn analysis_id(&self) -> Option<&AnalysisId> {
        self.analysis_id.as_ref()
    }

    /// Load state.
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// The active error banner.
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Hides the error banner.
    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Series of the session.
    pub fn registry(&self) -> &SeriesRegistry {
        &self.registry
    }

    /// Host UI state.
    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Host UI state, for changing theme, backend or sidebar.
    pub fn ui_mut(&mut self) -> &mut UiContext {
        &mut self.ui
    }

    /// Settings.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // Charts.

    /// Charts in display order.
    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// Returns the committed chart with `id`.
    pub fn chart(&self, id: ChartId) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id == id)
    }

    fn chart_mut(&mut self, id: ChartId) -> Option<&mut Chart> {
        self.charts.iter_mut().find(|c| c.id == id)
    }

    /// Appends an empty chart.
    pub fn add_chart(&mut self) -> ChartId {
        let id = ChartId(self.chart_ids.issue(self.charts.iter().map(|c| c.id.get())));
        self.charts.push(Chart::new(id));
        debug!(chart = %id, "chart added");
        id
    }

    /// Adds a plot of `series` to a chart. `None` if the chart does not exist.
    pub fn add_plot_to_chart(&mut self, chart_id: ChartId, series: SeriesId) -> Option<PlotId> {
        let Some(chart) = self.chart_mut(chart_id) else {
            warn!(chart = %chart_id, "add_plot_to_chart: no such chart");
            return None;
        };
        let (next, plot) = chart.add_plot_with_id(series);
        *chart = next;
        debug!(chart = %chart_id, plot = %plot, "plot added");
        Some(plot)
    }

    /// Removes a plot. Returns `false` if the chart or plot does not exist.
    pub fn remove_plot(&mut self, chart_id: ChartId, plot_id: PlotId) -> bool {
        let Some(chart) = self.chart_mut(chart_id) else {
            warn!(chart = %chart_id, "remove_plot: no such chart");
            return false;
        };
        if chart.plot(plot_id).is_none() {
            warn!(chart = %chart_id, plot = %plot_id, "remove_plot: no such plot");
            return false;
        }
        *chart = chart.remove_plot(plot_id);
        debug!(chart = %chart_id, plot = %plot_id, "plot removed");
        true
    }

    /// Deletes a chart, closing the editor if it was open on it.
    pub fn delete_chart(&mut self, chart_id: ChartId) -> bool {
        let before = self.charts.len();
        self.charts.retain(|c| c.id != chart_id);
        if self.charts.len() == before {
            warn!(chart = %chart_id, "delete_chart: no such chart");
            return false;
        }
        if self.editor_state() == EditorState::Editing(chart_id) {
            self.editor = None;
        }
        debug!(chart = %chart_id, "chart deleted");
        true
    }

    /// Replaces a plot's filter with `preset` on the committed chart.
    pub fn apply_preset(&mut self, chart_id: ChartId, plot_id: PlotId, preset: &FilterPreset) -> bool {
        let Some(chart) = self.chart_mut(chart_id) else {
            warn!(chart = %chart_id, "apply_preset: no such chart");
            return false;
        };
        if chart.plot(plot_id).is_none() {
            warn!(chart = %chart_id, plot = %plot_id, "apply_preset: no such plot");
            return false;
        }
        *chart = apply_preset_to(chart, plot_id, preset);
        debug!(chart = %chart_id, plot = %plot_id, preset = %preset.name, "preset applied");
        true
    }

    // Editor.

    /// Whether, and on which chart, the editor is open.
    pub fn editor_state(&self) -> EditorState {
        match &self.editor {
            Some(editor) => EditorState::Editing(editor.chart_id()),
            None => EditorState::Closed,
        }
    }

    /// Opens the editor on a chart, discarding any other open draft.
    ///
    /// Reopening the chart already being edited keeps its draft.
    pub fn open_editor(&mut self, chart_id: ChartId) -> bool {
        if self.editor_state() == EditorState::Editing(chart_id) {
            return true;
        }
        let Some(chart) = self.chart(chart_id) else {
            warn!(chart = %chart_id, "open_editor: no such chart");
            return false;
        };
        let editor = ChartEditor::new(chart.clone());
        if let Some(previous) = self.editor.replace(editor) {
            debug!(chart = %previous.chart_id(), "discarding draft");
        }
        true
    }

    /// The open editor.
    pub fn editor(&self) -> Option<&ChartEditor> {
        self.editor.as_ref()
    }

    /// The open editor, for editing the draft.
    pub fn editor_mut(&mut self) -> Option<&mut ChartEditor> {
        self.editor.as_mut()
    }

    /// Commits the draft and closes the editor. Returns the saved chart's id.
    ///
    /// An invalid draft is rejected and the editor stays open. If the chart was deleted
    /// meanwhile, the draft is dropped.
    pub fn save_editor(&mut self) -> Result<Option<ChartId>, ModelError> {
        let Some(editor) = &self.editor else {
            return Ok(None);
        };
        editor.draft().validate()?;
        let Some(editor) = self.editor.take() else {
            return Ok(None);
        };
        let id = editor.chart_id();
        match self.chart_mut(id) {
            Some(chart) => {
                *chart = editor.into_draft();
                debug!(chart = %id, "draft saved");
                Ok(Some(id))
            }
            None => {
                warn!(chart = %id, "save_editor: chart no longer exists");
                Ok(None)
            }
        }
    }

    /// Discards the draft and closes the editor.
    pub fn cancel_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            debug!(chart = %editor.chart_id(), dirty = editor.is_dirty(), "draft discarded");
        }
    }

    /// Closes the editor without saving.
    pub fn close_editor(&mut self) {
        self.cancel_editor();
    }

    // Rendering.

    /// A renderer using the config and the UI theme.
    pub fn renderer(&self) -> Renderer {
        self.config.renderer(self.ui.theme())
    }

    /// Renders one committed chart. `None` while loading or if the chart does not exist.
    pub fn render_chart(&self, chart_id: ChartId, viewport: Viewport) -> Option<Scene> {
        if self.load_state == LoadState::Loading {
            return None;
        }
        let chart = self.chart(chart_id)?;
        Some(self.renderer().render(chart, &self.registry, viewport))
    }

    /// Renders every committed chart. Empty while loading.
    pub fn render_all(&self, viewport: Viewport) -> Vec<(ChartId, Scene)> {
        if self.load_state == LoadState::Loading {
            return Vec::new();
        }
        let renderer = self.renderer();
        self.charts
            .iter()
            .map(|c| (c.id, renderer.render(c, &self.registry, viewport)))
            .collect()
    }

    // Layout.

    /// Serializable snapshot of the charts.
    pub fn layout(&self) -> DashboardLayout {
        let mut ids = self.chart_ids;
        DashboardLayout {
            analysis_id: self.analysis_id.clone(),
            charts: self.charts.clone(),
            next_chart_id: ChartId(ids.issue(self.charts.iter().map(|c| c.id.get()))),
        }
    }

    /// Replaces the charts with a saved layout after validating it.
    ///
    /// A layout for another analysis is rejected; one without an analysis is accepted.
    /// Chart ids issued earlier in the session stay retired. The editor is closed.
    pub fn restore_layout(&mut self, layout: DashboardLayout) -> Result<(), LayoutError> {
        if let (Some(expected), Some(found)) = (&self.analysis_id, &layout.analysis_id) {
            if expected != found {
                return Err(LayoutError::AnalysisMismatch {
                    expected: expected.clone(),
                    found: found.clone(),
                });
            }
        }
        if layout.next_chart_id.get() > IdHighWater::MAX_ID {
            return Err(LayoutError::ChartIdOutOfRange(layout.next_chart_id));
        }
        let mut seen = BTreeSet::new();
        for chart in &layout.charts {
            chart.validate()?;
            if !seen.insert(chart.id) {
                return Err(LayoutError::DuplicateChartId(chart.id));
            }
        }

        let mut ids = self.chart_ids;
        ids.observe(layout.next_chart_id.get().saturating_sub(1));
        for chart in &layout.charts {
            ids.observe(chart.id.get());
        }
        self.chart_ids = ids;
        self.charts = layout.charts;
        self.editor = None;
        info!(charts = self.charts.len(), "layout restored");
        Ok(())
    }
}
