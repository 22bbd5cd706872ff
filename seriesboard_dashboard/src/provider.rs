// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Provider seams: where series and filter presets come from.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use seriesboard_core::{AnalysisId, DataPoint};
use seriesboard_transforms::FilterPreset;

/// State of the analysis job behind a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Queued, not started.
    Pending,
    /// Started, not finished.
    Running,
    /// Finished with a result.
    Success,
    /// Finished without a result.
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
        })
    }
}

/// Why series could not be fetched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport failure; retrying may help.
    #[error("network error: {0}")]
    Network(String),
    /// The session may not read this analysis.
    #[error("not authorized to read this analysis")]
    Unauthorized,
    /// No such analysis.
    #[error("analysis {0} not found")]
    NotFound(AnalysisId),
    /// The job has not produced a result yet.
    #[error("analysis job is {0}")]
    NotReady(JobStatus),
    /// The job ended in failure.
    #[error("analysis job failed: {0}")]
    JobFailed(String),
    /// The result could not be interpreted.
    #[error("malformed result: {0}")]
    Malformed(String),
}

/// One series as delivered by a provider, before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    /// Series id, unique within the analysis.
    pub id: String,
    /// Display label; defaults to the id.
    #[serde(default)]
    pub label: Option<String>,
    /// Color hint, `#rrggbb` or `#rrggbbaa`.
    #[serde(default)]
    pub color: Option<String>,
    /// Points in any order.
    #[serde(default)]
    pub points: Vec<DataPoint>,
    /// Optional per-point uncertainties.
    #[serde(default)]
    pub errors: Option<Vec<f64>>,
}

impl SeriesPayload {
    /// Creates a payload from `(t, value)` pairs.
    pub fn new(id: impl Into<String>, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            id: id.into(),
            points: points
                .into_iter()
                .map(|(t, value)| DataPoint::new(t, value))
                .collect(),
            ..Self::default()
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the color hint.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets per-point uncertainties.
    pub fn with_errors(mut self, errors: Vec<f64>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Supplies the series of an analysis.
#[allow(async_fn_in_trait, reason = "single-threaded callers, futures need not be Send")]
pub trait SeriesProvider {
    /// Fetches every series the analysis produced.
    async fn fetch_series(&self, analysis: &AnalysisId) -> Result<Vec<SeriesPayload>, FetchError>;
}

/// Supplies named filter presets.
#[allow(async_fn_in_trait, reason = "single-threaded callers, futures need not be Send")]
pub trait ParameterSetProvider {
    /// Presets that apply to `analysis_type`.
    async fn presets(&self, analysis_type: &str) -> Result<Vec<FilterPreset>, FetchError>;
}

/// A provider serving canned results, keyed by analysis.
#[derive(Clone, Debug, Default)]
pub struct InMemorySeries {
    results: BTreeMap<AnalysisId, Result<Vec<SeriesPayload>, FetchError>>,
}

impl InMemorySeries {
    /// Creates an empty provider; every analysis is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `series` for `analysis`.
    pub fn with_series(
        mut self,
        analysis: impl Into<AnalysisId>,
        series: Vec<SeriesPayload>,
    ) -> Self {
        self.results.insert(analysis.into(), Ok(series));
        self
    }

    /// Fails every fetch of `analysis` with `error`.
    pub fn with_error(mut self, analysis: impl Into<AnalysisId>, error: FetchError) -> Self {
        self.results.insert(analysis.into(), Err(error));
        self
    }
}

impl SeriesProvider for InMemorySeries {
    async fn fetch_series(&self, analysis: &AnalysisId) -> Result<Vec<SeriesPayload>, FetchError> {
        self.results
            .get(analysis)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(analysis.clone())))
    }
}

/// Presets held in memory.
///
/// There is no notion of owner here, so every stored preset is visible and
/// [`ParameterSetProvider::presets`] filters by analysis type only.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPresets {
    presets: Vec<FilterPreset>,
}

impl InMemoryPresets {
    /// Creates a store holding `presets`.
    pub fn new(presets: Vec<FilterPreset>) -> Self {
        Self { presets }
    }

    /// Adds a preset.
    pub fn insert(&mut self, preset: FilterPreset) {
        self.presets.push(preset);
    }
}

impl ParameterSetProvider for InMemoryPresets {
    async fn presets(&self, analysis_type: &str) -> Result<Vec<FilterPreset>, FetchError> {
        Ok(self
            .presets
            .iter()
            .filter(|p| p.analysis_type == analysis_type)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_analyses_are_not_found() {
        let provider =
            InMemorySeries::new().with_series("a1", vec![SeriesPayload::new("flux", [(0.0, 1.0)])]);
        let missing = pollster::block_on(provider.fetch_series(&AnalysisId::from("nope")));
        assert_eq!(missing, Err(FetchError::NotFound(AnalysisId::from("nope"))));
        let found = pollster::block_on(provider.fetch_series(&AnalysisId::from("a1")));
        assert_eq!(found.map(|s| s.len()), Ok(1));
    }

    #[test]
    fn presets_are_filtered_by_analysis_type() {
        let store = InMemoryPresets::new(vec![
            FilterPreset::new("quiet", "light_curve").with_condition("< 10"),
            FilterPreset::new("flares", "light_curve").public(),
            FilterPreset::new("peaks", "power_spectrum").public(),
        ]);
        let presets = pollster::block_on(store.presets("power_spectrum")).unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "peaks");
    }

    #[test]
    fn payloads_deserialize_with_defaults() {
        let payload: SeriesPayload = serde_json::from_str(
            r##"{"id":"flux","points":[{"t":0.0,"value":1.5}],"color":"#ff0000"}"##,
        )
        .unwrap();
        assert_eq!(payload.label, None);
        assert_eq!(payload.points, vec![DataPoint::new(0.0, 1.5)]);
    }
}
