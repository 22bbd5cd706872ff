// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The series registry: the session's snapshot of fetched series.
//!
//! Fetching and applying are separate steps so no borrow of the registry is held across an
//! `await`. A failed fetch leaves the previous snapshot in place.

use std::collections::BTreeMap;

use seriesboard_core::{
    AnalysisId, MissingSeries, Rgba, Series, SeriesId, SeriesLookup, palette_color,
};
use tracing::{debug, info, warn};

use crate::provider::{FetchError, SeriesPayload, SeriesProvider};

/// Fetches and validates every series of `analysis`.
pub async fn fetch_series<P: SeriesProvider + ?Sized>(
    provider: &P,
    analysis: &AnalysisId,
) -> Result<Vec<Series>, FetchError> {
    let payloads = provider.fetch_series(analysis).await?;
    info!(%analysis, count = payloads.len(), "fetched series");
    payloads
        .into_iter()
        .enumerate()
        .map(|(index, payload)| validate_payload(payload, index))
        .collect()
}

/// Turns a raw payload into a [`Series`].
///
/// Points with a non-finite timestamp are dropped and the rest sorted by time. An unparsable
/// or absent color hint falls back to the palette entry for `index`. An uncertainty vector
/// whose length does not match the points is discarded.
pub fn validate_payload(payload: SeriesPayload, index: usize) -> Result<Series, FetchError> {
    if payload.id.trim().is_empty() {
        return Err(FetchError::Malformed(format!("series #{index} has no id")));
    }
    let color = match payload.color.as_deref().map(Rgba::parse) {
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            warn!(series = %payload.id, %err, "ignoring color hint");
            palette_color(index)
        }
        None => palette_color(index),
    };

    let total = payload.points.len();
    let mut indexed: Vec<_> = payload
        .points
        .into_iter()
        .enumerate()
        .filter(|(_, p)| p.t.is_finite())
        .collect();
    if indexed.len() != total {
        warn!(
            series = %payload.id,
            dropped = total - indexed.len(),
            "dropping points with non-finite timestamps"
        );
    }
    indexed.sort_by(|(_, a), (_, b)| a.t.total_cmp(&b.t));

    let errors = match payload.errors {
        Some(errors) if errors.len() == total => {
            Some(indexed.iter().map(|(i, _)| errors[*i]).collect())
        }
        Some(errors) => {
            warn!(
                series = %payload.id,
                points = total,
                errors = errors.len(),
                "discarding uncertainties of mismatched length"
            );
            None
        }
        None => None,
    };

    let label = payload.label.unwrap_or_else(|| payload.id.clone());
    let points = indexed.into_iter().map(|(_, p)| p).collect();
    let series = Series::new(payload.id, label, color, points);
    Ok(match errors {
        Some(errors) => series.with_errors(errors),
        None => series,
    })
}

/// The series available to the current session.
#[derive(Clone, Debug, Default)]
pub struct SeriesRegistry {
    series: BTreeMap<SeriesId, Series>,
    last_error: Option<FetchError>,
}

impl SeriesRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a fetch result.
    ///
    /// On success the snapshot is replaced wholesale. On failure the previous snapshot is
    /// kept and the error is handed back.
    pub fn apply(&mut self, result: Result<Vec<Series>, FetchError>) -> Result<usize, FetchError> {
        match result {
            Ok(series) => {
                self.replace(series);
                self.last_error = None;
                Ok(self.series.len())
            }
            Err(err) => {
                warn!(%err, retained = self.series.len(), "fetch failed, keeping previous series");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Replaces the snapshot. Later duplicates of an id win.
    pub fn replace(&mut self, series: Vec<Series>) {
        self.series.clear();
        for s in series {
            if let Some(previous) = self.series.insert(s.id.clone(), s) {
                warn!(series = %previous.id, "duplicate series id, keeping the later one");
            }
        }
        debug!(count = self.series.len(), "series registry replaced");
    }

    /// Drops every series.
    pub fn clear(&mut self) {
        self.series.clear();
        self.last_error = None;
    }

    /// Looks up a series.
    pub fn get_series(&self, id: &SeriesId) -> Result<&Series, MissingSeries> {
        self.series.get(id).ok_or_else(|| MissingSeries(id.clone()))
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &SeriesId> + '_ {
        self.series.keys()
    }

    /// Series in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Series> + '_ {
        self.series.values()
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if no series are loaded.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The error of the most recent failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }
}

impl SeriesLookup for SeriesRegistry {
    fn series(&self, id: &SeriesId) -> Option<&Series> {
        self.series.get(id)
    }
}
