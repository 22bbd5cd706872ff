// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dashboard sessions for seriesboard.
//!
//! A [`Dashboard`] owns the charts built for one analysis, the [`SeriesRegistry`] they read
//! from, and at most one [`ChartEditor`]. Results arrive through a [`SeriesProvider`]; the
//! dashboard never awaits while borrowed, see [`fetch`] for the three-step protocol.
//!
//! ```
//! use seriesboard_core::{AnalysisId, SeriesId};
//! use seriesboard_dashboard::{Dashboard, InMemorySeries, SeriesPayload, fetch};
//!
//! let provider = InMemorySeries::new()
//!     .with_series("a1", vec![SeriesPayload::new("flux", [(0.0, 1.0), (1.0, 3.0)])]);
//! let mut dashboard = Dashboard::default();
//! let ticket = dashboard.open_dashboard(AnalysisId::from("a1"));
//! dashboard.complete_fetch(pollster::block_on(fetch(&provider, ticket)));
//!
//! let chart = dashboard.add_chart();
//! dashboard.add_plot_to_chart(chart, SeriesId::from("flux"));
//! let scene = dashboard.render_chart(chart, dashboard.config().viewport());
//! assert!(scene.is_some());
//! ```

mod config;
mod dashboard;
mod editor;
mod provider;
mod registry;
mod store;
mod ui;

pub use config::{ConfigError, DashboardConfig, ViewportSize};
pub use dashboard::{
    Banner, Dashboard, DashboardLayout, EditorState, FetchCompletion, FetchTicket, LayoutError,
    LoadState, fetch,
};
pub use editor::{ChartEditor, EditorTab};
pub use provider::{
    FetchError, InMemoryPresets, InMemorySeries, JobStatus, ParameterSetProvider, SeriesPayload,
    SeriesProvider,
};
pub use registry::{SeriesRegistry, fetch_series, validate_payload};
pub use store::{JsonFileStore, LayoutId, LayoutStore, MemoryStore, StoreError};
pub use ui::{AnalysisBackend, UiContext};
