// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host UI state a dashboard reads but does not own.

use serde::{Deserialize, Serialize};
use seriesboard_charts::ThemeKind;

/// Library that computed the analysis results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisBackend {
    /// Stingray (X-ray timing).
    #[default]
    Stingray,
    /// Lightkurve (Kepler/TESS light curves).
    Lightkurve,
    /// Astropy time-series tools.
    Astropy,
}

/// Theme, backend and sidebar state, passed into the dashboard explicitly.
///
/// Defaults: light theme, Stingray backend, sidebar open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiContext {
    theme: ThemeKind,
    backend: AnalysisBackend,
    sidebar_open: bool,
}

impl Default for UiContext {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Light,
            backend: AnalysisBackend::Stingray,
            sidebar_open: true,
        }
    }
}

impl UiContext {
    /// Current theme.
    pub fn theme(&self) -> ThemeKind {
        self.theme
    }

    /// Switches theme.
    pub fn set_theme(&mut self, theme: ThemeKind) {
        self.theme = theme;
    }

    /// Current analysis backend.
    pub fn backend(&self) -> AnalysisBackend {
        self.backend
    }

    /// Switches analysis backend.
    pub fn set_backend(&mut self, backend: AnalysisBackend) {
        self.backend = backend;
    }

    /// Whether the sidebar is open.
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Opens or closes the sidebar.
    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    /// Flips the sidebar and returns the new state.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_partial_json() {
        let ui = UiContext::default();
        assert_eq!(ui.theme(), ThemeKind::Light);
        assert_eq!(ui.backend(), AnalysisBackend::Stingray);
        assert!(ui.sidebar_open());

        let mut ui: UiContext = serde_json::from_str(r#"{"backend":"lightkurve"}"#).unwrap();
        assert_eq!(ui.backend(), AnalysisBackend::Lightkurve);
        assert!(!ui.toggle_sidebar());
    }
}
