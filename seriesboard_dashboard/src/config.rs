// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dashboard settings loaded from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use seriesboard_charts::{ChartTheme, Renderer, ThemeKind, Viewport};
use seriesboard_transforms::FilterConfig;

/// Why a config file could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid config JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Size charts are rendered at when the host does not say otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Width in view units.
    pub width: f64,
    /// Height in view units.
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 360.0,
        }
    }
}

/// Dashboard-wide settings. Every field is optional in JSON.
///
/// | field | default |
/// |---|---|
/// | `filter.empty_conditions` | `vacuous` |
/// | `tick_count` | `5` |
/// | `default_viewport` | `640 x 360` |
/// | `theme` | `light` (seeds the UI context when the dashboard is created) |
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Filter conventions.
    pub filter: FilterConfig,
    /// Approximate ticks per axis.
    pub tick_count: usize,
    /// Default render size.
    pub default_viewport: ViewportSize,
    /// Theme the dashboard starts with; see [`Dashboard::new`](crate::Dashboard::new).
    pub theme: ThemeKind,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            tick_count: 5,
            default_viewport: ViewportSize::default(),
            theme: ThemeKind::Light,
        }
    }
}

impl DashboardConfig {
    /// Parses config JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// A renderer using these settings and `theme`.
    pub fn renderer(&self, theme: ThemeKind) -> Renderer {
        Renderer::default()
            .with_theme(ChartTheme::for_kind(theme))
            .with_filter_config(self.filter)
            .with_tick_count(self.tick_count)
    }

    /// The default viewport, without hover.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.default_viewport.width, self.default_viewport.height)
    }
}

#[cfg(test)]
mod tests {
    use seriesboard_transforms::EmptyConditions;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = DashboardConfig::from_json(r#"{"tick_count": 8}"#).unwrap();
        assert_eq!(config.tick_count, 8);
        assert_eq!(config.filter.empty_conditions, EmptyConditions::Vacuous);
        assert_eq!(config.viewport(), Viewport::new(640.0, 360.0));

        let config =
            DashboardConfig::from_json(r#"{"filter": {"empty_conditions": "include_all"}}"#)
                .unwrap();
        assert_eq!(config.filter.empty_conditions, EmptyConditions::IncludeAll);
    }

    #[test]
    fn unreadable_files_are_io_errors() {
        let err = DashboardConfig::load_from_file("/nonexistent/seriesboard.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(matches!(
            DashboardConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
