// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use seriesboard_core::IdHighWater;
use tracing::debug;

use crate::dashboard::DashboardLayout;

/// Handle of a saved layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutId(pub u64);

/// Why a layout could not be saved or loaded.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No layout under this id.
    #[error("layout {0:?} not found")]
    NotFound(LayoutId),
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The stored layout is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where dashboard layouts are kept between sessions.
pub trait LayoutStore {
    /// Saves `layout` under a fresh id.
    fn save(&mut self, layout: &DashboardLayout) -> Result<LayoutId, StoreError>;

    /// Loads a previously saved layout.
    fn load(&self, id: LayoutId) -> Result<DashboardLayout, StoreError>;
}

/// Layouts held in memory for the lifetime of the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    layouts: BTreeMap<LayoutId, DashboardLayout>,
    ids: IdHighWater,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LayoutStore for MemoryStore {
    fn save(&mut self, layout: &DashboardLayout) -> Result<LayoutId, StoreError> {
        let id = LayoutId(self.ids.issue(self.layouts.keys().map(|id| id.0)));
        self.layouts.insert(id, layout.clone());
        Ok(id)
    }

    fn load(&self, id: LayoutId) -> Result<DashboardLayout, StoreError> {
        self.layouts.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }
}

/// Layouts as `layout-<id>.json` files in one directory.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Uses `dir`, creating it if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, id: LayoutId) -> PathBuf {
        self.dir.join(format!("layout-{}.json", id.0))
    }

    fn existing_ids(&self) -> Result<Vec<u64>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name();
            let id = name
                .to_str()
                .and_then(|n| n.strip_prefix("layout-"))
                .and_then(|n| n.strip_suffix(".json"))
                .and_then(|n| n.parse::<u64>().ok());
            ids.extend(id);
        }
        Ok(ids)
    }
}

impl LayoutStore for JsonFileStore {
    fn save(&mut self, layout: &DashboardLayout) -> Result<LayoutId, StoreError> {
        let id = LayoutId(IdHighWater::new().issue(self.existing_ids()?));
        let data = serde_json::to_vec_pretty(layout)?;
        let path = self.path(id);
        fs::write(&path, data)?;
        debug!(path = %path.display(), "saved layout");
        Ok(id)
    }

    fn load(&self, id: LayoutId) -> Result<DashboardLayout, StoreError> {
        let path = self.path(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use seriesboard_charts::Chart;
    use seriesboard_core::{AnalysisId, ChartId, SeriesId};

    use super::*;

    fn layout() -> DashboardLayout {
        DashboardLayout {
            analysis_id: Some(AnalysisId::from("a1")),
            charts: vec![Chart::new(ChartId(2)).add_plot(SeriesId::from("flux"))],
            next_chart_id: ChartId(3),
        }
    }

    #[test]
    fn memory_store_round_trips_and_reports_unknown_ids() {
        let mut store = MemoryStore::new();
        let a = store.save(&layout()).unwrap();
        let b = store.save(&layout()).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.load(a).unwrap(), layout());
        assert!(matches!(store.load(LayoutId(99)), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn file_store_writes_json_files() {
        let dir = std::env::temp_dir().join(format!("seriesboard-store-{}", std::process::id()));
        let mut store = JsonFileStore::open(&dir).unwrap();
        let id = store.save(&layout()).unwrap();
        assert!(dir.join(format!("layout-{}.json", id.0)).exists());
        assert_eq!(store.load(id).unwrap(), layout());
        let next = store.save(&layout()).unwrap();
        assert!(next.0 > id.0);
        assert!(matches!(store.load(LayoutId(0)), Err(StoreError::NotFound(_))));
        fs::remove_dir_all(&dir).unwrap();
    }
}
