// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named filter presets ("parameter sets").

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterMethod, FilterSpec, MatchType};

/// A reusable filter, keyed by the kind of analysis it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPreset {
    /// Display name.
    pub name: String,
    /// Analysis kind this preset targets (e.g. `"light_curve"`).
    pub analysis_type: String,
    /// Whether the preset is shared with every user.
    ///
    /// Carried for the host's preset store; lookups by analysis type ignore it.
    #[serde(default)]
    pub is_public: bool,
    /// Keep or remove.
    #[serde(default)]
    pub method: FilterMethod,
    /// AND or OR.
    #[serde(default)]
    pub match_type: MatchType,
    /// Condition expressions in order.
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl FilterPreset {
    /// Creates an empty preset.
    pub fn new(name: impl Into<String>, analysis_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            analysis_type: analysis_type.into(),
            is_public: false,
            method: FilterMethod::default(),
            match_type: MatchType::default(),
            conditions: Vec::new(),
        }
    }

    /// Adds a condition expression.
    pub fn with_condition(mut self, expression: impl Into<String>) -> Self {
        self.conditions.push(expression.into());
        self
    }

    /// Sets method and match type.
    pub fn with_combination(mut self, method: FilterMethod, match_type: MatchType) -> Self {
        self.method = method;
        self.match_type = match_type;
        self
    }

    /// Marks the preset as shared.
    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// Overwrites `filter` with this preset.
    ///
    /// The previous conditions are removed and the preset's expressions are added with fresh
    /// ids, exactly as if they had been typed in; the id allocator keeps its high-water mark.
    pub fn apply_to(&self, filter: &mut FilterSpec) {
        filter.method = self.method;
        filter.match_type = self.match_type;
        filter.conditions.clear();
        for expression in &self.conditions {
            filter.add_condition(expression.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use seriesboard_core::ConditionId;

    use super::*;

    #[test]
    fn applying_a_preset_replaces_conditions_with_fresh_ids() {
        let mut filter = FilterSpec::new().with_condition("> 0").with_condition("< 9");
        let preset = FilterPreset::new("bright", "light_curve")
            .with_combination(FilterMethod::Remove, MatchType::Any)
            .with_condition("< 100")
            .with_condition("$quality != 0");
        preset.apply_to(&mut filter);

        assert_eq!(filter.method, FilterMethod::Remove);
        assert_eq!(filter.match_type, MatchType::Any);
        let ids: Vec<ConditionId> = filter.conditions.iter().map(|c| c.id).collect();
        assert_eq!(ids, [ConditionId(3), ConditionId(4)]);
        assert_eq!(filter.conditions[1].expression, "$quality != 0");
    }

    #[test]
    fn presets_deserialize_with_defaults() {
        let preset: FilterPreset =
            serde_json::from_str(r#"{"name":"all","analysis_type":"power_spectrum"}"#).unwrap();
        assert!(!preset.is_public);
        assert!(preset.conditions.is_empty());
        assert_eq!(preset.match_type, MatchType::All);
    }
}
