// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter specs and their evaluation.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use seriesboard_core::{ConditionId, DataPoint, IdHighWater, Series, SeriesId, SeriesLookup};
use smallvec::SmallVec;

use crate::expression::{Expression, FilterExpressionError, Operand};

/// Whether matching points are kept or removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMethod {
    /// Keep points where the combined predicate holds.
    #[default]
    Keep,
    /// Remove points where the combined predicate holds.
    Remove,
}

/// How condition predicates are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Logical AND.
    #[default]
    All,
    /// Logical OR.
    Any,
}

/// One user-authored condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Id, unique within the owning filter.
    pub id: ConditionId,
    /// Expression source text, parsed at evaluation time.
    pub expression: String,
}

impl FilterCondition {
    /// Creates a condition.
    pub fn new(id: ConditionId, expression: impl Into<String>) -> Self {
        Self {
            id,
            expression: expression.into(),
        }
    }

    /// Parses the expression text.
    pub fn parse(&self) -> Result<Expression, FilterExpressionError> {
        Expression::parse(&self.expression)
    }
}

/// A plot's filter: method, combination and ordered conditions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Keep or remove matching points.
    #[serde(default)]
    pub method: FilterMethod,
    /// AND or OR combination.
    #[serde(default)]
    pub match_type: MatchType,
    /// Conditions in display/evaluation order.
    #[serde(default)]
    pub conditions: Vec<FilterCondition>,
    /// Last condition id issued, so ids are never reused.
    #[serde(default)]
    pub condition_id_high_water: IdHighWater,
}

impl FilterSpec {
    /// Creates an empty keep-all filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method.
    pub fn with_method(mut self, method: FilterMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the match type.
    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    /// Appends a condition, builder style.
    pub fn with_condition(mut self, expression: impl Into<String>) -> Self {
        self.add_condition(expression);
        self
    }

    /// Appends a condition with a fresh id.
    pub fn add_condition(&mut self, expression: impl Into<String>) -> ConditionId {
        let id = ConditionId(
            self.condition_id_high_water
                .issue(self.conditions.iter().map(|c| c.id.get())),
        );
        self.conditions.push(FilterCondition::new(id, expression));
        id
    }

    /// Replaces a condition's expression. Returns `false` if `id` is unknown.
    pub fn edit_condition(&mut self, id: ConditionId, expression: impl Into<String>) -> bool {
        match self.conditions.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.expression = expression.into();
                true
            }
            None => false,
        }
    }

    /// Removes a condition. Returns `false` if `id` is unknown.
    pub fn remove_condition(&mut self, id: ConditionId) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.id != id);
        self.conditions.len() != before
    }

    /// Returns the condition with `id`.
    pub fn condition(&self, id: ConditionId) -> Option<&FilterCondition> {
        self.conditions.iter().find(|c| c.id == id)
    }

    /// Replaces all conditions, keeping the id allocator ahead of the new ids.
    pub fn set_conditions(&mut self, conditions: Vec<FilterCondition>) {
        for c in &conditions {
            self.condition_id_high_water.observe(c.id.get());
        }
        self.conditions = conditions;
    }

    /// Parse (and resolution) errors per condition, in condition order.
    ///
    /// Conditions that would be dropped during evaluation are exactly the ones listed here.
    pub fn condition_errors<L: SeriesLookup + ?Sized>(
        &self,
        lookup: &L,
    ) -> Vec<(ConditionId, FilterExpressionError)> {
        self.conditions
            .iter()
            .filter_map(|c| match c.parse() {
                Ok(Expression {
                    operand: Operand::Series(id),
                    ..
                }) if lookup.series(&id).is_none() => {
                    Some((c.id, FilterExpressionError::UnknownSeries(id)))
                }
                Ok(_) => None,
                Err(e) => Some((c.id, e)),
            })
            .collect()
    }
}

/// What an empty (or entirely dropped) condition list means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyConditions {
    /// `All` is vacuously true and `Any` vacuously false; the method then applies as usual.
    #[default]
    Vacuous,
    /// Every point is included, whatever the method.
    IncludeAll,
    /// No point is included, whatever the method.
    IncludeNone,
}

/// Evaluation settings shared by every filter in a dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Convention for filters without usable conditions.
    pub empty_conditions: EmptyConditions,
}

/// Problems worked around during one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterDiagnostics {
    /// Conditions left out of the combination (malformed, or referencing unknown series).
    pub dropped_conditions: usize,
    /// `(point, $ref predicate)` pairs where no aligned reference value existed.
    pub unaligned_references: usize,
}

/// Result of evaluating a filter over a series.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Indices of included points, ascending.
    pub included: Vec<usize>,
    /// Indices of excluded points, ascending.
    pub excluded: Vec<usize>,
    /// Problems worked around.
    pub diagnostics: FilterDiagnostics,
}

impl FilterOutcome {
    /// Iterates over the included points of `source` with their indices.
    pub fn included_points<'a>(
        &'a self,
        source: &'a Series,
    ) -> impl Iterator<Item = (usize, DataPoint)> + 'a {
        self.included
            .iter()
            .filter_map(|&i| source.points.get(i).map(|p| (i, *p)))
    }
}

/// Evaluates `filter` over every point of `source`.
///
/// Each usable condition becomes a predicate on the point's own value or on a referenced
/// series' aligned value. Predicates combine with AND (`All`) or OR (`Any`), and a point is
/// included iff the combined result equals `method == Keep`.
pub fn evaluate<'a, L: SeriesLookup + ?Sized>(
    source: &Series,
    filter: &FilterSpec,
    lookup: &'a L,
    config: &FilterConfig,
) -> FilterOutcome {
    let mut diagnostics = FilterDiagnostics::default();
    let mut resolved: HashMap<SeriesId, Option<&'a Series>> = HashMap::new();
    let mut predicates: SmallVec<[(Expression, Option<&'a Series>); 4]> = SmallVec::new();

    for condition in &filter.conditions {
        let Ok(expr) = condition.parse() else {
            diagnostics.dropped_conditions += 1;
            continue;
        };
        let reference = match &expr.operand {
            Operand::Value => None,
            Operand::Series(id) => {
                let found = *resolved
                    .entry(id.clone())
                    .or_insert_with(|| lookup.series(id));
                match found {
                    Some(series) => Some(series),
                    None => {
                        diagnostics.dropped_conditions += 1;
                        continue;
                    }
                }
            }
        };
        predicates.push((expr, reference));
    }

    let keep = filter.method == FilterMethod::Keep;
    let empty_result = match config.empty_conditions {
        EmptyConditions::Vacuous => filter.match_type == MatchType::All,
        EmptyConditions::IncludeAll => keep,
        EmptyConditions::IncludeNone => !keep,
    };

    let mut included = Vec::new();
    let mut excluded = Vec::new();
    for (i, point) in source.points.iter().enumerate() {
        let combined = if predicates.is_empty() {
            empty_result
        } else {
            let mut holds = |(expr, reference): &(Expression, Option<&Series>)| {
                let operand = match reference {
                    None => Some(point.value),
                    Some(series) => series.aligned_value(i, point.t),
                };
                match operand {
                    Some(v) => expr.eval(v),
                    None => {
                        diagnostics.unaligned_references += 1;
                        false
                    }
                }
            };
            match filter.match_type {
                MatchType::All => predicates.iter().all(&mut holds),
                MatchType::Any => predicates.iter().any(&mut holds),
            }
        };
        if combined == keep {
            included.push(i);
        } else {
            excluded.push(i);
        }
    }

    FilterOutcome {
        included,
        excluded,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use seriesboard_core::Rgba;

    use super::*;

    const NO_SERIES: &[Series] = &[];

    fn series(id: &str, points: &[(f64, f64)]) -> Series {
        Series::new(
            id,
            id,
            Rgba::rgb(0, 0, 0),
            points.iter().map(|&(t, v)| DataPoint::new(t, v)).collect(),
        )
    }

    fn values(vs: &[f64]) -> Series {
        let points: Vec<(f64, f64)> = vs.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect();
        series("s", &points)
    }

    fn run(source: &Series, filter: &FilterSpec, lookup: &[Series]) -> FilterOutcome {
        evaluate(source, filter, lookup, &FilterConfig::default())
    }

    #[test]
    fn keep_all_greater_than_three() {
        let s = values(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let f = FilterSpec::new().with_condition("> 3");
        let out = run(&s, &f, &[]);
        assert_eq!(out.included, [3, 4]);
        assert_eq!(out.excluded, [0, 1, 2]);
        assert_eq!(out.diagnostics, FilterDiagnostics::default());
    }

    #[test]
    fn remove_inverts_the_selection() {
        let s = values(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let f = FilterSpec::new()
            .with_method(FilterMethod::Remove)
            .with_condition("> 3");
        assert_eq!(run(&s, &f, &[]).included, [0, 1, 2]);
    }

    #[test]
    fn any_combines_with_or() {
        let s = values(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let f = FilterSpec::new()
            .with_match_type(MatchType::Any)
            .with_condition("< 2")
            .with_condition(">= 5");
        assert_eq!(run(&s, &f, &[]).included, [0, 4]);
    }

    #[test]
    fn empty_conditions_follow_vacuous_truth() {
        let s = values(&[1.0, 2.0, 3.0]);
        let all = FilterSpec::new();
        assert_eq!(run(&s, &all, &[]).included, [0, 1, 2]);
        let any = FilterSpec::new().with_match_type(MatchType::Any);
        assert!(run(&s, &any, &[]).included.is_empty());
    }

    #[test]
    fn empty_condition_convention_is_configurable() {
        let s = values(&[1.0, 2.0]);
        let any = FilterSpec::new().with_match_type(MatchType::Any);
        let include_all = FilterConfig {
            empty_conditions: EmptyConditions::IncludeAll,
        };
        assert_eq!(evaluate(&s, &any, NO_SERIES, &include_all).included, [0, 1]);

        let remove = FilterSpec::new().with_method(FilterMethod::Remove);
        let include_none = FilterConfig {
            empty_conditions: EmptyConditions::IncludeNone,
        };
        assert!(evaluate(&s, &remove, NO_SERIES, &include_none).included.is_empty());
    }

    #[test]
    fn malformed_conditions_are_dropped_and_counted() {
        let s = values(&[1.0, 2.0, 3.0, 4.0]);
        let f = FilterSpec::new()
            .with_condition("> 2")
            .with_condition("bogus")
            .with_condition("$nowhere < 1");
        let out = run(&s, &f, &[]);
        assert_eq!(out.included, [2, 3]);
        assert_eq!(out.diagnostics.dropped_conditions, 2);
    }

    #[test]
    fn all_dropped_falls_back_to_empty_convention() {
        let s = values(&[1.0, 2.0]);
        let f = FilterSpec::new().with_condition(">>");
        let out = run(&s, &f, &[]);
        assert_eq!(out.included, [0, 1]);
        assert_eq!(out.diagnostics.dropped_conditions, 1);
    }

    #[test]
    fn references_align_by_index_then_timestamp() {
        let s = series("flux", &[(0.0, 10.0), (1.0, 11.0), (2.0, 12.0), (3.0, 13.0)]);
        // Same length and timestamps for the first two points, then shifted.
        let bg = series("bg", &[(0.0, 0.1), (1.0, 0.9), (3.0, 0.2)]);
        let f = FilterSpec::new().with_condition("$bg < 0.5");
        let lookup = [bg];
        let out = run(&s, &f, &lookup);
        assert_eq!(out.included, [0, 3]);
        // t = 2.0 has no counterpart in `bg`.
        assert_eq!(out.diagnostics.unaligned_references, 1);
    }

    #[test]
    fn condition_ids_are_not_reused() {
        let mut f = FilterSpec::new();
        let a = f.add_condition("> 1");
        let b = f.add_condition("> 2");
        assert!(f.remove_condition(b));
        let c = f.add_condition("> 3");
        assert_eq!((a, b, c), (ConditionId(1), ConditionId(2), ConditionId(3)));
        assert!(f.edit_condition(a, "< 0"));
        assert_eq!(f.condition(a).map(|c| c.expression.as_str()), Some("< 0"));
        assert!(!f.edit_condition(ConditionId(9), "< 0"));
    }

    #[test]
    fn condition_errors_match_dropped_conditions() {
        let f = FilterSpec::new()
            .with_condition("> 1")
            .with_condition("?")
            .with_condition("$gone > 1");
        let errors = f.condition_errors(NO_SERIES);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].0, ConditionId(2));
        assert_eq!(
            errors[1].1,
            FilterExpressionError::UnknownSeries(SeriesId::new("gone"))
        );
    }
}
