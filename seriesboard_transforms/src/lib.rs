// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point filters for seriesboard.
//!
//! A plot shows the subset of its source series selected by a [`FilterSpec`]: a list of small
//! comparison expressions (`> 3`, `$background <= 0.5`) combined with `All`/`Any` and applied as
//! either a keep- or a remove-filter. Evaluation is total: malformed expressions are dropped and
//! counted rather than failing the whole filter.

#![no_std]

extern crate alloc;

mod expression;
mod filter;
mod preset;

pub use expression::{CompareOp, Expression, FilterExpressionError, Operand};
pub use filter::{
    EmptyConditions, FilterCondition, FilterConfig, FilterDiagnostics, FilterMethod, FilterOutcome,
    FilterSpec, MatchType, evaluate,
};
pub use preset::FilterPreset;
