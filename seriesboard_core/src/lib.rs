// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared data model for seriesboard.
//!
//! This crate holds the pieces every other layer agrees on:
//! - **Series** data as fetched from a result provider, and the [`SeriesLookup`] seam used by
//!   filtering and rendering.
//! - **Identifiers** for charts, plots and conditions, with a high-water allocator so ids are
//!   never reused.
//! - **Scene marks**: the declarative output of chart rendering, consumed by a separate painter.
//!
//! Text shaping is out of scope; text marks store unshaped strings.

#![no_std]

extern crate alloc;

mod color;
mod ids;
mod mark;
mod scene;
mod series;

pub use color::{ColorParseError, PALETTE, Rgba, palette_color};
pub use ids::{AnalysisId, ChartId, ConditionId, IdHighWater, PlotId, SeriesId};
pub use mark::{
    AreaMark, CircleMark, CoordinateSpace, Mark, MarkId, MarkKind, MarkPayload, PolylineMark,
    RectMark, TextAnchor, TextBaseline, TextMark,
};
pub use scene::{PLOT_EXTENT, RenderDiagnostics, Scene};
pub use series::{DataPoint, MissingSeries, Series, SeriesLookup};
