// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene marks.
//!
//! A mark is a typed, fully-resolved drawing primitive with a stable id and a z-index. Charts
//! emit marks; painters draw them. Geometry is either in view space (pixels) or in plot space,
//! where both axes run `0..=100` across the plot rectangle (see [`crate::Scene::plot_to_view`]).
//!
//! Stroke widths, circle radii and font sizes are always in view units so that the plot-space
//! mapping never distorts them.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;

/// Stable identifier of a mark within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Coordinate space a mark's geometry is expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordinateSpace {
    /// Pixels of the viewport.
    #[default]
    View,
    /// Plot-local percentages, `0..=100` on both axes, `y` growing downwards.
    Plot,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Anchor is the vertical middle of the text.
    Middle,
    /// Anchor is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// Anchor is the top of the text.
    Hanging,
}

/// An open polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineMark {
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in view units.
    pub stroke_width: f64,
}

/// A filled polygon (implicitly closed).
#[derive(Clone, Debug, PartialEq)]
pub struct AreaMark {
    /// Polygon vertices.
    pub points: Vec<Point>,
    /// Fill paint.
    pub fill: Brush,
}

/// An axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle geometry.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Outline paint and width in view units, if outlined.
    pub stroke: Option<(Brush, f64)>,
}

/// A filled circle.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleMark {
    /// Center.
    pub center: Point,
    /// Radius in view units.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in view units.
    pub font_size: f64,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// Discriminant of a [`MarkPayload`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// [`PolylineMark`].
    Polyline,
    /// [`AreaMark`].
    Area,
    /// [`RectMark`].
    Rect,
    /// [`CircleMark`].
    Circle,
    /// [`TextMark`].
    Text,
}

/// Geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Open polyline.
    Polyline(PolylineMark),
    /// Filled polygon.
    Area(AreaMark),
    /// Rectangle.
    Rect(RectMark),
    /// Circle.
    Circle(CircleMark),
    /// Text.
    Text(TextMark),
}

impl MarkPayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Polyline(_) => MarkKind::Polyline,
            Self::Area(_) => MarkKind::Area,
            Self::Rect(_) => MarkKind::Rect,
            Self::Circle(_) => MarkKind::Circle,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns the geometric anchor points of the payload.
    ///
    /// For text this is just the anchor position; circles report their center.
    pub fn anchor_points(&self) -> Vec<Point> {
        match self {
            Self::Polyline(m) => m.points.clone(),
            Self::Area(m) => m.points.clone(),
            Self::Rect(m) => alloc::vec![
                Point::new(m.rect.x0, m.rect.y0),
                Point::new(m.rect.x1, m.rect.y1)
            ],
            Self::Circle(m) => alloc::vec![m.center],
            Self::Text(m) => alloc::vec![m.pos],
        }
    }

    /// Returns the text of a text payload.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(m) => Some(&m.text),
            _ => None,
        }
    }
}

/// A drawable mark.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id, also the paint-order tie-break.
    pub id: MarkId,
    /// Paint order; higher draws on top.
    pub z_index: i32,
    /// Space the geometry is expressed in.
    pub space: CoordinateSpace,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a view-space mark at z-index 0.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            space: CoordinateSpace::View,
            payload,
        }
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Marks the geometry as plot-space.
    pub fn in_plot_space(mut self) -> Self {
        self.space = CoordinateSpace::Plot;
        self
    }

    /// Returns the payload kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}
