// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scales.
//!
//! A scale spec carries a data domain; instantiating it with an output range gives a mapping.
//! Plots instantiate against plot space (`0..=100`), axes against view pixels, from the same
//! resolved spec, so ticks and data always agree.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::format::{format_log_tick, format_tick_with_step};
use crate::model::AxisType;
use crate::time;

/// A scale specification (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleSpec {
    /// Continuous linear scale.
    Linear(ScaleLinearSpec),
    /// Continuous log scale.
    Log(ScaleLogSpec),
    /// Linear scale over timestamps in seconds.
    Time(ScaleTimeSpec),
}

impl ScaleSpec {
    /// Builds the spec an axis of `axis_type` uses for `domain`.
    ///
    /// Linear axes round their domain out to nice tick values.
    pub fn for_axis(axis_type: AxisType, domain: (f64, f64)) -> Self {
        match axis_type {
            AxisType::Linear => Self::Linear(ScaleLinearSpec::new(domain).with_nice(true)),
            AxisType::Log => Self::Log(ScaleLogSpec::new(domain)),
            AxisType::Time => Self::Time(ScaleTimeSpec::new(domain)),
        }
    }

    /// Returns the spec with its domain resolved (nice rounding applied).
    pub fn resolved(self, tick_count: usize) -> Self {
        match self {
            Self::Linear(s) => Self::Linear(ScaleLinearSpec::new(s.resolved_domain(tick_count))),
            other => other,
        }
    }

    /// The authored domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain,
            Self::Log(s) => s.domain,
            Self::Time(s) => s.domain,
        }
    }

    /// Instantiates a concrete scale for `range`.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleContinuous {
        match self {
            Self::Linear(s) => ScaleContinuous::Linear(s.instantiate(range)),
            Self::Log(s) => ScaleContinuous::Log(s.instantiate(range)),
            Self::Time(s) => ScaleContinuous::Time(s.instantiate(range)),
        }
    }

    /// Tick values inside the domain, and the tick step used for label precision.
    pub fn ticks(&self, count: usize) -> (Vec<f64>, f64) {
        let scale = self.instantiate((0.0, 1.0));
        let (d0, d1) = self.domain();
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let eps = (hi - lo).abs() * 1e-9;
        let ticks: Vec<f64> = scale
            .ticks(count)
            .into_iter()
            .filter(|v| *v >= lo - eps && *v <= hi + eps)
            .collect();
        let step = match ticks.as_slice() {
            [a, b, ..] => (b - a).abs(),
            _ => 0.0,
        };
        (ticks, step)
    }

    /// Formats a tick label.
    pub fn format_tick(&self, v: f64, step: f64) -> String {
        match self {
            Self::Linear(_) => format_tick_with_step(v, step),
            Self::Log(_) => format_log_tick(v),
            Self::Time(_) => time::format_time_seconds(v, step),
        }
    }
}

impl From<ScaleLinearSpec> for ScaleSpec {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleLogSpec> for ScaleSpec {
    fn from(value: ScaleLogSpec) -> Self {
        Self::Log(value)
    }
}

impl From<ScaleTimeSpec> for ScaleSpec {
    fn from(value: ScaleTimeSpec) -> Self {
        Self::Time(value)
    }
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a range-space position back into the domain.
    pub fn invert(&self, r: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(r),
            Self::Log(s) => s.invert(r),
            Self::Time(s) => s.inner.invert(r),
        }
    }

    /// Returns tick values (possibly extending past the domain).
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns `true` if `x` can be placed on this scale.
    pub fn accepts(&self, x: f64) -> bool {
        match self {
            Self::Log(_) => x.is_finite() && x > 0.0,
            Self::Linear(_) | Self::Time(_) => x.is_finite(),
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to round the domain out to tick values.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        r0 + (x - d0) / denom * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, r: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        d0 + (r - r0) / denom * (d1 - d0)
    }

    /// Returns nice tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        match nice_ticks(self.domain.0, self.domain.1, tick_count).as_slice() {
            [first, .., last] => (*first, *last),
            _ => self.domain,
        }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.domain, range)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;
    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f.min(10_000.0) as u64
        }
    } else {
        0
    };

    // Snap near-zero ticks so labels don't read `-0.0000`.
    (0..=n)
        .map(|i| {
            let v = start + step * i as f64;
            if v.abs() < step * 1e-9 { 0.0 } else { v }
        })
        .collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

/// Specification for a log scale (domain + base, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLogSpec {
    /// Domain in data units (must be positive).
    pub domain: (f64, f64),
    /// Log base (default 10).
    pub base: f64,
}

impl ScaleLog {
    /// Creates a new base-10 log scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    /// Sets the log base; invalid bases fall back to 10.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = if base.is_finite() && base > 0.0 && base != 1.0 {
            base
        } else {
            10.0
        };
        self
    }

    fn log_base(&self, x: f64) -> f64 {
        x.ln() / self.base.ln()
    }

    /// Maps a value into range space. Non-positive inputs map to the range start.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(d0);
        let denom = self.log_base(d1) - ld0;
        if denom == 0.0 {
            return r0;
        }
        r0 + (self.log_base(x) - ld0) / denom * (r1 - r0)
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, r: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 <= 0.0 || d1 <= 0.0 || r1 == r0 {
            return d0;
        }
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let t = (r - r0) / (r1 - r0);
        self.base.powf(ld0 + t * (ld1 - ld0))
    }

    /// Returns the powers of `base` spanning the domain, capped at `count` when non-zero.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let exponent = |v: f64| {
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                v.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
            }
        };
        let min_e = exponent(self.log_base(min).floor());
        let max_e = exponent(self.log_base(max).ceil());
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count.max(2) * 3 {
                break;
            }
        }
        out
    }
}

impl ScaleLogSpec {
    /// Creates a new base-10 log scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain, base: 10.0 }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLog {
        ScaleLog::new(self.domain, range).with_base(self.base)
    }
}

/// A time scale: linear over timestamps in seconds, with time-aware ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

/// Specification for a time scale (domain, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTimeSpec {
    /// Domain in seconds.
    pub domain: (f64, f64),
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Returns second/minute/hour aligned ticks.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.inner.domain;
        time::nice_time_ticks_seconds(d0, d1, count)
    }
}

impl ScaleTimeSpec {
    /// Creates a new time scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleTime {
        ScaleTime::new(self.domain, range)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_maps_and_inverts() {
        let s = ScaleLinear::new((10.0, 20.0), (100.0, 0.0));
        assert_eq!(s.map(10.0), 100.0);
        assert_eq!(s.map(15.0), 50.0);
        assert_eq!(s.invert(0.0), 20.0);
    }

    #[test]
    fn nice_domain_rounds_outwards() {
        let spec = ScaleLinearSpec::new((0.3, 9.2)).with_nice(true);
        assert_eq!(spec.resolved_domain(5), (0.0, 10.0));
    }

    #[test]
    fn log_scale_maps_endpoints_to_range() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0));
        assert!((s.map(1.0) - 0.0).abs() < 1e-9);
        assert!((s.map(10.0) - 5.0).abs() < 1e-9);
        assert!((s.map(100.0) - 10.0).abs() < 1e-9);
        assert!((s.invert(5.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn log_ticks_are_powers_of_ten_within_domain() {
        let spec = ScaleSpec::for_axis(AxisType::Log, (0.5, 2000.0));
        let (ticks, _) = spec.ticks(5);
        assert_eq!(ticks, [1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn spec_ticks_stay_inside_domain() {
        let spec = ScaleSpec::for_axis(AxisType::Time, (5.0, 290.0));
        let (ticks, step) = spec.ticks(5);
        assert!(ticks.iter().all(|t| (5.0..=290.0).contains(t)));
        assert_eq!(step, 60.0);
    }

    #[test]
    fn degenerate_domains_do_not_divide_by_zero() {
        let s = ScaleLinear::new((3.0, 3.0), (0.0, 100.0));
        assert_eq!(s.map(3.0), 0.0);
        assert!(nice_ticks(f64::NAN, 1.0, 5).is_empty());
    }
}
