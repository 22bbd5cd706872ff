// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for tick labels and tooltips.

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a linear tick with just enough decimals to tell neighbouring ticks apart.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    if !(step.is_finite() && step > 0.0) {
        return format_value(v);
    }
    let decimals = decimals_for((-step.log10() - 1e-9).ceil());
    alloc::format!("{v:.decimals$}")
}

/// Formats a log-axis tick (a power of the base).
pub fn format_log_tick(v: f64) -> String {
    if v.is_finite() && (1e-3..1e5).contains(&v) {
        format_value(v)
    } else {
        alloc::format!("{v:e}")
    }
}

/// Formats an arbitrary value with about four significant digits.
pub fn format_value(v: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    if v == 0.0 {
        return String::from("0");
    }
    let magnitude = v.abs();
    if !(1e-3..1e5).contains(&magnitude) {
        return alloc::format!("{v:.3e}");
    }
    let decimals = decimals_for(3.0 - magnitude.log10().floor());
    let s = alloc::format!("{v:.decimals$}");
    if s.contains('.') {
        String::from(s.trim_end_matches('0').trim_end_matches('.'))
    } else {
        s
    }
}

fn decimals_for(d: f64) -> usize {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped to a small non-negative range"
    )]
    {
        d.clamp(0.0, 6.0) as usize
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn step_controls_precision() {
        assert_eq!(format_tick_with_step(2.0, 1.0), "2");
        assert_eq!(format_tick_with_step(0.5, 0.5), "0.5");
        assert_eq!(format_tick_with_step(0.25, 0.05), "0.25");
        assert_eq!(format_tick_with_step(1500.0, 500.0), "1500");
    }

    #[test]
    fn values_use_significant_digits() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(3.14159), "3.142");
        assert_eq!(format_value(-40.0), "-40");
        assert_eq!(format_value(123456.0), "1.235e5");
    }

    #[test]
    fn log_ticks_switch_to_exponents_at_extremes() {
        assert_eq!(format_log_tick(100.0), "100");
        assert_eq!(format_log_tick(1e6), "1e6");
        assert_eq!(format_log_tick(1e-4), "1e-4");
    }
}
