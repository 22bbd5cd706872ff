// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time ticks and labels.
//!
//! Timestamps are seconds. Ticks snap to second/minute/hour steps and labels read
//! `s`, `m:ss` or `h:mm:ss` depending on the step.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;

/// Returns tick values covering `[min, max]` on second/minute/hour boundaries.
pub fn nice_time_ticks_seconds(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    let step = nice_time_step_seconds((max - min) / count as f64);
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

    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_time_step_seconds(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    // Sub-second spans (e.g. short light-curve cadences) fall back to decimal steps.
    if step < 1.0 {
        let base = 10_f64.powf(step.log10().floor());
        return [1.0, 2.0, 5.0, 10.0]
            .into_iter()
            .map(|m| m * base)
            .find(|s| *s >= step)
            .unwrap_or(1.0);
    }
    const STEPS: [f64; 17] = [
        1.0,
        2.0,
        5.0,
        10.0,
        15.0,
        30.0,
        MINUTE,
        2.0 * MINUTE,
        5.0 * MINUTE,
        10.0 * MINUTE,
        15.0 * MINUTE,
        30.0 * MINUTE,
        HOUR,
        2.0 * HOUR,
        3.0 * HOUR,
        6.0 * HOUR,
        12.0 * HOUR,
    ];
    STEPS
        .into_iter()
        .find(|s| *s >= step)
        .unwrap_or_else(|| (step / HOUR).ceil().max(1.0) * HOUR)
}

/// Formats a timestamp (seconds) for a tick spaced `step` seconds from its neighbours.
pub fn format_time_seconds(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let step = step.abs();
    if step > 0.0 && step < 1.0 {
        return crate::format::format_tick_with_step(v, step);
    }

    let sign = if v < 0.0 { "-" } else { "" };
    let secs = {
        #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
        {
            v.abs().round().min(i64::MAX as f64) as i64
        }
    };
    let h = secs / 3600;
    let m = (secs / 60) % 60;
    let s = secs % 60;

    if step >= HOUR || h > 0 {
        alloc::format!("{sign}{h}:{m:02}:{s:02}")
    } else if step >= MINUTE || m > 0 {
        alloc::format!("{sign}{m}:{s:02}")
    } else {
        alloc::format!("{sign}{s}")
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn minute_spans_get_minute_steps() {
        let ticks = nice_time_ticks_seconds(0.0, 300.0, 5);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks[1] - ticks[0], 60.0);
    }

    #[test]
    fn labels_grow_with_magnitude() {
        assert_eq!(format_time_seconds(5.0, 1.0), "5");
        assert_eq!(format_time_seconds(65.0, 1.0), "1:05");
        assert_eq!(format_time_seconds(3723.0, 60.0), "1:02:03");
        assert_eq!(format_time_seconds(-90.0, 30.0), "-1:30");
    }

    #[test]
    fn sub_second_spans_use_decimal_steps() {
        let ticks = nice_time_ticks_seconds(0.0, 0.5, 5);
        assert!(ticks.len() >= 3, "expected several ticks, got {ticks:?}");
        assert!(ticks[1] - ticks[0] < 1.0);
        assert_eq!(format_time_seconds(0.2, 0.1), "0.2");
    }
}
