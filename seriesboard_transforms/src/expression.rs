// Copyright 2025 the SeriesBoard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter expressions.
//!
//! ```text
//! expression := [ "$" series-ref ] comparator number
//! comparator := "<" | "<=" | ">" | ">=" | "==" | "=" | "!="
//! ```
//!
//! Without a reference the comparison reads the filtered series' own value; with `$name` it
//! reads the aligned value of series `name`.

use alloc::string::{String, ToString};

use seriesboard_core::SeriesId;

/// Numeric comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==` or `=` (exact float equality)
    Eq,
    /// `!=` (exact float inequality)
    Ne,
}

impl CompareOp {
    /// Applies the comparison `lhs op rhs`.
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
        }
    }

    /// Canonical textual form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }

    /// Splits a leading comparator off `s`; two-character forms win over one-character ones.
    fn split_prefix(s: &str) -> Option<(Self, &str)> {
        const OPS: [(&str, CompareOp); 7] = [
            ("<=", CompareOp::Le),
            (">=", CompareOp::Ge),
            ("==", CompareOp::Eq),
            ("!=", CompareOp::Ne),
            ("<", CompareOp::Lt),
            (">", CompareOp::Gt),
            ("=", CompareOp::Eq),
        ];
        OPS.iter()
            .find_map(|&(text, op)| s.strip_prefix(text).map(|rest| (op, rest)))
    }
}

/// Left-hand side of a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The filtered series' own value.
    Value,
    /// The aligned value of another series.
    Series(SeriesId),
}

/// A parsed filter expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    /// What is compared.
    pub operand: Operand,
    /// Comparison operator.
    pub op: CompareOp,
    /// Right-hand constant.
    pub value: f64,
}

/// Why an expression could not be parsed (or resolved).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FilterExpressionError {
    /// The expression is blank.
    #[error("expression is empty")]
    Empty,
    /// `$` is not followed by a series name.
    #[error("expected a series name after `$`")]
    MissingSeriesName,
    /// No comparator where one was expected.
    #[error("expected one of < <= > >= == = != before `{0}`")]
    UnknownComparator(String),
    /// Nothing follows the comparator.
    #[error("expected a number after the comparator")]
    MissingNumber,
    /// The right-hand side does not parse as a number (or is NaN).
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    /// The referenced series is not available.
    #[error("unknown series `{0}`")]
    UnknownSeries(SeriesId),
}

impl Expression {
    /// Parses an expression.
    pub fn parse(input: &str) -> Result<Self, FilterExpressionError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(FilterExpressionError::Empty);
        }

        let (operand, rest) = match s.strip_prefix('$') {
            Some(after) => {
                let end = after
                    .find(|c: char| c.is_whitespace() || matches!(c, '<' | '>' | '=' | '!'))
                    .unwrap_or(after.len());
                let name = &after[..end];
                if name.is_empty() {
                    return Err(FilterExpressionError::MissingSeriesName);
                }
                (Operand::Series(SeriesId::new(name)), after[end..].trim_start())
            }
            None => (Operand::Value, s),
        };

        let (op, rest) = CompareOp::split_prefix(rest)
            .ok_or_else(|| FilterExpressionError::UnknownComparator(rest.to_string()))?;

        let number = rest.trim();
        if number.is_empty() {
            return Err(FilterExpressionError::MissingNumber);
        }
        let value: f64 = number
            .parse()
            .map_err(|_| FilterExpressionError::InvalidNumber(number.to_string()))?;
        if value.is_nan() {
            return Err(FilterExpressionError::InvalidNumber(number.to_string()));
        }

        Ok(Self { operand, op, value })
    }

    /// Evaluates the comparison for an operand value.
    pub fn eval(&self, operand_value: f64) -> bool {
        self.op.apply(operand_value, self.value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn parses_plain_comparisons() {
        let e = Expression::parse("> 3").unwrap();
        assert_eq!(e.operand, Operand::Value);
        assert_eq!(e.op, CompareOp::Gt);
        assert_eq!(e.value, 3.0);

        assert_eq!(Expression::parse("<=-1.5").unwrap().op, CompareOp::Le);
        assert_eq!(Expression::parse(" = 2 ").unwrap().op, CompareOp::Eq);
        assert_eq!(Expression::parse("==2").unwrap().op, CompareOp::Eq);
        assert_eq!(Expression::parse("!= 0").unwrap().op, CompareOp::Ne);
    }

    #[test]
    fn parses_series_references() {
        let e = Expression::parse("$background>=0.5").unwrap();
        assert_eq!(e.operand, Operand::Series(SeriesId::new("background")));
        assert_eq!(e.op, CompareOp::Ge);
        assert_eq!(e.value, 0.5);

        let e = Expression::parse("$flux_err < 1e-3").unwrap();
        assert_eq!(e.operand, Operand::Series(SeriesId::new("flux_err")));
        assert_eq!(e.value, 1e-3);
    }

    #[test]
    fn reports_malformed_expressions() {
        assert_eq!(Expression::parse("  "), Err(FilterExpressionError::Empty));
        assert_eq!(
            Expression::parse("$ > 1"),
            Err(FilterExpressionError::MissingSeriesName)
        );
        assert_eq!(
            Expression::parse("~ 1"),
            Err(FilterExpressionError::UnknownComparator("~ 1".into()))
        );
        assert_eq!(
            Expression::parse(">"),
            Err(FilterExpressionError::MissingNumber)
        );
        assert_eq!(
            Expression::parse("> three"),
            Err(FilterExpressionError::InvalidNumber("three".into()))
        );
        assert!(Expression::parse("< NaN").is_err());
    }

    #[test]
    fn nan_values_fail_every_comparison_but_ne() {
        let gt = Expression::parse("> 0").unwrap();
        let ne = Expression::parse("!= 0").unwrap();
        assert!(!gt.eval(f64::NAN));
        assert!(ne.eval(f64::NAN));
    }
}
