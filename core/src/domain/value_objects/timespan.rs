//! Relative time spans used for `exp` and `nbf` claims.
//!
//! A span is either a whole number of seconds or a human readable
//! expression such as `"90s"`, `"15m"`, `"1h"`, `"7d"` or `"2 days"`.
//! An expression without a unit counts milliseconds, so `"120"` is 120ms.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

const MAX_EXPRESSION_LEN: usize = 100;

const SECOND_MS: f64 = 1000.0;
const MINUTE_MS: f64 = SECOND_MS * 60.0;
const HOUR_MS: f64 = MINUTE_MS * 60.0;
const DAY_MS: f64 = HOUR_MS * 24.0;
const WEEK_MS: f64 = DAY_MS * 7.0;
const YEAR_MS: f64 = DAY_MS * 365.25;

static TIMESPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(-?(?:\d+)?\.?\d+) *(milliseconds?|msecs?|ms|seconds?|secs?|s|minutes?|mins?|m|hours?|hrs?|h|days?|d|weeks?|w|years?|yrs?|y)?$",
    )
    .expect("Invalid timespan regex pattern")
});

/// Relative time span, resolved to seconds when a token is signed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timespan {
    /// Whole seconds
    Seconds(i64),
    /// Expression such as `"1h"` or `"2 days"`
    Expr(String),
}

impl Timespan {
    /// Resolves the span to whole seconds, rounding down
    pub fn to_seconds(&self) -> Result<i64, ValidationError> {
        match self {
            Timespan::Seconds(seconds) => Ok(*seconds),
            Timespan::Expr(expr) => parse_expression(expr),
        }
    }
}

impl From<i64> for Timespan {
    fn from(seconds: i64) -> Self {
        Timespan::Seconds(seconds)
    }
}

impl From<&str> for Timespan {
    fn from(expr: &str) -> Self {
        Timespan::Expr(expr.to_string())
    }
}

impl From<String> for Timespan {
    fn from(expr: String) -> Self {
        Timespan::Expr(expr)
    }
}

impl From<chrono::Duration> for Timespan {
    fn from(duration: chrono::Duration) -> Self {
        Timespan::Seconds(duration.num_seconds())
    }
}

fn parse_expression(expr: &str) -> Result<i64, ValidationError> {
    let invalid = || ValidationError::InvalidTimespan {
        value: expr.to_string(),
    };

    if expr.is_empty() || expr.len() > MAX_EXPRESSION_LEN {
        return Err(invalid());
    }

    let captures = TIMESPAN_REGEX.captures(expr).ok_or_else(invalid)?;
    let amount: f64 = captures
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(invalid)?;
    let unit = captures
        .get(2)
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_else(|| "ms".to_string());

    let multiplier = match unit.as_str() {
        "years" | "year" | "yrs" | "yr" | "y" => YEAR_MS,
        "weeks" | "week" | "w" => WEEK_MS,
        "days" | "day" | "d" => DAY_MS,
        "hours" | "hour" | "hrs" | "hr" | "h" => HOUR_MS,
        "minutes" | "minute" | "mins" | "min" | "m" => MINUTE_MS,
        "seconds" | "second" | "secs" | "sec" | "s" => SECOND_MS,
        "milliseconds" | "millisecond" | "msecs" | "msec" | "ms" => 1.0,
        _ => return Err(invalid()),
    };

    let seconds = (amount * multiplier / SECOND_MS).floor();
    if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
        return Err(invalid());
    }

    Ok(seconds as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(expr: &str) -> i64 {
        Timespan::from(expr).to_seconds().unwrap()
    }

    #[test]
    fn test_short_units() {
        assert_eq!(seconds("90s"), 90);
        assert_eq!(seconds("15m"), 900);
        assert_eq!(seconds("1h"), 3600);
        assert_eq!(seconds("7d"), 604800);
        assert_eq!(seconds("2w"), 1209600);
        assert_eq!(seconds("1y"), 31557600);
    }

    #[test]
    fn test_long_units_and_spacing() {
        assert_eq!(seconds("2 hours"), 7200);
        assert_eq!(seconds("1 day"), 86400);
        assert_eq!(seconds("10 Minutes"), 600);
        assert_eq!(seconds("1.5h"), 5400);
    }

    #[test]
    fn test_unitless_expression_counts_milliseconds() {
        assert_eq!(seconds("120"), 0);
        assert_eq!(seconds("2500"), 2);
        assert_eq!(seconds("1500ms"), 1);
    }

    #[test]
    fn test_negative_span() {
        assert_eq!(seconds("-1h"), -3600);
    }

    #[test]
    fn test_numeric_seconds() {
        assert_eq!(Timespan::from(60i64).to_seconds().unwrap(), 60);
        assert_eq!(
            Timespan::from(chrono::Duration::minutes(2)).to_seconds().unwrap(),
            120
        );
    }

    #[test]
    fn test_invalid_expressions() {
        for expr in ["", "soon", "1 fortnight", "h1", "1h 30m"] {
            assert!(
                matches!(
                    Timespan::from(expr).to_seconds(),
                    Err(ValidationError::InvalidTimespan { .. })
                ),
                "expected {:?} to be rejected",
                expr
            );
        }

        let too_long = "1".repeat(101);
        assert!(Timespan::from(too_long.as_str()).to_seconds().is_err());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let span: Timespan = serde_json::from_str("3600").unwrap();
        assert_eq!(span, Timespan::Seconds(3600));

        let span: Timespan = serde_json::from_str(r#""1h""#).unwrap();
        assert_eq!(span, Timespan::Expr("1h".to_string()));
    }
}
