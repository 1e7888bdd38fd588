//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A time series of indicator values, aligned 1:1 with its input bars
//!
//! Every calculation is generic over [`Candle`](crate::domain::ohlcv::Candle) so the same
//! functions run on raw price bars and on Heikin-Ashi bars. Points inside an indicator's
//! warm-up window are flagged invalid and read back as NaN, so any comparison against them
//! is false.

pub mod adx;
pub mod ema;
pub mod macd;
pub mod pct_change;
pub mod rolling;
pub mod rsi;
pub mod sma;

pub use adx::{calculate_adx, calculate_minus_di, calculate_plus_di};
pub use macd::calculate_macd;
pub use pct_change::calculate_close_to_high_pct;
pub use rolling::{calculate_rolling_max, calculate_rolling_min};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorField {
    Value,
    MacdLine,
    MacdSignal,
    MacdHistogram,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    RollingMax(usize),
    RollingMin(usize),
    Adx(usize),
    PlusDi(usize),
    MinusDi(usize),
    CloseToHighPct,
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of `field` at `index`; NaN when out of range, in warm-up, or the field does not
    /// apply to this indicator's shape.
    pub fn get(&self, index: usize, field: IndicatorField) -> f64 {
        match self.values.get(index) {
            Some(point) if point.valid => extract_field(&point.value, field),
            _ => f64::NAN,
        }
    }

    pub fn value_at(&self, index: usize) -> f64 {
        self.get(index, IndicatorField::Value)
    }
}

fn extract_field(value: &IndicatorValue, field: IndicatorField) -> f64 {
    match (value, field) {
        (IndicatorValue::Simple(v), IndicatorField::Value) => *v,
        (IndicatorValue::Macd { line, .. }, IndicatorField::MacdLine) => *line,
        (IndicatorValue::Macd { signal, .. }, IndicatorField::MacdSignal) => *signal,
        (IndicatorValue::Macd { histogram, .. }, IndicatorField::MacdHistogram) => *histogram,
        _ => f64::NAN,
    }
}

/// Series with every point invalid, used when the period or input rules out any output.
pub(crate) fn invalid_series<B: crate::domain::ohlcv::Candle>(
    indicator_type: IndicatorType,
    bars: &[B],
) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type,
        values: bars
            .iter()
            .map(|b| IndicatorPoint {
                date: b.date(),
                valid: false,
                value: IndicatorValue::Simple(0.0),
            })
            .collect(),
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::RollingMax(period) => write!(f, "MAX({})", period),
            IndicatorType::RollingMin(period) => write!(f, "MIN({})", period),
            IndicatorType::Adx(period) => write!(f, "ADX({})", period),
            IndicatorType::PlusDi(period) => write!(f, "PLUS_DI({})", period),
            IndicatorType::MinusDi(period) => write!(f, "MINUS_DI({})", period),
            IndicatorType::CloseToHighPct => write!(f, "CLOSE_TO_HIGH_PCT"),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, valid: bool, value: IndicatorValue) -> IndicatorPoint {
        IndicatorPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            valid,
            value,
        }
    }

    #[test]
    fn indicator_type_display_sma() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
    }

    #[test]
    fn indicator_type_display_macd() {
        let macd = IndicatorType::Macd {
            fast: 7,
            slow: 13,
            signal: 9,
        };
        assert_eq!(macd.to_string(), "MACD(7,13,9)");
    }

    #[test]
    fn indicator_type_display_directional() {
        assert_eq!(IndicatorType::Adx(14).to_string(), "ADX(14)");
        assert_eq!(IndicatorType::PlusDi(14).to_string(), "PLUS_DI(14)");
        assert_eq!(IndicatorType::MinusDi(14).to_string(), "MINUS_DI(14)");
    }

    #[test]
    fn invalid_point_reads_nan() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(2),
            values: vec![
                point(1, false, IndicatorValue::Simple(0.0)),
                point(2, true, IndicatorValue::Simple(5.0)),
            ],
        };
        assert!(series.value_at(0).is_nan());
        assert_eq!(series.value_at(1), 5.0);
        assert!(series.value_at(2).is_nan());
    }

    #[test]
    fn undefined_never_compares_true() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(2),
            values: vec![point(1, false, IndicatorValue::Simple(100.0))],
        };
        let v = series.value_at(0);
        assert!(!(v > 0.0));
        assert!(!(v < 0.0));
        assert!(!(v <= 0.0));
    }

    #[test]
    fn macd_fields() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Macd {
                fast: 7,
                slow: 13,
                signal: 9,
            },
            values: vec![point(
                1,
                true,
                IndicatorValue::Macd {
                    line: 2.0,
                    signal: 1.5,
                    histogram: 0.5,
                },
            )],
        };
        assert_eq!(series.get(0, IndicatorField::MacdLine), 2.0);
        assert_eq!(series.get(0, IndicatorField::MacdSignal), 1.5);
        assert_eq!(series.get(0, IndicatorField::MacdHistogram), 0.5);
        assert!(series.get(0, IndicatorField::Value).is_nan());
    }
}
