//! Close-to-high percent change.
//!
//! PCT[i] = (C[i] - H[i]) / H[i] * 100. Non-positive for well-formed bars; invalid when H is 0.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Candle;

pub fn calculate_close_to_high_pct<B: Candle>(bars: &[B]) -> IndicatorSeries {
    let values = bars
        .iter()
        .map(|bar| {
            let valid = bar.high() != 0.0;
            let pct = if valid {
                (bar.close() - bar.high()) / bar.high() * 100.0
            } else {
                0.0
            };
            IndicatorPoint {
                date: bar.date(),
                valid,
                value: IndicatorValue::Simple(pct),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::CloseToHighPct,
        values,
    }
}
