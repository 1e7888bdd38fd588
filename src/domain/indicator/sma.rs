//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]), computed with a running window sum.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{
    invalid_series, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::Candle;

pub fn calculate_sma<B: Candle>(bars: &[B], period: usize) -> IndicatorSeries {
    if period == 0 {
        return invalid_series(IndicatorType::Sma(period), bars);
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close();
        if i >= period {
            sum -= bars[i - period].close();
        }

        let valid = i + 1 >= period;
        values.push(IndicatorPoint {
            date: bar.date(),
            valid,
            value: IndicatorValue::Simple(if valid { sum / period as f64 } else { 0.0 }),
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}
