//! Rolling extreme indicators: MAX(n) over highs and MIN(n) over lows.
//!
//! Used for opening-range (n = 1) and fractal chaos bands.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{
    invalid_series, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::Candle;

pub fn calculate_rolling_max<B: Candle>(bars: &[B], period: usize) -> IndicatorSeries {
    rolling_extreme(bars, period, IndicatorType::RollingMax(period), |b| b.high(), f64::max)
}

pub fn calculate_rolling_min<B: Candle>(bars: &[B], period: usize) -> IndicatorSeries {
    rolling_extreme(bars, period, IndicatorType::RollingMin(period), |b| b.low(), f64::min)
}

fn rolling_extreme<B, F, R>(
    bars: &[B],
    period: usize,
    indicator_type: IndicatorType,
    field: F,
    reduce: R,
) -> IndicatorSeries
where
    B: Candle,
    F: Fn(&B) -> f64,
    R: Fn(f64, f64) -> f64,
{
    if period == 0 {
        return invalid_series(indicator_type, bars);
    }

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let valid = i + 1 >= period;
            let value = if valid {
                bars[i + 1 - period..=i]
                    .iter()
                    .map(&field)
                    .fold(field(bar), &reduce)
            } else {
                0.0
            };
            IndicatorPoint {
                date: bar.date(),
                valid,
                value: IndicatorValue::Simple(value),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::PriceBar;
    use chrono::NaiveDate;

    fn make_bars(highs_lows: &[(f64, f64)]) -> Vec<PriceBar> {
        highs_lows
            .iter()
            .enumerate()
            .map(|(i, &(high, low))| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                open: low,
                high,
                low,
                close: high,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn window_of_one_is_the_bar_itself() {
        let bars = make_bars(&[(10.0, 8.0), (12.0, 9.0), (11.0, 7.0)]);
        let max = calculate_rolling_max(&bars, 1);
        let min = calculate_rolling_min(&bars, 1);
        for (i, bar) in bars.iter().enumerate() {
            assert_eq!(max.value_at(i), bar.high);
            assert_eq!(min.value_at(i), bar.low);
        }
    }

    #[test]
    fn rolling_max_over_window() {
        let bars = make_bars(&[(10.0, 8.0), (12.0, 9.0), (11.0, 7.0), (9.0, 6.0)]);
        let max = calculate_rolling_max(&bars, 3);
        assert!(max.value_at(0).is_nan());
        assert!(max.value_at(1).is_nan());
        assert_eq!(max.value_at(2), 12.0);
        assert_eq!(max.value_at(3), 12.0);
    }

    #[test]
    fn rolling_min_over_window() {
        let bars = make_bars(&[(10.0, 8.0), (12.0, 9.0), (11.0, 7.0), (9.0, 6.0)]);
        let min = calculate_rolling_min(&bars, 2);
        assert!(min.value_at(0).is_nan());
        assert_eq!(min.value_at(1), 8.0);
        assert_eq!(min.value_at(2), 7.0);
        assert_eq!(min.value_at(3), 6.0);
    }

    #[test]
    fn first_point_invalid_for_multi_bar_window() {
        let bars = make_bars(&[(10.0, 8.0), (12.0, 9.0)]);
        assert!(!calculate_rolling_max(&bars, 2).values[0].valid);
    }
}
