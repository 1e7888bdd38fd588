//! Directional movement indicators: +DI, -DI and ADX (Wilder).
//!
//! Steps:
//! 1. +DM / -DM and true range from consecutive bars
//! 2. Wilder-smooth each over n bars: seed with the sum of bars 1..n-1, then s - s/n + x
//!    from bar n on (TA-Lib's seeding, so values match `PLUS_DI`/`MINUS_DI`/`ADX`)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR), -DI likewise; 0 when smoothed TR is 0
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI); 0 when both DIs are 0
//! 5. ADX = mean of the first n DX values, then (ADX * (n-1) + DX) / n
//!
//! Warmup: n bars for +DI/-DI, 2n - 1 bars for ADX.

use crate::domain::indicator::{
    invalid_series, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::Candle;

struct Directional {
    plus_di: Vec<Option<f64>>,
    minus_di: Vec<Option<f64>>,
    adx: Vec<Option<f64>>,
}

pub fn calculate_plus_di<B: Candle>(bars: &[B], period: usize) -> IndicatorSeries {
    match directional(bars, period) {
        Some(d) => to_series(IndicatorType::PlusDi(period), bars, d.plus_di),
        None => invalid_series(IndicatorType::PlusDi(period), bars),
    }
}

pub fn calculate_minus_di<B: Candle>(bars: &[B], period: usize) -> IndicatorSeries {
    match directional(bars, period) {
        Some(d) => to_series(IndicatorType::MinusDi(period), bars, d.minus_di),
        None => invalid_series(IndicatorType::MinusDi(period), bars),
    }
}

pub fn calculate_adx<B: Candle>(bars: &[B], period: usize) -> IndicatorSeries {
    match directional(bars, period) {
        Some(d) => to_series(IndicatorType::Adx(period), bars, d.adx),
        None => invalid_series(IndicatorType::Adx(period), bars),
    }
}

fn to_series<B: Candle>(
    indicator_type: IndicatorType,
    bars: &[B],
    raw: Vec<Option<f64>>,
) -> IndicatorSeries {
    let values = bars
        .iter()
        .zip(raw)
        .map(|(bar, v)| IndicatorPoint {
            date: bar.date(),
            valid: v.is_some(),
            value: IndicatorValue::Simple(v.unwrap_or(0.0)),
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

fn directional<B: Candle>(bars: &[B], period: usize) -> Option<Directional> {
    let n = bars.len();
    if period == 0 || n <= period {
        return None;
    }

    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    let mut tr = vec![0.0; n];

    for i in 1..n {
        let up = bars[i].high() - bars[i - 1].high();
        let down = bars[i - 1].low() - bars[i].low();
        if up > down && up > 0.0 {
            plus_dm[i] = up;
        }
        if down > up && down > 0.0 {
            minus_dm[i] = down;
        }
        tr[i] = bars[i].true_range(bars[i - 1].close());
    }

    let mut plus_di = vec![None; n];
    let mut minus_di = vec![None; n];
    let mut dx = vec![0.0; n];

    let p = period as f64;
    let mut s_tr: f64 = tr[1..period].iter().sum();
    let mut s_plus: f64 = plus_dm[1..period].iter().sum();
    let mut s_minus: f64 = minus_dm[1..period].iter().sum();

    for i in period..n {
        s_tr = s_tr - s_tr / p + tr[i];
        s_plus = s_plus - s_plus / p + plus_dm[i];
        s_minus = s_minus - s_minus / p + minus_dm[i];

        let (pdi, mdi) = if s_tr == 0.0 {
            (0.0, 0.0)
        } else {
            (100.0 * s_plus / s_tr, 100.0 * s_minus / s_tr)
        };
        plus_di[i] = Some(pdi);
        minus_di[i] = Some(mdi);

        let di_sum = pdi + mdi;
        dx[i] = if di_sum == 0.0 {
            0.0
        } else {
            100.0 * (pdi - mdi).abs() / di_sum
        };
    }

    let mut adx = vec![None; n];
    let first_adx = 2 * period - 1;
    if first_adx < n {
        let mut value = dx[period..=first_adx].iter().sum::<f64>() / p;
        adx[first_adx] = Some(value);
        for i in (first_adx + 1)..n {
            value = (value * (p - 1.0) + dx[i]) / p;
            adx[i] = Some(value);
        }
    }

    Some(Directional {
        plus_di,
        minus_di,
        adx,
    })
}
