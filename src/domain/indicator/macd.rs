//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Both EMAs start on bar slow - 1, as TA-Lib's `MACD` does: the fast EMA is seeded with the
//! SMA of closes[slow - fast..slow] rather than the first `fast` closes. A fast period larger
//! than the slow one is swapped.
//!
//! Warmup: slow - 1 + signal - 1 bars.

use crate::domain::indicator::ema::ema_over;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::Candle;

pub fn calculate_macd<B: Candle>(
    bars: &[B],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };

    if bars.is_empty() || fast == 0 || slow == 0 || signal_period == 0 {
        return IndicatorSeries {
            indicator_type,
            values: Vec::new(),
        };
    }

    let (fast, slow) = if slow < fast { (slow, fast) } else { (fast, slow) };

    let closes: Vec<f64> = bars.iter().map(|b| b.close()).collect();
    let offset = slow - fast;
    let ema_fast = aligned_ema(&closes, fast, offset);
    let ema_slow = ema_over(&closes, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => f - s,
            _ => 0.0,
        })
        .collect();

    let macd_warmup = slow - 1;
    let mut signal_line = vec![0.0; bars.len()];
    if bars.len() > macd_warmup {
        for (i, signal) in ema_over(&macd_line[macd_warmup..], signal_period)
            .into_iter()
            .enumerate()
        {
            if let Some(v) = signal {
                signal_line[macd_warmup + i] = v;
            }
        }
    }

    let signal_warmup = slow - 1 + signal_period - 1;

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorPoint {
            date: bar.date(),
            valid: i >= signal_warmup,
            value: IndicatorValue::Macd {
                line: macd_line[i],
                signal: signal_line[i],
                histogram: macd_line[i] - signal_line[i],
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

/// EMA over `input[offset..]`, placed back on the original indices.
fn aligned_ema(input: &[f64], period: usize, offset: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; input.len()];
    if offset < input.len() {
        for (slot, v) in out[offset..].iter_mut().zip(ema_over(&input[offset..], period)) {
            *slot = v;
        }
    }
    out
}
